//! Core configuration types for image transclusion

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where disk-backed images live and how they are addressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransclusionConfig {
    /// Directory holding stored image files
    pub(crate) upload_dir: PathBuf,

    /// URL prefix under which `upload_dir` is served, without a trailing `/`.
    ///
    /// Disk-backed references are `<url_prefix>/<filename>`.
    pub(crate) url_prefix: String,

    /// Maximum size in bytes of a stored image that may be inlined.
    /// Larger images stay disk-backed.
    /// Default is None (all images are inlined).
    #[serde(default)]
    pub(crate) max_inline_size_bytes: Option<usize>,
}
