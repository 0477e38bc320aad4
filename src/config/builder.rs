//! Type-safe builder for `TransclusionConfig` using the typestate pattern
//!
//! Both the upload directory and the URL prefix must be set before `build()`
//! becomes available.

use anyhow::{Result, anyhow, bail};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::TransclusionConfig;

// Type states for the builder
pub struct WithUploadDir;
pub struct WithUrlPrefix;

pub struct TransclusionConfigBuilder<State = ()> {
    pub(crate) upload_dir: Option<PathBuf>,
    pub(crate) url_prefix: Option<String>,
    pub(crate) max_inline_size_bytes: Option<usize>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for TransclusionConfigBuilder<()> {
    fn default() -> Self {
        Self {
            upload_dir: None,
            url_prefix: None,
            max_inline_size_bytes: None,
            _phantom: PhantomData,
        }
    }
}

impl TransclusionConfig {
    /// Create a builder for configuring a `TransclusionConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> TransclusionConfigBuilder<()> {
        TransclusionConfigBuilder::default()
    }
}

impl TransclusionConfigBuilder<()> {
    pub fn upload_dir(self, dir: impl Into<PathBuf>) -> TransclusionConfigBuilder<WithUploadDir> {
        TransclusionConfigBuilder {
            upload_dir: Some(dir.into()),
            url_prefix: self.url_prefix,
            max_inline_size_bytes: self.max_inline_size_bytes,
            _phantom: PhantomData,
        }
    }
}

impl TransclusionConfigBuilder<WithUploadDir> {
    /// Set the URL prefix. A trailing `/` is dropped so references come out as
    /// `<prefix>/<filename>`.
    pub fn url_prefix(self, prefix: impl Into<String>) -> TransclusionConfigBuilder<WithUrlPrefix> {
        let prefix = prefix.into();
        let normalized = prefix.trim_end_matches('/').to_string();

        TransclusionConfigBuilder {
            upload_dir: self.upload_dir,
            url_prefix: Some(normalized),
            max_inline_size_bytes: self.max_inline_size_bytes,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl TransclusionConfigBuilder<WithUrlPrefix> {
    pub fn build(self) -> Result<TransclusionConfig> {
        let upload_dir = self
            .upload_dir
            .ok_or_else(|| anyhow!("upload_dir is required"))?;
        let url_prefix = self
            .url_prefix
            .ok_or_else(|| anyhow!("url_prefix is required"))?;

        if upload_dir.as_os_str().is_empty() {
            bail!("upload_dir must not be empty");
        }

        // An empty prefix would match every src, data URIs included
        if url_prefix.is_empty() {
            bail!("url_prefix must contain at least one path segment");
        }

        Ok(TransclusionConfig {
            upload_dir,
            url_prefix,
            max_inline_size_bytes: self.max_inline_size_bytes,
        })
    }
}

// Builder methods available at any state
impl<State> TransclusionConfigBuilder<State> {
    /// Keep stored images larger than `bytes` disk-backed when inlining
    #[must_use]
    pub fn max_inline_size_bytes(mut self, bytes: usize) -> Self {
        self.max_inline_size_bytes = Some(bytes);
        self
    }
}
