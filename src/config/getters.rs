//! Getter methods for `TransclusionConfig`

use std::path::Path;

use super::types::TransclusionConfig;

impl TransclusionConfig {
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    #[must_use]
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    #[must_use]
    pub fn max_inline_size_bytes(&self) -> Option<usize> {
        self.max_inline_size_bytes
    }

    /// Public URL of a stored file
    #[must_use]
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{filename}", self.url_prefix)
    }
}
