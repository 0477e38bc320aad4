//! Image uploads from the rich-text editor
//!
//! The editor posts each inserted image as a multipart file and expects the
//! public URL back, which it then places in `<img src>`. Naming and writing go
//! through the content store, so uploaded files are indistinguishable from
//! de-inlined ones.

use crate::config::TransclusionConfig;
use crate::transclusion::{TransclusionError, write_image};
use crate::utils::IMAGE_MIME_PREFIX;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Multipart field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to read multipart form: {0}")]
    Multipart(String),

    #[error("Invalid MIME type for image upload: '{0}'")]
    InvalidContentType(String),

    #[error("Failed to store upload: {0}")]
    Store(#[from] TransclusionError),
}

/// Accepts uploaded images and stores them in the configured upload directory
#[derive(Debug, Clone)]
pub struct ImageUploadHandler {
    config: TransclusionConfig,
}

impl ImageUploadHandler {
    #[must_use]
    pub fn new(config: TransclusionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &TransclusionConfig {
        &self.config
    }

    /// Validate and store one uploaded image, returning its public URL.
    ///
    /// The declared content type must start with `image/`; the file contents
    /// are not inspected.
    pub fn store_upload(
        &self,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let content_type = content_type.unwrap_or_default();
        if !content_type.starts_with(IMAGE_MIME_PREFIX) {
            return Err(UploadError::InvalidContentType(content_type.to_string()));
        }

        let filename = write_image(self.config.upload_dir(), content_type, bytes)?;
        let url = self.config.url_for(&filename);

        log::info!("Stored uploaded image ({} bytes) at {url}", bytes.len());

        Ok(url)
    }

    /// Async version of [`Self::store_upload`], run on the blocking thread pool
    pub async fn store_upload_async(
        &self,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let handler = self.clone();
        tokio::task::spawn_blocking(move || handler.store_upload(content_type.as_deref(), &bytes))
            .await
            .map_err(|e| UploadError::Store(e.into()))?
    }
}
