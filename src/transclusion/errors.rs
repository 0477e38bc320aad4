//! Error types for image transclusion
//!
//! Document-level variants abort a conversion. Per-image variants are caught by
//! the orchestrator and recorded against the image that produced them.

use std::path::PathBuf;

/// Result type alias for transclusion operations
pub type Result<T> = std::result::Result<T, TransclusionError>;

#[derive(Debug, thiserror::Error)]
pub enum TransclusionError {
    /// Input could not be read as markup text
    #[error("Failed to parse HTML document: {0}")]
    Parse(String),

    /// Mutated tree could not be written back to text
    #[error("Failed to serialize HTML document: {0}")]
    Serialize(#[source] std::io::Error),

    /// Data URI has no `;` separating the MIME type from the payload
    #[error("Malformed data URI: {0}")]
    MalformedDataUri(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// MIME type has no registered file extension
    #[error("Unknown image MIME type: '{0}'")]
    UnknownMimeType(String),

    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Stored file exceeds the configured inline size limit
    #[error("Image too large to inline: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// Blocking conversion task panicked or was cancelled
    #[error("Conversion task failed: {0}")]
    Task(String),
}

impl TransclusionError {
    /// Map an I/O error on `path` onto the storage variants
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            TransclusionError::NotFound(path)
        } else {
            TransclusionError::StorageUnavailable { path, source }
        }
    }

    /// Whether this error is absorbed at the image level rather than failing
    /// the whole document
    #[must_use]
    pub fn is_per_image(&self) -> bool {
        matches!(
            self,
            TransclusionError::MalformedDataUri(_)
                | TransclusionError::InvalidBase64(_)
                | TransclusionError::UnknownMimeType(_)
                | TransclusionError::StorageUnavailable { .. }
                | TransclusionError::NotFound(_)
                | TransclusionError::TooLarge { .. }
        )
    }
}

impl From<tokio::task::JoinError> for TransclusionError {
    fn from(error: tokio::task::JoinError) -> Self {
        TransclusionError::Task(error.to_string())
    }
}
