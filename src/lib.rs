pub mod config;
pub mod server;
pub mod transclusion;
pub mod upload;
pub mod utils;

pub use config::TransclusionConfig;
pub use transclusion::{
    ConversionOutcome, Direction, ImageFailure, TransclusionError, TransclusionResult,
    convert_bytes, deinline_images, deinline_images_async, inline_images, inline_images_async,
    migrate_base64_image_to_disk, migrate_disk_image_to_base64,
};
pub use upload::{ImageUploadHandler, UploadError};
