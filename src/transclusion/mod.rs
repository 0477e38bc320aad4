//! Image transclusion for rich-text HTML
//!
//! Converts `<img>` sources between inline base64 data URIs and files stored on
//! disk. Leaf modules (`codec`, `store`, `document`, `walker`) are composed by
//! the `orchestrator` into the two document-level operations.

// Sub-modules
pub mod codec;
pub mod document;
pub mod errors;
pub mod orchestrator;
pub mod store;
pub mod types;
pub mod walker;

// Re-exports for public API
pub use codec::{DataUri, decode_data_uri, encode_data_uri, extension_for_mime, mime_for_extension};
pub use document::Document;
pub use errors::{Result, TransclusionError};
pub use orchestrator::{
    convert_bytes, convert_source, deinline_images, deinline_images_async, inline_images, inline_images_async,
    migrate_base64_image_to_disk, migrate_disk_image_to_base64,
};
pub use store::{read_image, resolve_stored_path, write_image};
pub use types::{ConversionOutcome, Direction, ImageFailure, TransclusionResult};
pub use walker::walk_images;
