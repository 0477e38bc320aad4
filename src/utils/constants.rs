//! Shared constants for image transclusion
//!
//! Default values used by the library, the HTTP server and the CLI so they
//! agree on names and limits.

/// `src` prefix that marks an image as a de-inlining candidate.
///
/// Only image data URIs are moved to disk; other `data:` payloads are left alone.
pub const INLINE_IMAGE_PREFIX: &str = "data:image/";

/// MIME type prefix an upload must declare to be accepted
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Multipart field carrying the uploaded image, as sent by the editor plugin
pub const UPLOAD_FIELD_NAME: &str = "image";

/// Default URL prefix for stored images
pub const DEFAULT_URL_PREFIX: &str = "/uploads";

/// Default directory for stored images
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";

/// Default bind address for the HTTP server
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Request body limit for uploads and document conversions: 25MB
///
/// Documents carrying inlined images are large; a handful of photos as base64
/// easily reaches several megabytes.
pub const MAX_REQUEST_BODY_BYTES: usize = 25 * 1024 * 1024;
