//! Test utilities shared by the integration tests

use image_transclusion::TransclusionConfig;
use std::path::Path;
use tempfile::TempDir;

/// PNG file signature, `iVBORw0KGgo=` in base64
#[allow(dead_code)]
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

#[allow(dead_code)]
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Creates a temporary directory for stored images
#[allow(dead_code)]
pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Config storing into `dir` and serving under `/files`
#[allow(dead_code)]
pub fn test_config(dir: &Path) -> TransclusionConfig {
    TransclusionConfig::builder()
        .upload_dir(dir)
        .url_prefix("/files")
        .build()
        .expect("Failed to build test config")
}

/// Collect the `src` attribute of every `<img>` in `html`, in document order
#[allow(dead_code)]
pub fn image_sources(html: &str) -> Vec<String> {
    let document = image_transclusion::transclusion::Document::parse(html).expect("Failed to parse");
    let mut sources = Vec::new();
    image_transclusion::transclusion::walk_images(document.root(), |element| {
        if let Some(src) = element.attributes.borrow().get("src") {
            sources.push(src.to_string());
        }
    });
    sources
}
