//! Document-level image conversion
//!
//! Parses a document once, converts every candidate `<img src>` independently,
//! and serializes once. A failing image keeps its original `src` and is recorded
//! in the result; it never fails the document.
//!
//! The document is always re-serialized, even when nothing was converted, so
//! output formatting does not depend on how many images succeeded.

use std::path::Path;

use crate::config::TransclusionConfig;
use crate::utils::INLINE_IMAGE_PREFIX;

use super::codec::{decode_data_uri, encode_data_uri, mime_for_extension};
use super::document::Document;
use super::errors::{Result, TransclusionError};
use super::store::{image_size, read_image, resolve_stored_path, write_image};
use super::types::{ConversionOutcome, Direction, ImageFailure, TransclusionResult};
use super::walker::walk_images;

/// Replace every disk-backed image under the configured URL prefix with a data URI
pub fn inline_images(html: &str, config: &TransclusionConfig) -> Result<TransclusionResult> {
    convert_document(html, config, Direction::Inline)
}

/// Move every inline `data:image/` image to disk and reference it by URL
pub fn deinline_images(html: &str, config: &TransclusionConfig) -> Result<TransclusionResult> {
    convert_document(html, config, Direction::DeInline)
}

/// Convert raw document bytes in `direction`.
///
/// Input that is not valid UTF-8 is rejected as a [`TransclusionError::Parse`].
pub fn convert_bytes(
    bytes: &[u8],
    direction: Direction,
    config: &TransclusionConfig,
) -> Result<TransclusionResult> {
    convert_parsed(Document::parse_bytes(bytes)?, config, direction)
}

/// Async version of [`inline_images`], run on the blocking thread pool
pub async fn inline_images_async(
    html: String,
    config: TransclusionConfig,
) -> Result<TransclusionResult> {
    tokio::task::spawn_blocking(move || inline_images(&html, &config)).await?
}

/// Async version of [`deinline_images`], run on the blocking thread pool
pub async fn deinline_images_async(
    html: String,
    config: TransclusionConfig,
) -> Result<TransclusionResult> {
    tokio::task::spawn_blocking(move || deinline_images(&html, &config)).await?
}

/// Read a stored image and return it as a data URI.
///
/// The MIME type comes from the file extension; contents are not sniffed.
pub fn migrate_disk_image_to_base64(path: &Path) -> Result<String> {
    let data = read_image(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    Ok(encode_data_uri(mime_for_extension(extension), &data))
}

/// Decode a data URI and store it in `directory`. Returns the new filename.
pub fn migrate_base64_image_to_disk(directory: &Path, data_uri: &str) -> Result<String> {
    let decoded = decode_data_uri(data_uri)?;
    write_image(directory, &decoded.mime_type, &decoded.data)
}

/// Convert one `src` value.
///
/// Returns `None` when `src` is not a candidate for `direction`.
pub fn convert_source(
    src: &str,
    direction: Direction,
    config: &TransclusionConfig,
) -> Option<ConversionOutcome> {
    let converted = match direction {
        Direction::DeInline => {
            if !src.starts_with(INLINE_IMAGE_PREFIX) {
                return None;
            }
            migrate_base64_image_to_disk(config.upload_dir(), src)
                .map(|filename| config.url_for(&filename))
        }
        Direction::Inline => {
            if !src.starts_with(config.url_prefix()) {
                return None;
            }
            inline_stored_image(src, config)
        }
    };

    Some(match converted {
        Ok(replacement) => ConversionOutcome::Converted { replacement },
        Err(e) => ConversionOutcome::Failed {
            error: e.to_string(),
        },
    })
}

fn inline_stored_image(src: &str, config: &TransclusionConfig) -> Result<String> {
    let path = resolve_stored_path(config.upload_dir(), src)?;

    if let Some(limit) = config.max_inline_size_bytes() {
        let size = usize::try_from(image_size(&path)?).unwrap_or(usize::MAX);
        if size > limit {
            return Err(TransclusionError::TooLarge { size, limit });
        }
    }

    migrate_disk_image_to_base64(&path)
}

fn convert_document(
    html: &str,
    config: &TransclusionConfig,
    direction: Direction,
) -> Result<TransclusionResult> {
    convert_parsed(Document::parse(html)?, config, direction)
}

fn convert_parsed(
    document: Document,
    config: &TransclusionConfig,
    direction: Direction,
) -> Result<TransclusionResult> {
    let mut successes = 0;
    let mut failures = Vec::new();

    walk_images(document.root(), |element| {
        let mut attrs = element.attributes.borrow_mut();

        let Some(src) = attrs.get("src").map(str::to_string) else {
            return;
        };

        match convert_source(&src, direction, config) {
            None => {}
            Some(ConversionOutcome::Converted { replacement }) => {
                log::debug!("Converted image ({direction}): {}", describe_source(&src));
                attrs.insert("src", replacement);
                successes += 1;
            }
            Some(ConversionOutcome::Failed { error }) => {
                log::warn!(
                    "Unable to {direction} image {}: {error}",
                    describe_source(&src)
                );
                failures.push(ImageFailure {
                    src: describe_source(&src),
                    error,
                });
            }
        }
    });

    let html = document.serialize()?;

    log::debug!(
        "Finished {direction} pass: {successes} converted, {} failed",
        failures.len()
    );

    Ok(TransclusionResult {
        html,
        successes,
        failures,
    })
}

/// Shorten data URIs to their header for logs and failure records
fn describe_source(src: &str) -> String {
    if src.starts_with("data:") {
        match src.split_once(',') {
            Some((header, payload)) => format!("{header},... ({} chars)", payload.len()),
            None => format!("{}...", src.chars().take(48).collect::<String>()),
        }
    } else {
        src.to_string()
    }
}
