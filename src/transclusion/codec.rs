//! Data URI and MIME type conversions
//!
//! Pure functions: raw image bytes ⇄ `data:<mime>;base64,<payload>` strings, and
//! image MIME types ⇄ file extensions.

use base64::Engine;
use lazy_static::lazy_static;
use std::collections::HashMap;

use super::errors::{Result, TransclusionError};

/// MIME type reported for extensions missing from the registry
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Registered image types and their extensions.
///
/// The first extension of each entry is the canonical one used when naming
/// stored files.
const MIME_EXTENSIONS: &[(&str, &[&str])] = &[
    ("image/png", &["png"]),
    ("image/jpeg", &["jpg", "jpeg", "jpe", "jfif"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
    ("image/svg+xml", &["svg"]),
    ("image/bmp", &["bmp"]),
    ("image/x-icon", &["ico"]),
    ("image/vnd.microsoft.icon", &["ico"]),
    ("image/tiff", &["tif", "tiff"]),
    ("image/avif", &["avif"]),
    ("image/apng", &["apng"]),
    ("image/heic", &["heic"]),
];

lazy_static! {
    // Reverse index. When two types share an extension the first entry wins.
    static ref EXTENSION_MIME: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        for (mime_type, extensions) in MIME_EXTENSIONS {
            for ext in *extensions {
                map.entry(*ext).or_insert(*mime_type);
            }
        }
        map
    };
}

/// A decoded data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Encode `bytes` as a base64 data URI.
///
/// `mime_type` is written verbatim.
#[must_use]
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let encoded_capacity = base64::encoded_len(bytes.len(), true).unwrap_or(0);
    let mut encoded = String::with_capacity(encoded_capacity + 13 + mime_type.len());

    encoded.push_str("data:");
    encoded.push_str(mime_type);
    encoded.push_str(";base64,");
    base64::engine::general_purpose::STANDARD.encode_string(bytes, &mut encoded);

    encoded
}

/// Decode a data URI into its MIME type and bytes.
///
/// The leading `data:` and the `base64,` marker are both optional; anything
/// after the first `;` without the marker is decoded as the payload.
pub fn decode_data_uri(uri: &str) -> Result<DataUri> {
    let uri = uri.strip_prefix("data:").unwrap_or(uri);

    let Some((mime_type, rest)) = uri.split_once(';') else {
        return Err(TransclusionError::MalformedDataUri(
            "missing ';' between MIME type and payload".to_string(),
        ));
    };

    let payload = rest.strip_prefix("base64,").unwrap_or(rest);
    let data = base64::engine::general_purpose::STANDARD.decode(payload)?;

    Ok(DataUri {
        mime_type: mime_type.to_string(),
        data,
    })
}

/// Canonical file extension (without the dot) for an image MIME type.
///
/// Matching ignores ASCII case and any `; param=value` suffix.
pub fn extension_for_mime(mime_type: &str) -> Result<&'static str> {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();

    MIME_EXTENSIONS
        .iter()
        .find(|(registered, _)| registered.eq_ignore_ascii_case(essence))
        .and_then(|(_, extensions)| extensions.first().copied())
        .ok_or_else(|| TransclusionError::UnknownMimeType(mime_type.to_string()))
}

/// Best-effort MIME type for a file extension, with or without the leading dot.
///
/// Unknown extensions yield [`FALLBACK_MIME_TYPE`].
#[must_use]
pub fn mime_for_extension(ext: &str) -> &'static str {
    let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
    EXTENSION_MIME
        .get(ext.as_str())
        .copied()
        .unwrap_or(FALLBACK_MIME_TYPE)
}
