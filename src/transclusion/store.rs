//! Content store for image files
//!
//! Files live flat in a single directory under `<uuid>.<ext>` names. There is no
//! index: existence on disk is the only metadata.

use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

use super::codec::extension_for_mime;
use super::errors::{Result, TransclusionError};

/// Write `bytes` into `directory` under a fresh unique name and return the bare
/// filename.
///
/// Missing parent directories are created. The extension comes from
/// `mime_type`, so an unregistered type fails before anything touches the disk.
pub fn write_image(directory: &Path, mime_type: &str, bytes: &[u8]) -> Result<String> {
    let extension = extension_for_mime(mime_type)?;

    std::fs::create_dir_all(directory)
        .map_err(|source| TransclusionError::StorageUnavailable {
            path: directory.to_path_buf(),
            source,
        })?;

    let filename = format!("{}.{extension}", Uuid::new_v4());
    let path = directory.join(&filename);

    std::fs::write(&path, bytes)
        .map_err(|source| TransclusionError::StorageUnavailable { path, source })?;

    log::debug!(
        "Stored {} bytes of {mime_type} as {filename} in {}",
        bytes.len(),
        directory.display()
    );

    Ok(filename)
}

/// Read the full contents of a stored image
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| TransclusionError::from_io(path, e))
}

/// Size in bytes of a stored image, without reading it
pub fn image_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|e| TransclusionError::from_io(path, e))
}

/// Resolve an image reference to a path inside `directory`.
///
/// Only the final path segment of `reference` is kept, so `../` sequences and
/// absolute paths cannot escape the directory. References without a usable
/// final segment resolve to [`TransclusionError::NotFound`].
pub fn resolve_stored_path(directory: &Path, reference: &str) -> Result<PathBuf> {
    match Path::new(reference).components().next_back() {
        Some(Component::Normal(name)) => Ok(directory.join(name)),
        _ => Err(TransclusionError::NotFound(PathBuf::from(reference))),
    }
}
