//! Image catalog: the files in the image directory become the image ids.

use std::path::{Path, PathBuf};

use tracing::debug;
use wire::ImageId;

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

/// Extensions (lowercase) recognised as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read image directory {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
}

/// Whether `file_name` has an image extension, ignoring case.
#[must_use]
pub fn is_image(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Sorted file names of the images directly inside `dir`.
///
/// Subdirectories and files with non-UTF-8 names are skipped.
///
/// # Errors
///
/// Returns [`CatalogError::Read`] if `dir` cannot be listed.
pub fn scan_images(dir: &Path) -> Result<Vec<ImageId>, CatalogError> {
    let read_err = |source| CatalogError::Read { path: dir.to_path_buf(), source };
    let mut ids = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map_err(read_err)?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        if is_image(&name) {
            ids.push(name);
        }
    }
    ids.sort();
    Ok(ids)
}
