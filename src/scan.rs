//! Input folder scanning and page ordering

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::error::{Error, Result};
use crate::sort_key::extract_sort_key;

/// File extensions (lower-case, without the dot) treated as images
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff"];

/// An image file found in the input folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// File name as shown in reports
    pub name: String,
    /// Number extracted from the file name, 0 if none
    pub sort_key: u64,
}

impl ImageEntry {
    /// Build an entry from a path, deriving the name and sort key
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sort_key = extract_sort_key(&name);
        Self { path, name, sort_key }
    }
}

/// Check whether a path has one of the recognized image extensions (case-insensitive)
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Find the images directly inside `dir`, in page order
///
/// Subdirectories are not descended into. Entries are ordered by file name
/// first and then stable-sorted by sort key, so files sharing a key (usually
/// the unnumbered ones at key 0) come out in the same order on every platform.
///
/// An empty result is not an error.
pub fn find_images(dir: &Path) -> Result<Vec<ImageEntry>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !is_image_file(&path) {
            continue;
        }
        if path.is_dir() {
            debug!("Ignoring directory {}", path.display());
            continue;
        }

        entries.push(ImageEntry::from_path(path));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries.sort_by_key(|e| e.sort_key);

    debug!("Found {} images in {}", entries.len(), dir.display());

    Ok(entries)
}
