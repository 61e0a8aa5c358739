//! Gallery directory scan
//!
//! Lists the category folders under the gallery root and the source images
//! inside each one. Blocking; the optimizer runs it on the blocking pool.

use std::fmt;
use std::path::Path;
use tracing::{debug, error, warn};
use walkdir::{DirEntry, WalkDir};

use super::derivative::SourceImage;
use crate::error::{GalleryError, Result};

/// Why a category folder was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Folder contains a subdirectory, so it is not a flat image folder
    NestedDirectory,
    /// Folder itself could not be opened
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NestedDirectory => f.write_str("contains a subdirectory"),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
        }
    }
}

/// One category folder and what the scan found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedCategory {
    Images {
        name: String,
        images: Vec<SourceImage>,
    },
    Skipped {
        name: String,
        reason: SkipReason,
    },
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn walk_one_level(dir: &Path) -> WalkDir {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
}

/// Scan the gallery root, one level of categories, in file-name order.
///
/// Fails only when the root itself cannot be read. Hidden entries, plain
/// files and entries that cannot be resolved (dangling links) directly under
/// the root are ignored.
pub fn scan_gallery(root: &Path) -> Result<Vec<ScannedCategory>> {
    let root_error = |reason: String| GalleryError::GalleryRoot {
        path: root.to_path_buf(),
        reason,
    };

    let metadata = std::fs::metadata(root).map_err(|e| root_error(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(root_error("not a directory".to_string()));
    }
    std::fs::read_dir(root).map_err(|e| root_error(e.to_string()))?;

    let mut categories = Vec::new();

    for entry in walk_one_level(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring unreadable entry in gallery root: {}", e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();

        if is_hidden(&name) {
            debug!("Skipping hidden entry: {}", name);
            continue;
        }
        if !entry.file_type().is_dir() {
            debug!("Ignoring non-directory entry in gallery root: {}", name);
            continue;
        }

        categories.push(scan_category(name, entry.path()));
    }

    Ok(categories)
}

/// List one category folder
///
/// An entry that cannot be resolved (dangling link, permission error) is kept
/// as a source when its name says it is one, so the optimizer counts it as a
/// failed file instead of losing the rest of the category.
fn scan_category(name: String, path: &Path) -> ScannedCategory {
    if let Err(e) = std::fs::read_dir(path) {
        return ScannedCategory::Skipped {
            name,
            reason: SkipReason::Unreadable(e.to_string()),
        };
    }

    let mut files: Vec<DirEntry> = Vec::new();
    let mut images = Vec::new();

    for entry in walk_one_level(path) {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => {
                return ScannedCategory::Skipped {
                    name,
                    reason: SkipReason::NestedDirectory,
                };
            }
            Ok(entry) => files.push(entry),
            Err(e) => match e.path().and_then(|p| SourceImage::from_path(&name, p)) {
                Some(image) => {
                    error!(category = %name, "✗ Unreadable entry {}: {}", image.label(), e);
                    images.push(image);
                }
                None => debug!(category = %name, "Ignoring unreadable entry: {}", e),
            },
        }
    }

    for entry in files.iter().filter(|e| e.file_type().is_file()) {
        if entry.file_name().to_str().is_none() {
            warn!(
                category = %name,
                "Skipping file with non-UTF-8 name: {}",
                entry.path().display()
            );
            continue;
        }
        if let Some(image) = SourceImage::from_path(&name, entry.path()) {
            images.push(image);
        }
    }
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    ScannedCategory::Images { name, images }
}
