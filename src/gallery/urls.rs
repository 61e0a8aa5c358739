//! Public URLs for gallery images as the site pages reference them
//!
//! Pages link to "/gallery/<category>/<file>". When the optimizer produced
//! derivatives for that file they are preferred; otherwise the original is
//! served (sources under the thumbnail threshold never get a thumbnail).

use serde::Serialize;
use std::path::Path;

use super::derivative::{source_base_name, DerivativeKind};

/// URLs to use for one gallery image
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OptimizedImage {
    /// Grid image
    pub thumbnail: String,
    /// Detail view image
    pub full: String,
    /// Untouched source
    pub original: String,
}

/// Pixel box for a gallery tile
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Gallery tiles are square
pub fn square_dimensions(width: u32) -> ImageDimensions {
    ImageDimensions {
        width,
        height: width,
    }
}

/// Resolve the URLs for `image_url` (e.g., "/gallery/meble/1.jpg"), checking
/// for derivatives under `public_root` (the folder the site serves from).
pub fn optimized_gallery_image(public_root: &Path, image_url: &str) -> OptimizedImage {
    OptimizedImage {
        thumbnail: derivative_url(public_root, image_url, DerivativeKind::Thumbnail),
        full: derivative_url(public_root, image_url, DerivativeKind::Full),
        original: image_url.to_string(),
    }
}

fn derivative_url(public_root: &Path, image_url: &str, kind: DerivativeKind) -> String {
    let (dir, file_name) = match image_url.rsplit_once('/') {
        Some((dir, file_name)) => (Some(dir), file_name),
        None => (None, image_url),
    };

    let Some(base_name) = source_base_name(file_name) else {
        return image_url.to_string();
    };

    let derivative_name = kind.file_name(base_name);
    let on_disk = public_root
        .join(dir.unwrap_or("").trim_start_matches('/'))
        .join(&derivative_name);

    if !on_disk.is_file() {
        return image_url.to_string();
    }

    match dir {
        Some(dir) => format!("{}/{}", dir, derivative_name),
        None => derivative_name,
    }
}
