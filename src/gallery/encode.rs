//! Derivative generation: decode, resize, encode to WebP, write
//!
//! Decoding and encoding are CPU-bound, so the async entry points hand the
//! work to the blocking pool and await it before the optimizer moves on.

use image::{imageops::FilterType, DynamicImage};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

/// What a full-size step produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullOutput {
    /// Bytes written
    pub size: u64,
    pub width: u32,
    pub height: u32,
    /// Whether the source had to be scaled down
    pub resized: bool,
}

/// Generate a square thumbnail at `target`
/// Returns the size of the written file
pub async fn generate_thumbnail(
    source: PathBuf,
    target: PathBuf,
    size: u32,
    quality: u8,
) -> Result<u64> {
    tokio::task::spawn_blocking(move || write_thumbnail(&source, &target, size, quality)).await?
}

/// Generate the size-capped full derivative at `target`
pub async fn generate_full(
    source: PathBuf,
    target: PathBuf,
    max_size: u32,
    quality: u8,
) -> Result<FullOutput> {
    tokio::task::spawn_blocking(move || write_full(&source, &target, max_size, quality)).await?
}

/// Blocking version of thumbnail generation
///
/// Cover fit anchored at the center: scale so the shorter edge matches
/// `size`, then crop the overflow evenly from both sides.
pub fn write_thumbnail(source: &Path, target: &Path, size: u32, quality: u8) -> Result<u64> {
    let img = open(source)?;
    let thumbnail = img.resize_to_fill(size, size, FilterType::Lanczos3);

    let data = encode_webp(&thumbnail, quality, target)?;
    write_atomically(target, &data)?;

    Ok(data.len() as u64)
}

/// Blocking version of full-size generation
///
/// Fit inside a `max_size`×`max_size` box, never enlarging.
pub fn write_full(source: &Path, target: &Path, max_size: u32, quality: u8) -> Result<FullOutput> {
    // Header read only; decides whether a resize is needed at all
    let (width, height) = image::image_dimensions(source).map_err(|e| GalleryError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut img = open(source)?;
    let resized = width.max(height) > max_size;
    if resized {
        img = img.resize(max_size, max_size, FilterType::Lanczos3);
    }

    let data = encode_webp(&img, quality, target)?;
    write_atomically(target, &data)?;

    Ok(FullOutput {
        size: data.len() as u64,
        width: img.width(),
        height: img.height(),
        resized,
    })
}

fn open(source: &Path) -> Result<DynamicImage> {
    image::open(source).map_err(|e| GalleryError::Decode {
        path: source.to_path_buf(),
        source: e,
    })
}

/// Lossy WebP at `quality` (0-100); alpha is kept only when the source has it
fn encode_webp(img: &DynamicImage, quality: u8, target: &Path) -> Result<Vec<u8>> {
    let (width, height) = (img.width(), img.height());
    let quality = f32::from(quality);

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
    };

    let memory = encoded.map_err(|e| GalleryError::Encode {
        path: target.to_path_buf(),
        reason: format!("{:?}", e),
    })?;

    Ok(memory.to_vec())
}

/// Sibling `<target>.part` used while writing
fn partial_path(target: &Path) -> PathBuf {
    let mut partial = target.as_os_str().to_owned();
    partial.push(".part");
    PathBuf::from(partial)
}

/// Write through a sibling `.part` file so an interrupted run never leaves a
/// truncated derivative that the next run would take as finished.
/// A `.part` left by a killed run is overwritten on the next attempt.
fn write_atomically(target: &Path, data: &[u8]) -> Result<()> {
    let partial = partial_path(target);

    fs::write(&partial, data).map_err(|e| {
        let _ = fs::remove_file(&partial);
        GalleryError::io(&partial, e)
    })?;
    fs::rename(&partial, target).map_err(|e| {
        let _ = fs::remove_file(&partial);
        GalleryError::io(target, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn write_jpeg(path: &Path, width: u32, height: u32) {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_thumbnail_is_square() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("wide.jpg");
        let target = tmp.path().join("wide-thumb.webp");
        write_jpeg(&source, 120, 60);

        let size = write_thumbnail(&source, &target, 32, 80).unwrap();

        assert_eq!(size, fs::metadata(&target).unwrap().len());
        assert_eq!(image::image_dimensions(&target).unwrap(), (32, 32));
    }

    #[test]
    fn test_full_fits_inside_box() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("tall.jpg");
        let target = tmp.path().join("tall-full.webp");
        write_jpeg(&source, 50, 100);

        let output = write_full(&source, &target, 40, 88).unwrap();

        assert!(output.resized);
        assert_eq!((output.width, output.height), (20, 40));
        assert_eq!(image::image_dimensions(&target).unwrap(), (20, 40));
    }

    #[test]
    fn test_full_never_upscales() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("small.jpg");
        let target = tmp.path().join("small-full.webp");
        write_jpeg(&source, 30, 20);

        let output = write_full(&source, &target, 40, 88).unwrap();
        assert!(!output.resized);
        assert_eq!(image::image_dimensions(&target).unwrap(), (30, 20));

        // Exactly at the limit is left alone too
        let source = tmp.path().join("edge.jpg");
        let target = tmp.path().join("edge-full.webp");
        write_jpeg(&source, 40, 10);
        let output = write_full(&source, &target, 40, 88).unwrap();
        assert!(!output.resized);
        assert_eq!((output.width, output.height), (40, 10));
    }

    #[test]
    fn test_png_with_alpha() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("logo.png");
        let target = tmp.path().join("logo-full.webp");
        RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 128]))
            .save(&source)
            .unwrap();

        write_full(&source, &target, 40, 88).unwrap();
        assert_eq!(image::image_dimensions(&target).unwrap(), (16, 16));
    }

    #[test]
    fn test_corrupt_source_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("broken.jpg");
        let target = tmp.path().join("broken-thumb.webp");
        fs::write(&source, b"definitely not a jpeg").unwrap();

        let result = write_thumbnail(&source, &target, 32, 80);
        assert!(matches!(result, Err(GalleryError::Decode { .. })));
        assert!(!target.exists());
    }

    #[test]
    fn test_failed_write_leaves_no_part_file() {
        let tmp = tempfile::tempdir().unwrap();

        // Rename onto a directory fails after the data was written
        let target = tmp.path().join("taken-full.webp");
        fs::create_dir(&target).unwrap();
        let result = write_atomically(&target, b"data");
        assert!(matches!(result, Err(GalleryError::Io { .. })));
        assert!(!partial_path(&target).exists());

        // Write into a missing folder fails up front
        let target = tmp.path().join("missing/photo-full.webp");
        assert!(write_atomically(&target, b"data").is_err());
        assert!(!partial_path(&target).exists());
    }

    #[test]
    fn test_stale_part_file_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("photo-thumb.webp");
        fs::write(partial_path(&target), b"truncated from a killed run").unwrap();

        write_atomically(&target, b"fresh").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"fresh");
        assert!(!partial_path(&target).exists());
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("photo.jpg");
        write_jpeg(&source, 64, 48);

        let thumb = tmp.path().join("photo-thumb.webp");
        let full = tmp.path().join("photo-full.webp");
        generate_thumbnail(source.clone(), thumb.clone(), 16, 80).await.unwrap();
        let output = generate_full(source, full.clone(), 2500, 88).await.unwrap();

        assert!(thumb.exists());
        assert_eq!((output.width, output.height), (64, 48));
        assert!(full.exists());
    }
}
