//! Optimizer settings for gallery derivatives
//!
//! The values are fixed at build time for the site (see `Default`),
//! but the optimizer takes them as an explicit struct so tests can
//! shrink thresholds and sizes.

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// All settings for one optimizer run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizerConfig {
    // ========== Thumbnail ==========

    /// Edge length of the square thumbnail in pixels
    pub thumb_size: u32,

    /// WebP quality for thumbnails (0 to 100)
    pub thumb_quality: u8,

    // ========== Full-size ==========

    /// Longest edge allowed for the full derivative in pixels
    /// - Larger sources are scaled down to fit inside max×max
    /// - Smaller sources keep their dimensions (never upscaled)
    pub full_max_size: u32,

    /// WebP quality for full derivatives (0 to 100)
    pub full_quality: u8,

    /// Sources strictly smaller than this (in bytes) get no thumbnail;
    /// the original is small enough to serve directly.
    pub skip_thumb_threshold: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            thumb_size: 400,
            thumb_quality: 80,
            full_max_size: 2500,
            full_quality: 88,
            skip_thumb_threshold: 500 * 1024,
        }
    }
}

impl OptimizerConfig {
    /// Reject settings the encoder or resizer cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.thumb_size == 0 {
            return Err(GalleryError::InvalidConfig("thumb_size must be > 0".into()));
        }
        if self.full_max_size == 0 {
            return Err(GalleryError::InvalidConfig(
                "full_max_size must be > 0".into(),
            ));
        }
        if self.thumb_quality > 100 {
            return Err(GalleryError::InvalidConfig(format!(
                "thumb_quality {} exceeds 100",
                self.thumb_quality
            )));
        }
        if self.full_quality > 100 {
            return Err(GalleryError::InvalidConfig(format!(
                "full_quality {} exceeds 100",
                self.full_quality
            )));
        }
        Ok(())
    }

    /// Whether a source of `file_size` bytes is worth a thumbnail
    pub fn wants_thumbnail(&self, file_size: u64) -> bool {
        file_size >= self.skip_thumb_threshold
    }

    /// Convert to JSON for the startup banner
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
