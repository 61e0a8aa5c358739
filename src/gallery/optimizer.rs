//! One-shot gallery optimizer
//!
//! Walks every category once and makes sure each source image has its
//! thumbnail and full-size WebP next to it. Presence of a derivative file is
//! the only state: existing files are never rewritten, so re-running is safe.

use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::derivative::{DerivativeKind, SourceImage};
use super::encode;
use super::scan::{scan_gallery, ScannedCategory};
use super::summary::{kilobytes, OptimizationSummary, Reduction, StepOutcome};
use crate::config::OptimizerConfig;
use crate::error::{GalleryError, Result};

/// Optimizer bound to a gallery root and its settings
#[derive(Debug, Clone)]
pub struct GalleryOptimizer {
    root: PathBuf,
    config: OptimizerConfig,
}

impl GalleryOptimizer {
    pub fn new(root: impl Into<PathBuf>, config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root: root.into(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Process the whole gallery, one category and one file at a time.
    ///
    /// Returns an error only if the gallery root cannot be scanned. Per-file
    /// failures are logged and counted in the summary.
    pub async fn run(&self) -> Result<OptimizationSummary> {
        let root = self.root.clone();
        let categories = tokio::task::spawn_blocking(move || scan_gallery(&root)).await??;

        let mut summary = OptimizationSummary::default();

        for category in categories {
            match category {
                ScannedCategory::Skipped { name, reason } => {
                    warn!(category = %name, "Skipping category: {}", reason);
                    summary.categories_skipped += 1;
                }
                ScannedCategory::Images { name, images } => {
                    debug!(category = %name, "Processing {} images", images.len());
                    for image in &images {
                        self.process_image(image, &mut summary).await;
                    }
                }
            }
        }

        Ok(summary)
    }

    async fn process_image(&self, image: &SourceImage, summary: &mut OptimizationSummary) {
        let file_size = match tokio::fs::metadata(&image.path).await {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                let e = GalleryError::io(&image.path, e);
                error!(category = %image.category, "✗ Error reading {}: {}", image.label(), e);
                summary.record(DerivativeKind::Thumbnail, StepOutcome::Failed);
                summary.record(DerivativeKind::Full, StepOutcome::Failed);
                return;
            }
        };

        let outcome = self.thumbnail_step(image, file_size).await;
        summary.record(DerivativeKind::Thumbnail, outcome);

        let outcome = self.full_step(image, file_size).await;
        summary.record(DerivativeKind::Full, outcome);
    }

    async fn thumbnail_step(&self, image: &SourceImage, file_size: u64) -> StepOutcome {
        let target = image.derivative_path(DerivativeKind::Thumbnail);

        if exists(&target).await {
            debug!("Thumbnail exists: {}", target.display());
            return StepOutcome::Existing;
        }
        if !self.config.wants_thumbnail(file_size) {
            debug!(
                "Thumbnail not needed for {} ({}KB)",
                image.label(),
                kilobytes(file_size)
            );
            return StepOutcome::TooSmall;
        }

        let result = encode::generate_thumbnail(
            image.path.clone(),
            target,
            self.config.thumb_size,
            self.config.thumb_quality,
        )
        .await;

        match result {
            Ok(size) => {
                info!(
                    category = %image.category,
                    "✓ Thumb: {}/{} ({}KB)",
                    image.category,
                    DerivativeKind::Thumbnail.file_name(&image.base_name),
                    kilobytes(size)
                );
                StepOutcome::Created
            }
            Err(e) => {
                error!(category = %image.category, "✗ Error processing thumb {}: {}", image.label(), e);
                StepOutcome::Failed
            }
        }
    }

    async fn full_step(&self, image: &SourceImage, file_size: u64) -> StepOutcome {
        let target = image.derivative_path(DerivativeKind::Full);

        if exists(&target).await {
            debug!("Full version exists: {}", target.display());
            return StepOutcome::Existing;
        }

        let result = encode::generate_full(
            image.path.clone(),
            target,
            self.config.full_max_size,
            self.config.full_quality,
        )
        .await;

        match result {
            Ok(output) => {
                info!(
                    category = %image.category,
                    "✓ Full:  {}/{} ({}KB, {})",
                    image.category,
                    DerivativeKind::Full.file_name(&image.base_name),
                    kilobytes(output.size),
                    Reduction::between(file_size, output.size)
                );
                StepOutcome::Created
            }
            Err(e) => {
                error!(category = %image.category, "✗ Error processing full {}: {}", image.label(), e);
                StepOutcome::Failed
            }
        }
    }
}

/// A path we cannot even stat counts as missing; the write will report why
async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
