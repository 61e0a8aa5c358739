use std::fmt;

use super::derivative::DerivativeKind;

/// How one (source, derivative kind) pair ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Derivative already on disk; nothing done
    Existing,
    /// Source under the thumbnail threshold; nothing done
    TooSmall,
    Created,
    /// Error was logged; the derivative is left missing
    Failed,
}

/// Running counters for one optimizer run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizationSummary {
    /// Thumbnails written this run
    pub thumbs_created: usize,
    /// Thumbnails left alone because the file already existed
    pub thumbs_existing: usize,
    /// Sources under the size threshold (no thumbnail, not an error)
    pub thumbs_too_small: usize,
    pub thumbs_failed: usize,
    /// Full derivatives written this run
    pub full_created: usize,
    /// Full derivatives left alone because the file already existed
    pub full_existing: usize,
    pub full_failed: usize,
    /// Non-hidden category folders that were not processed
    pub categories_skipped: usize,
}

impl OptimizationSummary {
    /// Count one finished step
    pub fn record(&mut self, kind: DerivativeKind, outcome: StepOutcome) {
        let counter = match (kind, outcome) {
            (DerivativeKind::Thumbnail, StepOutcome::Existing) => &mut self.thumbs_existing,
            (DerivativeKind::Thumbnail, StepOutcome::TooSmall) => &mut self.thumbs_too_small,
            (DerivativeKind::Thumbnail, StepOutcome::Created) => &mut self.thumbs_created,
            (DerivativeKind::Thumbnail, StepOutcome::Failed) => &mut self.thumbs_failed,
            (DerivativeKind::Full, StepOutcome::Existing) => &mut self.full_existing,
            (DerivativeKind::Full, StepOutcome::Created) => &mut self.full_created,
            (DerivativeKind::Full, StepOutcome::Failed) => &mut self.full_failed,
            // Full versions have no size threshold
            (DerivativeKind::Full, StepOutcome::TooSmall) => return,
        };
        *counter += 1;
    }

    /// Number of encodes performed
    pub fn created(&self) -> usize {
        self.thumbs_created + self.full_created
    }

    pub fn failed(&self) -> usize {
        self.thumbs_failed + self.full_failed
    }
}

impl fmt::Display for OptimizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "✅ Optimization Complete!")?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "📸 Thumbnails: {} created, {} already existed",
            self.thumbs_created, self.thumbs_existing
        )?;
        writeln!(
            f,
            "🖼️  Full-size:  {} created, {} already existed",
            self.full_created, self.full_existing
        )?;
        writeln!(
            f,
            "⏭️  Thumbnails skipped (small files): {}",
            self.thumbs_too_small
        )?;
        if self.failed() > 0 {
            writeln!(
                f,
                "⚠️  Failed: {} thumbnails, {} full-size",
                self.thumbs_failed, self.full_failed
            )?;
        }
        if self.categories_skipped > 0 {
            writeln!(f, "📁 Categories skipped: {}", self.categories_skipped)?;
        }
        write!(f, "{}", rule)
    }
}

/// Size change of a derivative relative to its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    /// Bytes saved; negative when the derivative came out larger
    pub saved_bytes: i64,
    /// Percentage saved, rounded; 0 for an empty source
    pub saved_percent: i64,
}

impl Reduction {
    pub fn between(original: u64, output: u64) -> Self {
        let saved_bytes = original as i64 - output as i64;
        let saved_percent = if original == 0 {
            0
        } else {
            ((1.0 - output as f64 / original as f64) * 100.0).round() as i64
        };

        Self {
            saved_bytes,
            saved_percent,
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "saved {}KB / {}%",
            kilobytes_signed(self.saved_bytes),
            self.saved_percent
        )
    }
}

/// Rounded kilobytes for progress lines
pub fn kilobytes(bytes: u64) -> u64 {
    (bytes as f64 / 1024.0).round() as u64
}

fn kilobytes_signed(bytes: i64) -> i64 {
    (bytes as f64 / 1024.0).round() as i64
}
