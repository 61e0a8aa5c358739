//! Gallery image optimization
//!
//! This module handles:
//! - Scanning the gallery root for category folders and source images
//! - Generating square thumbnails and size-capped full versions as WebP
//! - Counting what was created, skipped or failed
//! - Resolving the URLs pages use for each gallery image

pub mod derivative;
pub mod encode;
pub mod optimizer;
pub mod scan;
pub mod summary;
pub mod urls;

pub use derivative::{DerivativeKind, SourceImage};
pub use optimizer::GalleryOptimizer;
pub use summary::OptimizationSummary;
pub use urls::{optimized_gallery_image, square_dimensions, OptimizedImage};
