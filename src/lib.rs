//! Build-time tooling for the gallery site
//!
//! - `gallery`: derivative generation for gallery photos
//! - `i18n`: dotted-key translation lookup for the site's languages

pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;

pub use config::OptimizerConfig;
pub use error::{GalleryError, Result};
pub use gallery::{GalleryOptimizer, OptimizationSummary};
pub use i18n::{translate, use_translations, Language};
