use std::path::Path;
use std::process::ExitCode;

use gallery_optimizer::gallery::summary::kilobytes;
use gallery_optimizer::{GalleryOptimizer, OptimizerConfig};

/// Site public folder holding the category directories
const GALLERY_ROOT: &str = "public/gallery";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let optimizer = match GalleryOptimizer::new(Path::new(GALLERY_ROOT), OptimizerConfig::default()) {
        Ok(optimizer) => optimizer,
        Err(e) => {
            tracing::error!("❌ Image optimization failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let config = optimizer.config();

    println!("🖼️  Starting image optimization in {}...", optimizer.root().display());
    println!(
        "📊 Config: Thumbs {}px @ {}%, Full max {}px @ {}%",
        config.thumb_size, config.thumb_quality, config.full_max_size, config.full_quality
    );
    println!(
        "⏭️  Skipping thumbnails for files smaller than {}KB\n",
        kilobytes(config.skip_thumb_threshold)
    );
    if let Ok(json) = config.to_json() {
        tracing::debug!("Optimizer config: {}", json);
    }

    let result = optimizer.run().await;

    match result {
        Ok(summary) => {
            println!("\n{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Image optimization failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
