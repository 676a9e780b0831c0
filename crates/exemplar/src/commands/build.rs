//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use exemplar_static::{BuildConfig, StaticBuilder};

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = load_config(config_path)?;

    let config = BuildConfig {
        samples_dir: PathBuf::from(&file_config.site.src),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output)),
        minify: minify.unwrap_or(file_config.build.minify),
        base_url: file_config.site.base_url,
        title: file_config.site.title,
    };

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages with {} sections in {}ms",
        result.pages,
        result.sections,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
