//! Create a config file and a starter sample.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::load_config;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing exemplar...");

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let config = load_config(config_path)?;
    let category = Path::new(&config.site.src).join("10_Introduction");
    fs::create_dir_all(&category).context("Failed to create samples directory")?;

    let sample_path = category.join("Hello_World.html");
    if !sample_path.exists() || yes {
        fs::write(&sample_path, STARTER_SAMPLE)
            .with_context(|| format!("Failed to write {}", sample_path.display()))?;
        tracing::info!("Created {}", sample_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'exemplar build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Exemplar configuration

[site]
# Directory holding the annotated samples
src = "samples"

# Output directory for the built site
output = "dist"

# Site title
title = "Samples"

# Base URL (for deployment)
base_url = "/"

[build]
# Minify the stylesheet and the samples' custom styles
minify = true
"#;

const STARTER_SAMPLE: &str = r#"<!---
formats:
  - websites
--->
<!--
  ## Introduction

  A minimal page. Comments become documentation, the markup below each
  comment becomes the code column and the body is rendered as a preview.
-->
<!doctype html>
<html ⚡ lang="en">
<head>
  <meta charset="utf-8">
  <script async src="https://cdn.ampproject.org/v0.js"></script>
  <link rel="canonical" href="https://example.com/hello-world/">
  <meta name="viewport" content="width=device-width">
  <style amp-boilerplate>body{-webkit-animation:-amp-start 8s steps(1,end) 0s 1 normal both;animation:-amp-start 8s steps(1,end) 0s 1 normal both}@keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}</style><noscript><style amp-boilerplate>body{-webkit-animation:none;animation:none}</style></noscript>
  <title>Hello World</title>
  <style amp-custom>
    h1 {
      color: #005af0;
    }
  </style>
</head>
<body>
  <!-- A heading styled by the custom stylesheet. -->
  <h1>Hello World</h1>

  <!--
    Images need explicit dimensions.
  -->
  <!--~ `layout="responsive"` scales the image with its container. ~-->
  <amp-img src="https://picsum.photos/640/480"
    width="640"
    height="480"
    layout="responsive"
    alt="A random picture">
  </amp-img>
</body>
</html>
"#;
