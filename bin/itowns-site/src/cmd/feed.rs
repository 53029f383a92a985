//! Feed command - print the RSS feed to stdout

use std::{io, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use itowns_generator::{ContentCollector, RssGenerator};

use super::{content_dir, load_config};

/// Run the feed command.
///
/// Validates the blog collection and writes the feed XML to stdout, leaving
/// the output directory untouched.
pub fn run(config_path: Option<&Path>, site: Option<&str>, content: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let content_dir = content_dir(&config, content);
    tracing::info!(content = %content_dir.display(), ?site, "Rendering feed");

    let content = ContentCollector::new(&content_dir)
        .collect()
        .wrap_err("Content validation failed")?;

    let generator = RssGenerator::new(config);
    let mut stdout = io::stdout().lock();
    generator
        .write_to(&content.blog, site, &mut stdout)
        .wrap_err("Failed to render feed")?;

    Ok(())
}
