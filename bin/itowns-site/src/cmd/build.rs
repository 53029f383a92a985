//! Build command - validates content and writes the RSS feed

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use itowns_generator::Builder;

use super::{content_dir, load_config};

/// Run the build command.
///
/// Validates every content collection, then writes `rss.xml` to the output
/// directory. Any invalid content file fails the build.
pub fn run(
    config_path: Option<&Path>,
    output: Option<&Path>,
    site: Option<&str>,
    content: Option<&Path>,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?site, ?content, "Starting build");

    let mut config = load_config(config_path)?;

    if let Some(output) = output {
        config.build.output_dir = output.to_string_lossy().to_string();
    }
    let output_dir = PathBuf::from(&config.build.output_dir);
    let content_dir = content_dir(&config, content);

    tracing::debug!(?config, "Loaded configuration");

    let mut builder = Builder::new(config, &content_dir, &output_dir);
    if let Some(site) = site {
        tracing::info!(site, "Using site origin from CLI");
        builder = builder.with_site(site);
    }

    let stats = builder.build().wrap_err("Build failed")?;
    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Posts:        {} ({} draft)", stats.posts, stats.drafts);
    println!("  Case studies: {}", stats.case_studies);
    println!("  Governance:   {}", stats.governance);
    println!("  Feed items:   {}", stats.feed_items);
    println!();
    println!("  Duration:     {:.2}s", duration.as_secs_f64());
    println!("  Output:       {}", output_dir.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use itowns_generator::FEED_FILE;

    use super::*;

    #[test]
    fn test_run_writes_feed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = dir.path().join("config.toml");
        fs::write(
            &config,
            "[site]\ntitle = \"iTowns Blog\"\nbase_url = \"https://itowns.org\"\n",
        )
        .expect("write config");

        let content = dir.path().join("content");
        fs::create_dir_all(content.join("blog")).expect("mkdir");
        fs::write(
            content.join("blog/release.md"),
            "---\ntitle: \"iTowns 2.43 is out\"\nsummary: \"A release with a faster terrain pipeline and many fixes for WebGL2.\"\npublishDate: 2024-07-04\naudience: developers\ntags: [release]\n---\n",
        )
        .expect("write post");

        let output = dir.path().join("dist");
        run(
            Some(config.as_path()),
            Some(output.as_path()),
            Some("https://preview.itowns.org"),
            Some(content.as_path()),
        )
        .expect("build");

        let xml = fs::read_to_string(output.join(FEED_FILE)).expect("read feed");
        assert!(xml.contains("https://preview.itowns.org/blog/release/"));
    }
}
