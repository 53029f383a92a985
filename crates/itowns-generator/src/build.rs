//! Build orchestration.
//!
//! Validates all content and writes the generated feed.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use itowns_core::Config;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{CollectorError, ContentCollector, SiteContent},
    rss::{RssError, RssGenerator},
};

/// File name of the generated feed inside the output directory.
pub const FEED_FILE: &str = "rss.xml";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// RSS generation error.
    #[error("RSS error: {0}")]
    Rss(#[from] RssError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of blog posts, drafts included.
    pub posts: usize,

    /// Number of draft posts left out of the feed.
    pub drafts: usize,

    /// Number of case studies.
    pub case_studies: usize,

    /// Number of governance pages.
    pub governance: usize,

    /// Number of items written to the feed.
    pub feed_items: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    content_dir: PathBuf,
    output_dir: PathBuf,
    site: Option<String>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: Config,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            site: None,
        }
    }

    /// Set the site origin provided by the build context.
    #[must_use]
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Path of the feed this builder writes.
    pub fn feed_path(&self) -> PathBuf {
        self.output_dir.join(FEED_FILE)
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Collect and validate content
        let content = ContentCollector::new(&self.content_dir).collect()?;

        let mut stats = BuildStats {
            posts: content.blog.len(),
            drafts: content.draft_count(),
            case_studies: content.case_studies.len(),
            governance: content.governance.len(),
            ..Default::default()
        };

        // 2. Prepare output directory
        fs::create_dir_all(&self.output_dir)?;

        // 3. Generate RSS feed
        if self.config.rss.enabled {
            stats.feed_items = self.generate_rss(&content)?;
        } else {
            debug!("RSS feed disabled");
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            posts = stats.posts,
            drafts = stats.drafts,
            case_studies = stats.case_studies,
            governance = stats.governance,
            feed_items = stats.feed_items,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Generate the RSS feed, returning the number of items written.
    fn generate_rss(&self, content: &SiteContent) -> Result<usize> {
        let generator = RssGenerator::new(self.config.clone());
        let channel = generator.channel(
            &content.blog,
            self.site.as_deref(),
            chrono::Utc::now(),
        )?;

        let path = self.feed_path();
        write_file(&path, channel.to_string().as_bytes())?;
        info!(path = %path.display(), items = channel.items().len(), "wrote RSS feed");

        Ok(channel.items().len())
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
