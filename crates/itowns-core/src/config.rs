//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Site origin used when neither the build context nor the config provide one.
pub const DEFAULT_SITE_URL: &str = "https://itowns.org";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub rss: RssConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Feed and site title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Feed description.
    #[serde(default = "default_description")]
    pub description: String,

    /// Site origin (e.g., "https://itowns.org"). Falls back to [`DEFAULT_SITE_URL`].
    #[serde(default)]
    pub base_url: Option<String>,

    /// Language tag advertised by the feed.
    #[serde(default = "default_language")]
    pub language: String,

    /// Author credited when a post names none, also the copyright holder.
    #[serde(default = "default_author")]
    pub author: String,

    /// Contact mailbox used for the feed editor and webmaster fields.
    #[serde(default = "default_contact")]
    pub contact: String,

    /// Display name shown next to the contact mailbox.
    #[serde(default = "default_contact_name")]
    pub contact_name: String,

    /// License named in the copyright line.
    #[serde(default = "default_license")]
    pub license: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding one sub-directory per content collection.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Output directory for generated files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// RSS feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    /// Whether the RSS feed is written during a build.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minutes a reader may cache the feed.
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Maximum number of items in the feed. Unlimited when unset.
    #[serde(default)]
    pub limit: Option<usize>,
}

// Default value functions
fn default_title() -> String {
    "iTowns Blog".to_string()
}

fn default_description() -> String {
    "Framework updates, governance communication, and technical insights from the iTowns community."
        .to_string()
}

fn default_language() -> String {
    "en-us".to_string()
}

fn default_author() -> String {
    "iTowns Contributors".to_string()
}

fn default_contact() -> String {
    "community@itowns.org".to_string()
}

fn default_contact_name() -> String {
    "iTowns Community".to_string()
}

fn default_license() -> String {
    "Apache 2.0 License".to_string()
}

fn default_content_dir() -> String {
    "src/content".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ttl() -> u32 {
    60
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            base_url: None,
            language: default_language(),
            author: default_author(),
            contact: default_contact(),
            contact_name: default_contact_name(),
            license: default_license(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: default_ttl(),
            limit: None,
        }
    }
}

impl SiteConfig {
    /// Site origin, preferring the build context over the configured value.
    pub fn origin<'a>(&'a self, context: Option<&'a str>) -> &'a str {
        context
            .filter(|s| !s.is_empty())
            .or(self.base_url.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_SITE_URL)
    }

    /// Contact mailbox followed by its display name, as RSS expects for people.
    pub fn contact_line(&self) -> String {
        format!("{} ({})", self.contact, self.contact_name)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, with `ITOWNS__SECTION__KEY` overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("ITOWNS").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if let Some(base_url) = &self.site.base_url {
            if url::Url::parse(base_url).is_err() {
                return Err(CoreError::config(format!(
                    "site.base_url is not an absolute URL: {base_url}"
                )));
            }
            if base_url.ends_with('/') {
                tracing::warn!("site.base_url should not have a trailing slash");
            }
        }

        if self.rss.limit == Some(0) {
            return Err(CoreError::config("rss.limit must be at least 1"));
        }

        Ok(())
    }
}
