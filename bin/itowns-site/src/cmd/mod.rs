//! CLI command implementations.

pub mod build;
pub mod check;
pub mod feed;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use itowns_core::Config;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Load the configuration.
///
/// An explicit path must exist. Without one, `config.toml` is used when
/// present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_with_env(path)
            .wrap_err_with(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.exists() {
                Config::load_with_env(default).wrap_err("Failed to load configuration")
            } else {
                tracing::warn!("no {DEFAULT_CONFIG} found, using built-in defaults");
                Ok(Config::default())
            }
        }
    }
}

/// Content directory from the CLI, falling back to the configured one.
pub fn content_dir(config: &Config, content: Option<&Path>) -> PathBuf {
    content.map_or_else(|| PathBuf::from(&config.build.content_dir), Path::to_path_buf)
}
