//! iTowns Site CLI Library
//!
//! Command implementations for the `itowns-site` binary: content validation
//! and RSS feed generation for the iTowns website.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, feed)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use itowns_site::cmd;
//!
//! // Validate content and write dist/rss.xml
//! cmd::build::run(None, Some(Path::new("dist")), None, None).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use itowns_core::{Config, SchemaValidationError};
pub use itowns_generator::{BuildStats, Builder, ContentCollector, SiteContent};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
