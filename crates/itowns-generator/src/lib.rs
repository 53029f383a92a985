//! iTowns Generator Library
//!
//! Build-time processing for the iTowns website.
//!
//! # Modules
//!
//! - [`collector`] - Content discovery and schema validation
//! - [`rss`] - RSS feed generation
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod rss;

pub use build::{BuildStats, Builder, FEED_FILE};
pub use collector::{ContentCollector, SiteContent};
pub use self::rss::RssGenerator;
