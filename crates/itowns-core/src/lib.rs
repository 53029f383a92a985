//! iTowns Core Library
//!
//! Content schemas, validated records, configuration and date utilities for
//! the iTowns website.

pub mod config;
pub mod content;
pub mod dates;
pub mod error;
pub mod frontmatter;
pub mod record;
pub mod schema;

pub use config::{Config, DEFAULT_SITE_URL};
pub use content::{ContentFormat, ContentPath, Entry};
pub use dates::{DateStyle, Dated, Draftable, filter_drafts, format_date, sort_by_date_desc};
pub use error::{CoreError, Result, SchemaValidationError, Violation};
pub use frontmatter::RawRecord;
pub use record::{
    Audience, BlogPost, CaseStudy, CollectionRecord, ContentRecord, GovernanceCategory,
    GovernanceEntry, Industry,
};
pub use schema::{CollectionKind, validate_record};
