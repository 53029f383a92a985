//! Typed content records.
//!
//! Records are only ever built by the schema validator, so every value here
//! already satisfies its collection's rules.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    dates::{Dated, Draftable},
    error::SchemaValidationError,
    frontmatter::RawRecord,
    schema::{CollectionKind, validate_as},
};

/// Declared intended readership of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Technical implementation details.
    Developers,
    /// Strategic value and governance.
    Executives,
    /// Announcements and community updates.
    Both,
}

impl Audience {
    pub const NAMES: &'static [&'static str] = &["developers", "executives", "both"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developers => "developers",
            Self::Executives => "executives",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sector of the organization behind a case study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Government,
    Research,
    Commercial,
    Education,
    Nonprofit,
    Other,
}

impl Industry {
    pub const NAMES: &'static [&'static str] = &[
        "government",
        "research",
        "commercial",
        "education",
        "nonprofit",
        "other",
    ];
}

/// Topic of a governance page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GovernanceCategory {
    Process,
    Membership,
    DecisionMaking,
    Transparency,
    Funding,
}

impl GovernanceCategory {
    pub const NAMES: &'static [&'static str] = &[
        "process",
        "membership",
        "decision-making",
        "transparency",
        "funding",
    ];
}

/// A blog post: framework updates, governance news, tutorials, announcements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub summary: String,
    pub publish_date: DateTime<Utc>,
    pub audience: Audience,
    /// Lower-cased, 1 to 5 entries.
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

/// A production deployment story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub title: String,
    pub organization: String,
    pub industry: Industry,
    pub use_case: String,
    pub outcome: String,
    pub publish_date: DateTime<Utc>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A transparency or decision-making document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceEntry {
    pub title: String,
    pub summary: String,
    pub category: GovernanceCategory,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
}

/// A record type bound to one collection schema.
pub trait CollectionRecord: Sized + serde::de::DeserializeOwned {
    const KIND: CollectionKind;

    /// Validate raw frontmatter against this collection's schema.
    fn from_raw(raw: &RawRecord) -> Result<Self, SchemaValidationError> {
        validate_as(Self::KIND.schema(), raw)
    }
}

impl CollectionRecord for BlogPost {
    const KIND: CollectionKind = CollectionKind::Blog;
}

impl CollectionRecord for CaseStudy {
    const KIND: CollectionKind = CollectionKind::CaseStudies;
}

impl CollectionRecord for GovernanceEntry {
    const KIND: CollectionKind = CollectionKind::Governance;
}

/// Any validated record.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRecord {
    BlogPost(BlogPost),
    CaseStudy(CaseStudy),
    GovernanceEntry(GovernanceEntry),
}

impl Dated for BlogPost {
    fn publish_date(&self) -> DateTime<Utc> {
        self.publish_date
    }
}

impl Dated for CaseStudy {
    fn publish_date(&self) -> DateTime<Utc> {
        self.publish_date
    }
}

impl Dated for GovernanceEntry {
    fn publish_date(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

impl Dated for ContentRecord {
    fn publish_date(&self) -> DateTime<Utc> {
        match self {
            Self::BlogPost(post) => post.publish_date(),
            Self::CaseStudy(study) => study.publish_date(),
            Self::GovernanceEntry(entry) => entry.publish_date(),
        }
    }
}

impl Draftable for BlogPost {
    fn is_draft(&self) -> bool {
        self.draft
    }
}

impl Draftable for CaseStudy {}

impl Draftable for GovernanceEntry {}

impl Draftable for ContentRecord {
    fn is_draft(&self) -> bool {
        matches!(self, Self::BlogPost(post) if post.draft)
    }
}
