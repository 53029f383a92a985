//! Rule tables for the site's content collections.

use super::rule::{FieldKind, FieldRule, Schema};
use crate::record::{Audience, GovernanceCategory, Industry};

/// Blog posts: `src/content/blog/`.
pub static BLOG: Schema = Schema {
    name: "blog",
    fields: &[
        FieldRule::required("title", FieldKind::text_between(10, 100)),
        FieldRule::required("summary", FieldKind::text_between(50, 300)),
        FieldRule::required("publishDate", FieldKind::Date),
        FieldRule::required("audience", FieldKind::Enum(Audience::NAMES)),
        FieldRule::required(
            "tags",
            FieldKind::TextList {
                min_items: 1,
                max_items: 5,
                lowercase: true,
            },
        ),
        FieldRule::optional("updatedDate", FieldKind::Date),
        FieldRule::flag("draft", false),
        FieldRule::optional("author", FieldKind::text()),
        FieldRule::flag("featured", false),
        FieldRule::optional("seoTitle", FieldKind::text_max(60)),
        FieldRule::optional("seoDescription", FieldKind::text_max(160)),
    ],
};

/// Case studies: `src/content/case-studies/`.
pub static CASE_STUDIES: Schema = Schema {
    name: "case-studies",
    fields: &[
        FieldRule::required("title", FieldKind::text()),
        FieldRule::required("organization", FieldKind::text()),
        FieldRule::required("industry", FieldKind::Enum(Industry::NAMES)),
        FieldRule::required("useCase", FieldKind::text()),
        FieldRule::required("outcome", FieldKind::text()),
        FieldRule::required("publishDate", FieldKind::Date),
        FieldRule::flag("featured", false),
        FieldRule::optional("logo", FieldKind::text()),
        FieldRule::optional("website", FieldKind::url()),
    ],
};

/// Governance pages: `src/content/governance/`.
pub static GOVERNANCE: Schema = Schema {
    name: "governance",
    fields: &[
        FieldRule::required("title", FieldKind::text()),
        FieldRule::required("summary", FieldKind::text()),
        FieldRule::required("category", FieldKind::Enum(GovernanceCategory::NAMES)),
        FieldRule::required("lastUpdated", FieldKind::Date),
        FieldRule::optional("order", FieldKind::Number),
    ],
};
