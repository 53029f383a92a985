//! Content collection schemas.
//!
//! Each collection's accepted shape is declared as a rule table in
//! [`collections`] and checked by the single generic routine in
//! [`validate()`]. Validation is total: a record either
//! satisfies every rule or is rejected with the full list of violations.

pub mod collections;
pub mod rule;
mod validate;

use std::fmt;

pub use rule::{DefaultValue, FieldKind, FieldRule, Presence, Schema, TextFormat};
pub use validate::{coerce_date, validate, validate_as};

use crate::{
    error::SchemaValidationError,
    frontmatter::RawRecord,
    record::{BlogPost, CaseStudy, CollectionRecord, ContentRecord, GovernanceEntry},
};

/// The site's content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Blog,
    CaseStudies,
    Governance,
}

impl CollectionKind {
    pub const ALL: [Self; 3] = [Self::Blog, Self::CaseStudies, Self::Governance];

    /// Collection name, also its directory under the content root.
    pub fn name(&self) -> &'static str {
        self.schema().name
    }

    /// The rule table for this collection.
    pub fn schema(&self) -> &'static Schema {
        match self {
            Self::Blog => &collections::BLOG,
            Self::CaseStudies => &collections::CASE_STUDIES,
            Self::Governance => &collections::GOVERNANCE,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validate a raw record against the schema of `kind`.
pub fn validate_record(
    kind: CollectionKind,
    raw: &RawRecord,
) -> Result<ContentRecord, SchemaValidationError> {
    Ok(match kind {
        CollectionKind::Blog => ContentRecord::BlogPost(BlogPost::from_raw(raw)?),
        CollectionKind::CaseStudies => ContentRecord::CaseStudy(CaseStudy::from_raw(raw)?),
        CollectionKind::Governance => ContentRecord::GovernanceEntry(GovernanceEntry::from_raw(raw)?),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_yaml::Value;

    use super::*;
    use crate::record::{Audience, GovernanceCategory, Industry};

    const SUMMARY: &str =
        "A look at what changed in the latest iTowns release and how to upgrade your apps.";

    fn blog_raw() -> RawRecord {
        let mut raw = RawRecord::new();
        raw.insert("title".into(), "Releasing iTowns 2.43".into());
        raw.insert("summary".into(), SUMMARY.into());
        raw.insert("publishDate".into(), "2024-07-04".into());
        raw.insert("audience".into(), "developers".into());
        raw.insert(
            "tags".into(),
            Value::Sequence(vec!["release".into(), "3d".into()]),
        );
        raw
    }

    fn single_violation(raw: &RawRecord) -> (String, String) {
        let err = validate(&collections::BLOG, raw).unwrap_err();
        assert_eq!(err.violations.len(), 1, "{err}");
        let v = &err.violations[0];
        (v.field.clone(), v.constraint.clone())
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(CollectionKind::Blog.name(), "blog");
        assert_eq!(CollectionKind::CaseStudies.name(), "case-studies");
        assert_eq!(CollectionKind::Governance.to_string(), "governance");
    }

    #[test]
    fn test_valid_blog_post_accepted_unchanged() {
        let raw = blog_raw();
        let ContentRecord::BlogPost(post) =
            validate_record(CollectionKind::Blog, &raw).expect("valid")
        else {
            panic!("expected a blog post");
        };

        assert_eq!(post.title, "Releasing iTowns 2.43");
        assert_eq!(post.summary, SUMMARY);
        assert_eq!(
            post.publish_date,
            Utc.with_ymd_and_hms(2024, 7, 4, 0, 0, 0).unwrap()
        );
        assert_eq!(post.audience, Audience::Developers);
        assert_eq!(post.tags, vec!["release", "3d"]);
        assert!(!post.draft);
        assert!(!post.featured);
        assert!(post.author.is_none());
        assert!(post.updated_date.is_none());
    }

    #[test]
    fn test_title_length_bounds() {
        let mut raw = blog_raw();
        raw.insert("title".into(), "Too Short".into());
        assert_eq!(
            single_violation(&raw),
            (
                "title".to_string(),
                "must be at least 10 characters".to_string()
            )
        );

        raw.insert("title".into(), "Just Right".into());
        assert!(validate(&collections::BLOG, &raw).is_ok());

        raw.insert("title".into(), "x".repeat(100).into());
        assert!(validate(&collections::BLOG, &raw).is_ok());

        raw.insert("title".into(), "x".repeat(101).into());
        assert_eq!(single_violation(&raw).0, "title");
    }

    #[test]
    fn test_summary_length_bounds() {
        let mut raw = blog_raw();
        raw.insert("summary".into(), "x".repeat(49).into());
        assert_eq!(single_violation(&raw).0, "summary");

        raw.insert("summary".into(), "x".repeat(301).into());
        assert_eq!(
            single_violation(&raw).1,
            "must be at most 300 characters".to_string()
        );
    }

    #[test]
    fn test_each_single_violation_reported_alone() {
        let cases: Vec<(&str, Value)> = vec![
            ("audience", "managers".into()),
            ("publishDate", "someday".into()),
            ("tags", Value::Sequence(vec![])),
            (
                "tags",
                Value::Sequence((0..6).map(|i| format!("t{i}").into()).collect()),
            ),
            ("draft", "no".into()),
            ("seoTitle", "x".repeat(61).into()),
            ("seoDescription", "x".repeat(161).into()),
            ("updatedDate", Value::Bool(true)),
        ];

        for (field, value) in cases {
            let mut raw = blog_raw();
            raw.insert(field.into(), value);
            assert_eq!(single_violation(&raw).0, field);
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut raw = blog_raw();
        raw.insert("slug".into(), "custom".into());
        assert_eq!(
            single_violation(&raw),
            ("slug".to_string(), "is not a known field".to_string())
        );
    }

    #[test]
    fn test_null_optional_fields_rejected() {
        let mut raw = blog_raw();
        raw.insert("author".into(), Value::Null);
        raw.insert("draft".into(), Value::Null);
        raw.insert("seoTitle".into(), Value::Null);

        let err = validate(&collections::BLOG, &raw).unwrap_err();
        let constraints: Vec<_> = err
            .violations
            .iter()
            .map(|v| (v.field.as_str(), v.constraint.as_str()))
            .collect();
        assert_eq!(
            constraints,
            vec![
                ("draft", "must be a boolean"),
                ("author", "must be a string"),
                ("seoTitle", "must be a string"),
            ]
        );
    }

    #[test]
    fn test_tags_lowercased() {
        let mut raw = blog_raw();
        raw.insert(
            "tags".into(),
            Value::Sequence(vec!["WebGL".into(), "Release".into()]),
        );
        let post = BlogPost::from_raw(&raw).expect("valid");
        assert_eq!(post.tags, vec!["webgl", "release"]);
    }

    #[test]
    fn test_case_study_schema() {
        let raw: RawRecord = serde_yaml::from_str(
            r#"
title: "Mapping the city in 3D"
organization: "IGN"
industry: government
useCase: "Visualising national 3D building data"
outcome: "Public 3D viewer used by municipalities"
publishDate: 2023-11-20
website: "https://www.ign.fr"
"#,
        )
        .expect("yaml");

        let ContentRecord::CaseStudy(study) =
            validate_record(CollectionKind::CaseStudies, &raw).expect("valid")
        else {
            panic!("expected a case study");
        };
        assert_eq!(study.industry, Industry::Government);
        assert!(!study.featured);
        assert_eq!(study.website.as_deref(), Some("https://www.ign.fr"));

        let mut bad = raw.clone();
        bad.insert("website".into(), "www.ign.fr".into());
        bad.insert("industry".into(), "military".into());
        let err = validate_record(CollectionKind::CaseStudies, &bad).unwrap_err();
        assert!(err.has_field("website"));
        assert!(err.has_field("industry"));
        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.collection, "case-studies");
    }

    #[test]
    fn test_governance_schema() {
        let raw: RawRecord = serde_yaml::from_str(
            r#"
title: "How decisions are made"
summary: "Lazy consensus and votes"
category: decision-making
lastUpdated: 2024-05-02
order: 2
"#,
        )
        .expect("yaml");

        let ContentRecord::GovernanceEntry(entry) =
            validate_record(CollectionKind::Governance, &raw).expect("valid")
        else {
            panic!("expected a governance entry");
        };
        assert_eq!(entry.category, GovernanceCategory::DecisionMaking);
        assert_eq!(entry.order, Some(2.0));

        let err = validate_record(CollectionKind::Governance, &RawRecord::new()).unwrap_err();
        assert_eq!(err.violations.len(), 4);
    }
}
