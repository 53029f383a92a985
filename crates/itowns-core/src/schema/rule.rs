//! Declarative field rules.
//!
//! A [`Schema`] is plain data: a named list of [`FieldRule`]s. The rules are
//! interpreted by [`super::validate`], never by per-collection code.

use serde_yaml::Value;

/// Textual format checks applied on top of length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// Any string.
    Any,
    /// An absolute URL.
    Url,
}

/// Type and bounds accepted for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string, with optional character bounds (inclusive).
    Text {
        min: Option<usize>,
        max: Option<usize>,
        format: TextFormat,
    },
    /// A date, coerced from a timestamp string, a plain date or epoch milliseconds.
    Date,
    /// `true` or `false`.
    Boolean,
    /// Any number.
    Number,
    /// A string drawn from a closed set.
    Enum(&'static [&'static str]),
    /// A list of strings with inclusive item count bounds.
    TextList {
        min_items: usize,
        max_items: usize,
        lowercase: bool,
    },
}

impl FieldKind {
    /// Unbounded string.
    pub const fn text() -> Self {
        Self::Text {
            min: None,
            max: None,
            format: TextFormat::Any,
        }
    }

    /// String of `min..=max` characters.
    pub const fn text_between(min: usize, max: usize) -> Self {
        Self::Text {
            min: Some(min),
            max: Some(max),
            format: TextFormat::Any,
        }
    }

    /// String of at most `max` characters.
    pub const fn text_max(max: usize) -> Self {
        Self::Text {
            min: None,
            max: Some(max),
            format: TextFormat::Any,
        }
    }

    /// Absolute URL.
    pub const fn url() -> Self {
        Self::Text {
            min: None,
            max: None,
            format: TextFormat::Url,
        }
    }

    /// Short name used in type mismatch messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Text { .. } | Self::Enum(_) => "a string",
            Self::Date => "a date",
            Self::Boolean => "a boolean",
            Self::Number => "a number",
            Self::TextList { .. } => "a list of strings",
        }
    }
}

/// Default value inserted when a defaulted field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(b),
        }
    }
}

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Default(DefaultValue),
}

/// Constraints on one frontmatter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Key as written in frontmatter.
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
        }
    }

    /// Boolean flag that defaults to `value` when absent.
    pub const fn flag(name: &'static str, value: bool) -> Self {
        Self {
            name,
            kind: FieldKind::Boolean,
            presence: Presence::Default(DefaultValue::Bool(value)),
        }
    }
}

/// The accepted shape of one content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Collection name, used in error reports.
    pub name: &'static str,
    pub fields: &'static [FieldRule],
}

impl Schema {
    /// Look up the rule for `name`.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}
