//! Error types for the iTowns core library.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frontmatter could not be split or parsed.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Content record failed its collection schema.
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A single failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field name as written in frontmatter (e.g. `publishDate`).
    pub field: String,

    /// Human readable constraint that was not met.
    pub constraint: String,

    /// The offending value, rendered for display. `None` when the field is missing.
    pub value: Option<String>,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        constraint: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            value,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {} (got {value})", self.field, self.constraint),
            None => write!(f, "{}: {}", self.field, self.constraint),
        }
    }
}

/// Every violation found while validating one record against its schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    /// Source file, when the record came from disk.
    pub path: Option<PathBuf>,

    /// Collection the record was validated against.
    pub collection: String,

    /// All failed constraints, in schema field order.
    pub violations: Vec<Violation>,
}

impl SchemaValidationError {
    pub fn new(collection: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            path: None,
            collection: collection.into(),
            violations,
        }
    }

    /// Attach the source file of the offending record.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Whether a violation was reported for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} entry", self.collection)?;
        if let Some(path) = &self.path {
            write!(f, " in {}", path.display())?;
        }
        write!(f, " ({} violation(s))", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}
