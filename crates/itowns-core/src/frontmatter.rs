//! Frontmatter splitting and raw record parsing for content files.
//!
//! Frontmatter is parsed into an untyped [`RawRecord`]; turning that into a
//! typed record is the job of [`crate::schema`].

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, Result};

/// Untyped frontmatter key/value metadata, as written by the author.
pub type RawRecord = Mapping;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    // Both delimiters must sit on their own line
    let rest = &content[delimiter.len()..];
    let after_first = match rest.split_once('\n') {
        Some((line, tail)) if line.trim().is_empty() => tail,
        _ => return None,
    };

    let mut offset = 0;
    for line in after_first.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = after_first[..offset].trim();
            let body = after_first[offset + line.len()..].trim_start();
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse frontmatter into a raw record, returning it with the remaining body.
///
/// Content without frontmatter yields an empty record, which every
/// collection schema rejects.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(RawRecord, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((RawRecord::new(), content.to_string()));
    };

    let record = match format {
        FrontmatterFormat::Yaml => parse_yaml(fm_str, path)?,
        FrontmatterFormat::Toml => parse_toml(fm_str, path)?,
    };

    Ok((record, body.to_string()))
}

fn parse_yaml(source: &str, path: &Path) -> Result<RawRecord> {
    if source.is_empty() {
        return Ok(RawRecord::new());
    }

    match serde_yaml::from_str::<Value>(source) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(RawRecord::new()),
        Ok(_) => Err(CoreError::frontmatter(
            path,
            "frontmatter must be a key/value mapping",
        )),
        Err(e) => Err(CoreError::frontmatter(path, e.to_string())),
    }
}

fn parse_toml(source: &str, path: &Path) -> Result<RawRecord> {
    let table: toml::Table =
        toml::from_str(source).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    Ok(table
        .into_iter()
        .map(|(key, value)| (Value::String(key), toml_to_yaml(value)))
        .collect())
}

/// Convert a TOML value into the YAML value model used for raw records.
///
/// TOML datetimes become strings so date coercion treats both formats alike.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(key, value)| (Value::String(key), toml_to_yaml(value)))
                .collect(),
        ),
    }
}
