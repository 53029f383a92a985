//! Generic rule-table validation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use tracing::trace;

use super::rule::{FieldKind, FieldRule, Presence, Schema, TextFormat};
use crate::{
    error::{SchemaValidationError, Violation},
    frontmatter::RawRecord,
};

/// Check `raw` against every rule of `schema`.
///
/// On success the returned mapping holds only declared fields, with defaults
/// filled in, dates rewritten as RFC 3339 timestamps and list items
/// normalised. On failure every violated constraint is reported, in rule
/// order followed by undeclared fields in input order.
pub fn validate(schema: &Schema, raw: &RawRecord) -> Result<Mapping, SchemaValidationError> {
    let mut violations = Vec::new();
    let mut normalized = Mapping::new();

    for rule in schema.fields {
        let Some(value) = raw.get(rule.name) else {
            match rule.presence {
                Presence::Required => {
                    violations.push(Violation::new(rule.name, "is required", None));
                }
                Presence::Optional => {}
                Presence::Default(default) => {
                    normalized.insert(Value::from(rule.name), default.to_value());
                }
            }
            continue;
        };

        let before = violations.len();
        let checked = check_field(rule, value, &mut violations);
        if violations.len() == before
            && let Some(checked) = checked
        {
            normalized.insert(Value::from(rule.name), checked);
        }
    }

    for (key, value) in raw {
        let declared = key.as_str().is_some_and(|k| schema.field(k).is_some());
        if !declared {
            let field = key
                .as_str()
                .map_or_else(|| display_value(key), str::to_string);
            violations.push(Violation::new(
                field,
                "is not a known field",
                Some(display_value(value)),
            ));
        }
    }

    if violations.is_empty() {
        trace!(schema = schema.name, fields = normalized.len(), "record valid");
        Ok(normalized)
    } else {
        Err(SchemaValidationError::new(schema.name, violations))
    }
}

/// Validate `raw` and deserialize the normalised mapping into `T`.
pub fn validate_as<T: DeserializeOwned>(
    schema: &Schema,
    raw: &RawRecord,
) -> Result<T, SchemaValidationError> {
    let normalized = validate(schema, raw)?;
    serde_yaml::from_value(Value::Mapping(normalized)).map_err(|e| {
        SchemaValidationError::new(
            schema.name,
            vec![Violation::new("(record)", e.to_string(), None)],
        )
    })
}

/// Check one present value, pushing violations and returning its normalised form.
fn check_field(rule: &FieldRule, value: &Value, violations: &mut Vec<Violation>) -> Option<Value> {
    let name = rule.name;
    let mismatch = |violations: &mut Vec<Violation>| {
        violations.push(Violation::new(
            name,
            format!("must be {}", rule.kind.expected()),
            Some(display_value(value)),
        ));
        None
    };

    match rule.kind {
        FieldKind::Text { min, max, format } => {
            let Some(s) = value.as_str() else {
                return mismatch(violations);
            };
            check_length(name, s, min, max, violations);
            if format == TextFormat::Url && url::Url::parse(s).is_err() {
                violations.push(Violation::new(
                    name,
                    "must be a valid URL",
                    Some(display_value(value)),
                ));
            }
            Some(Value::from(s))
        }
        FieldKind::Date => match coerce_date(value) {
            Some(date) => Some(Value::from(
                date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
            None => {
                violations.push(Violation::new(
                    name,
                    "must be a valid date",
                    Some(display_value(value)),
                ));
                None
            }
        },
        FieldKind::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            _ => mismatch(violations),
        },
        FieldKind::Number => match value {
            Value::Number(n) if n.as_f64().is_some_and(f64::is_finite) => Some(value.clone()),
            Value::Number(_) => {
                violations.push(Violation::new(
                    name,
                    "must be a finite number",
                    Some(display_value(value)),
                ));
                None
            }
            _ => mismatch(violations),
        },
        FieldKind::Enum(allowed) => {
            let Some(s) = value.as_str() else {
                return mismatch(violations);
            };
            if allowed.contains(&s) {
                Some(Value::from(s))
            } else {
                violations.push(Violation::new(
                    name,
                    format!("must be one of: {}", allowed.join(", ")),
                    Some(display_value(value)),
                ));
                None
            }
        }
        FieldKind::TextList {
            min_items,
            max_items,
            lowercase,
        } => {
            let Some(items) = value.as_sequence() else {
                return mismatch(violations);
            };

            if items.len() < min_items {
                violations.push(Violation::new(
                    name,
                    format!("must contain at least {min_items} item(s)"),
                    Some(display_value(value)),
                ));
            }
            if items.len() > max_items {
                violations.push(Violation::new(
                    name,
                    format!("must contain at most {max_items} item(s)"),
                    Some(display_value(value)),
                ));
            }

            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(s) if lowercase => out.push(Value::from(s.to_lowercase())),
                    Some(s) => out.push(Value::from(s)),
                    None => violations.push(Violation::new(
                        format!("{name}[{index}]"),
                        "must be a string",
                        Some(display_value(item)),
                    )),
                }
            }
            Some(Value::Sequence(out))
        }
    }
}

fn check_length(
    name: &str,
    s: &str,
    min: Option<usize>,
    max: Option<usize>,
    violations: &mut Vec<Violation>,
) {
    let len = s.chars().count();

    if let Some(min) = min
        && len < min
    {
        violations.push(Violation::new(
            name,
            format!("must be at least {min} characters"),
            Some(format!("{len} characters")),
        ));
    }

    if let Some(max) = max
        && len > max
    {
        violations.push(Violation::new(
            name,
            format!("must be at most {max} characters"),
            Some(format!("{len} characters")),
        ));
    }
}

/// Coerce a raw value into a UTC timestamp.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` (midnight UTC), naive
/// `YYYY-MM-DD[T ]HH:MM:SS` (UTC) and integer milliseconds since the epoch.
pub fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::Tagged(tagged) => coerce_date(&tagged.value),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Render a value compactly for error reports.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(items) => {
            let items: Vec<_> = items.iter().map(display_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", display_value(k), display_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, display_value(&tagged.value)),
    }
}
