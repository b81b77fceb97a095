//! Value coercion and set-membership predicates.
//!
//! A raw criterion is a JSON scalar or array. Inside an array the literal
//! token `"null"` (or a JSON `null`) asks for records whose field is null as
//! well; on its own a scalar `"null"` is an ordinary value.

use super::predicate::{Predicate, Scalar, SetMode};
use super::schema::{FieldDef, FieldKind, Relation};
use crate::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value as JsonValue;

pub const NULL_SENTINEL: &str = "null";

/// Typed form of one field's filter input.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Value(Scalar),
    OneOf { values: Vec<Scalar>, or_null: bool },
    IsNull,
}

impl Criterion {
    /// Parse a raw value for `field`. Blank input yields `Ok(None)`.
    pub fn parse(field: &FieldDef, raw: &JsonValue) -> Result<Option<Criterion>> {
        match raw {
            JsonValue::Null => Ok(None),
            JsonValue::String(s) if s.trim().is_empty() => Ok(None),
            JsonValue::Array(items) => {
                let mut values = Vec::new();
                let mut or_null = false;
                for item in items {
                    match item {
                        JsonValue::Null => or_null = true,
                        JsonValue::String(s) if s.trim() == NULL_SENTINEL => or_null = true,
                        JsonValue::String(s) if s.trim().is_empty() => {}
                        other => {
                            let value = coerce(field, other)?;
                            if !values.contains(&value) {
                                values.push(value);
                            }
                        }
                    }
                }
                Ok(match (values.len(), or_null) {
                    (0, false) => None,
                    (0, true) => Some(Criterion::IsNull),
                    (1, false) => values.pop().map(Criterion::Value),
                    _ => Some(Criterion::OneOf { values, or_null }),
                })
            }
            other => coerce(field, other).map(|v| Some(Criterion::Value(v))),
        }
    }

    pub fn into_predicate(self, field: &'static FieldDef) -> Predicate {
        match self {
            Criterion::Value(value) => Predicate::Eq { field, value },
            Criterion::OneOf { values, or_null } => Predicate::OneOf {
                field,
                values,
                or_null,
            },
            Criterion::IsNull => Predicate::IsNull { field },
        }
    }
}

/// Convert a raw JSON scalar to the field's type.
///
/// Query strings carry everything as text, so numeric and boolean strings
/// are accepted for numeric and boolean fields.
pub fn coerce(field: &FieldDef, raw: &JsonValue) -> Result<Scalar> {
    let coerced = match (field.kind, raw) {
        (FieldKind::Text | FieldKind::Id | FieldKind::Code, JsonValue::String(s)) => {
            Some(Scalar::Text(s.trim().to_string()))
        }
        (FieldKind::Text | FieldKind::Id | FieldKind::Code, JsonValue::Number(n)) => {
            Some(Scalar::Text(n.to_string()))
        }
        (FieldKind::Bool, JsonValue::Bool(b)) => Some(Scalar::Bool(*b)),
        (FieldKind::Bool, JsonValue::String(s)) => match s.trim().to_ascii_lowercase().as_str()
        {
            "true" => Some(Scalar::Bool(true)),
            "false" => Some(Scalar::Bool(false)),
            _ => None,
        },
        (FieldKind::Integer, JsonValue::Number(n)) => n.as_i64().map(Scalar::Integer),
        (FieldKind::Integer, JsonValue::String(s)) => s.trim().parse().ok().map(Scalar::Integer),
        (FieldKind::Timestamp, JsonValue::String(s)) => parse_timestamp(s).map(Scalar::Timestamp),
        (FieldKind::Timestamp, JsonValue::Number(n)) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(Scalar::Timestamp),
        _ => None,
    };

    coerced.ok_or_else(|| {
        crate::Error::invalid(format!(
            "Invalid value for field '{}': expected {}, got {}",
            field.name,
            field.kind.as_str(),
            raw
        ))
    })
}

/// RFC 3339, or an offset-less ISO timestamp (`timestamp without time zone`
/// as rendered by `jsonb_build_object`) read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        })
        .ok()
}

/// IN-list over string candidates, honouring the null sentinel.
pub fn in_list(field: &'static FieldDef, candidates: &[String]) -> Result<Option<Predicate>> {
    let raw = JsonValue::Array(
        candidates
            .iter()
            .map(|c| JsonValue::String(c.clone()))
            .collect(),
    );
    Ok(Criterion::parse(field, &raw)?.map(|c| c.into_predicate(field)))
}

/// Case-insensitive containment of any keyword (keywords are OR-ed).
pub fn any_keyword(field: &'static FieldDef, keywords: &[String]) -> Option<Predicate> {
    let parts: Vec<Predicate> = clean(keywords)
        .into_iter()
        .map(|keyword| Predicate::Contains { field, keyword })
        .collect();
    match parts.len() {
        0 => None,
        _ => Some(Predicate::combine(super::predicate::Combinator::Or, parts)),
    }
}

/// ALL-of-set or ANY-of-set over a value-set relation.
pub fn value_set(relation: &'static Relation, values: &[String], mode: SetMode) -> Option<Predicate> {
    let values = clean(values);
    if values.is_empty() {
        return None;
    }
    Some(Predicate::Members {
        relation,
        values,
        mode,
    })
}

/// Trim, drop blanks and duplicates, keep first-seen order.
pub fn clean(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|seen| seen == v) {
            out.push(v.to_string());
        }
    }
    out
}
