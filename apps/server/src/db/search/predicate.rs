//! Predicate AST shared by every search builder.
//!
//! The Postgres store renders a [`Predicate`] to SQL (see `query_builder`);
//! the in-memory store evaluates it directly against JSON records with
//! [`Predicate::matches`]. Both must agree on semantics:
//!
//! - `Text` fields compare case-insensitively, `Id`/`Code` exactly
//! - a missing key and a JSON `null` are the same thing (SQL `NULL`)
//! - `Members` counts distinct matching values per record

use super::membership::parse_timestamp;
use super::schema::{FieldDef, FieldKind, Relation};
use crate::models::Record;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A typed comparison operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Bool(bool),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    /// Interpret a stored JSON value as a scalar of the given kind.
    pub fn from_stored(value: &JsonValue, kind: FieldKind) -> Option<Scalar> {
        match (kind, value) {
            (FieldKind::Text | FieldKind::Id | FieldKind::Code, JsonValue::String(s)) => {
                Some(Scalar::Text(s.clone()))
            }
            (FieldKind::Id | FieldKind::Code, JsonValue::Number(n)) => {
                Some(Scalar::Text(n.to_string()))
            }
            (FieldKind::Bool, JsonValue::Bool(b)) => Some(Scalar::Bool(*b)),
            (FieldKind::Integer, JsonValue::Number(n)) => n.as_i64().map(Scalar::Integer),
            (FieldKind::Timestamp, JsonValue::String(s)) => {
                parse_timestamp(s).map(Scalar::Timestamp)
            }
            _ => None,
        }
    }

    /// Order two scalars of the same kind; text orders case-insensitively.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Text(a), Scalar::Text(b)) => Some(a.to_lowercase().cmp(&b.to_lowercase())),
            (Scalar::Bool(a), Scalar::Bool(b)) => Some(a.cmp(b)),
            (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn equals(&self, other: &Scalar, kind: FieldKind) -> bool {
        match (self, other) {
            (Scalar::Text(a), Scalar::Text(b)) if kind == FieldKind::Text => {
                a.to_lowercase() == b.to_lowercase()
            }
            _ => self == other,
        }
    }
}

/// How the per-field tests of a filter are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl Combinator {
    /// Parse a `_j` junction value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "a" | "and" => Some(Combinator::And),
            "o" | "or" => Some(Combinator::Or),
            _ => None,
        }
    }
}

/// Set-membership mode over a value-set relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    /// Every candidate must be present.
    All,
    /// At least one candidate must be present.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Predicate {
    Eq {
        field: &'static FieldDef,
        value: Scalar,
    },
    /// Field equals one of `values`, or (when `or_null`) is null.
    OneOf {
        field: &'static FieldDef,
        values: Vec<Scalar>,
        or_null: bool,
    },
    IsNull {
        field: &'static FieldDef,
    },
    Compare {
        field: &'static FieldDef,
        op: CompareOp,
        value: Scalar,
    },
    /// Case-insensitive substring match; `keyword` is literal text.
    Contains {
        field: &'static FieldDef,
        keyword: String,
    },
    Members {
        relation: &'static Relation,
        values: Vec<String>,
        mode: SetMode,
    },
    /// Some child row of `relation` satisfies `predicate`.
    Related {
        relation: &'static Relation,
        predicate: Box<Predicate>,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Join parts with the combinator; a single part is returned as is.
    pub fn combine(combinator: Combinator, mut parts: Vec<Predicate>) -> Predicate {
        if parts.len() == 1 {
            if let Some(only) = parts.pop() {
                return only;
            }
        }
        match combinator {
            Combinator::And => Predicate::And(parts),
            Combinator::Or => Predicate::Or(parts),
        }
    }

    pub fn related(relation: &'static Relation, predicate: Predicate) -> Predicate {
        Predicate::Related {
            relation,
            predicate: Box::new(predicate),
        }
    }

    /// Whether evaluating this predicate in SQL needs a to-many relation.
    pub fn touches_relations(&self) -> bool {
        match self {
            Predicate::Members { .. } | Predicate::Related { .. } => true,
            Predicate::And(parts) | Predicate::Or(parts) => {
                parts.iter().any(Predicate::touches_relations)
            }
            _ => false,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_object(record.fields())
    }

    pub fn matches_object(&self, obj: &Map<String, JsonValue>) -> bool {
        match self {
            Predicate::Eq { field, value } => {
                stored(obj, field).is_some_and(|s| s.equals(value, field.kind))
            }
            Predicate::OneOf {
                field,
                values,
                or_null,
            } => match stored(obj, field) {
                Some(s) => values.iter().any(|v| s.equals(v, field.kind)),
                None => *or_null && is_null(obj, field),
            },
            Predicate::IsNull { field } => is_null(obj, field),
            Predicate::Compare { field, op, value } => stored(obj, field)
                .and_then(|s| s.compare(value))
                .is_some_and(|ord| op.accepts(ord)),
            Predicate::Contains { field, keyword } => match obj.get(field.name) {
                Some(JsonValue::String(s)) => {
                    s.to_lowercase().contains(&keyword.to_lowercase())
                }
                _ => false,
            },
            Predicate::Members {
                relation,
                values,
                mode,
            } => {
                let present = matching_members(obj, relation, values);
                match mode {
                    SetMode::All => present == distinct(values),
                    SetMode::Any => present > 0,
                }
            }
            Predicate::Related {
                relation,
                predicate,
            } => children(obj, relation).any(|child| predicate.matches_object(child)),
            Predicate::And(parts) => parts.iter().all(|p| p.matches_object(obj)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches_object(obj)),
        }
    }

    /// Number of rows a SQL join over the touched relations would yield for a
    /// matching object. Used to reproduce join fan-out in memory.
    pub fn join_rows(&self, obj: &Map<String, JsonValue>) -> usize {
        match self {
            Predicate::Members {
                relation, values, ..
            } => matching_members(obj, relation, values).max(1),
            Predicate::Related {
                relation,
                predicate,
            } => children(obj, relation)
                .filter(|child| predicate.matches_object(child))
                .count()
                .max(1),
            Predicate::And(parts) => parts.iter().map(|p| p.join_rows(obj)).product(),
            Predicate::Or(parts) => parts
                .iter()
                .filter(|p| p.matches_object(obj))
                .map(|p| p.join_rows(obj))
                .sum::<usize>()
                .max(1),
            _ => 1,
        }
    }
}

fn stored(obj: &Map<String, JsonValue>, field: &FieldDef) -> Option<Scalar> {
    obj.get(field.name)
        .and_then(|v| Scalar::from_stored(v, field.kind))
}

fn is_null(obj: &Map<String, JsonValue>, field: &FieldDef) -> bool {
    matches!(obj.get(field.name), None | Some(JsonValue::Null))
}

fn children<'a>(
    obj: &'a Map<String, JsonValue>,
    relation: &Relation,
) -> impl Iterator<Item = &'a Map<String, JsonValue>> {
    obj.get(relation.name)
        .and_then(JsonValue::as_array)
        .into_iter()
        .flatten()
        .filter_map(JsonValue::as_object)
}

fn distinct(values: &[String]) -> usize {
    values.iter().collect::<HashSet<_>>().len()
}

/// Count of distinct candidate values present in the object's value set.
fn matching_members(obj: &Map<String, JsonValue>, relation: &Relation, values: &[String]) -> usize {
    let held: HashSet<&str> = obj
        .get(relation.name)
        .and_then(JsonValue::as_array)
        .into_iter()
        .flatten()
        .filter_map(JsonValue::as_str)
        .collect();
    values
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .into_iter()
        .filter(|v| held.contains(v))
        .count()
}
