//! Sort specification resolution and in-memory ordering.
//!
//! Both back ends order the same way: text fields by their lower-cased value,
//! nulls last regardless of direction, then the entity id ascending.

use super::params::{Direction, SortParam};
use super::predicate::Scalar;
use super::schema::{EntitySchema, FieldDef, FieldKind};
use crate::Result;
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub field: &'static FieldDef,
    pub direction: Direction,
}

impl SortKey {
    pub fn is_ascending(&self) -> bool {
        self.direction == Direction::Asc
    }
}

/// Ordered sort keys bound to schema fields.
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Bind caller sort keys to the schema; unknown fields are rejected.
    pub fn resolve(schema: &EntitySchema, params: &[SortParam]) -> Result<Self> {
        let mut keys: Vec<SortKey> = Vec::with_capacity(params.len() + 1);
        for param in params {
            let field = schema.field(&param.field).ok_or_else(|| {
                crate::Error::invalid(format!(
                    "Unknown sort field for {}: {}",
                    schema.name, param.field
                ))
            })?;
            // A repeated key cannot change the order.
            if keys.iter().any(|k| std::ptr::eq(k.field, field)) {
                continue;
            }
            keys.push(SortKey {
                field,
                direction: param.direction,
            });
        }
        Ok(Self { keys })
    }

    /// Append the id ascending unless it is already a sort key.
    pub fn with_tiebreak(mut self, schema: &EntitySchema) -> Self {
        if !self.keys.iter().any(|k| std::ptr::eq(k.field, schema.id)) {
            self.keys.push(SortKey {
                field: schema.id,
                direction: Direction::Asc,
            });
        }
        self
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare(&self, a: &Map<String, JsonValue>, b: &Map<String, JsonValue>) -> Ordering {
        for key in &self.keys {
            let left = a.get(key.field.name).and_then(|v| Scalar::from_stored(v, key.field.kind));
            let right = b.get(key.field.name).and_then(|v| Scalar::from_stored(v, key.field.kind));
            let ordering = match (left, right) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(l), Some(r)) => {
                    let ord = compare_values(key.field.kind, &l, &r);
                    if key.is_ascending() {
                        ord
                    } else {
                        ord.reverse()
                    }
                }
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn compare_values(kind: FieldKind, left: &Scalar, right: &Scalar) -> Ordering {
    match (kind, left, right) {
        (FieldKind::Id | FieldKind::Code, Scalar::Text(l), Scalar::Text(r)) => l.cmp(r),
        _ => left.compare(right).unwrap_or(Ordering::Equal),
    }
}
