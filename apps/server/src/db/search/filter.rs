//! Generic per-entity filter builder.

use super::membership::Criterion;
use super::params::FilterCriteria;
use super::predicate::Predicate;
use super::schema::EntitySchema;
use crate::Result;

pub const NO_FIELDS_MESSAGE: &str = "at least one search field required";

/// Build one predicate from sparse criteria: one equality (or IN-list) test
/// per supplied field, joined by the criteria's combinator.
///
/// Unknown field names are rejected together before any value is checked.
pub fn build_filter(schema: &EntitySchema, criteria: &FilterCriteria) -> Result<Predicate> {
    let unknown: Vec<&str> = criteria
        .fields
        .iter()
        .map(|(name, _)| name.as_str())
        .filter(|name| schema.field(name).is_none())
        .collect();
    if !unknown.is_empty() {
        return Err(crate::Error::invalid(format!(
            "Unknown search field(s) for {}: {} (allowed: {})",
            schema.name,
            unknown.join(", "),
            schema.field_names().join(", ")
        )));
    }

    let mut parts = Vec::with_capacity(criteria.fields.len());
    for (name, raw) in &criteria.fields {
        let Some(field) = schema.field(name) else {
            continue;
        };
        if let Some(criterion) = Criterion::parse(field, raw)? {
            parts.push(criterion.into_predicate(field));
        }
    }

    if parts.is_empty() {
        return Err(crate::Error::invalid(NO_FIELDS_MESSAGE));
    }

    Ok(Predicate::combine(criteria.combinator, parts))
}
