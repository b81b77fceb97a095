//! Multi-facet solution searches.
//!
//! Keywords within one facet are OR-ed; distinct facets are AND-ed. Facets on
//! revision fields are grouped under a single revision test, so one revision
//! has to satisfy all of them together.

use super::filter::NO_FIELDS_MESSAGE;
use super::membership::{any_keyword, in_list, value_set};
use super::predicate::{Combinator, CompareOp, Predicate, Scalar, SetMode};
use crate::models::entities::{description, revision, solution};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Facets of the portal catalog search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalSearch {
    pub name_keywords: Vec<String>,
    /// Matched against per-catalog revision descriptions.
    pub description_keywords: Vec<String>,
    pub author_keywords: Vec<String>,
    pub publisher_keywords: Vec<String>,
    pub active: Option<bool>,
    pub user_ids: Vec<String>,
    /// May hold `"null"` to include solutions without a model type.
    pub model_type_codes: Vec<String>,
    pub access_type_codes: Vec<String>,
    pub all_tags: Vec<String>,
    pub any_tags: Vec<String>,
    pub catalog_ids: Vec<String>,
}

impl PortalSearch {
    pub fn to_predicate(&self) -> Result<Predicate> {
        let mut parts = Vec::new();
        parts.extend(any_keyword(&solution::NAME, &self.name_keywords));

        let mut revision_parts = Vec::new();
        if let Some(p) = any_keyword(&description::DESCRIPTION, &self.description_keywords) {
            revision_parts.push(Predicate::related(&revision::DESCRIPTIONS, p));
        }
        revision_parts.extend(any_keyword(&revision::AUTHORS, &self.author_keywords));
        revision_parts.extend(any_keyword(&revision::PUBLISHER, &self.publisher_keywords));
        revision_parts.extend(in_list(
            &revision::ACCESS_TYPE_CODE,
            &self.access_type_codes,
        )?);
        if !revision_parts.is_empty() {
            parts.push(Predicate::related(
                &solution::REVISIONS,
                Predicate::combine(Combinator::And, revision_parts),
            ));
        }

        push_solution_facets(
            &mut parts,
            self.active,
            &self.user_ids,
            &self.model_type_codes,
            &self.all_tags,
            &self.any_tags,
            &self.catalog_ids,
        )?;

        finish(parts)
    }
}

/// Facets of the keyword-and-tag search.
///
/// Each keyword may match the solution name or a revision's description,
/// authors or publisher.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeywordTagSearch {
    pub keywords: Vec<String>,
    pub active: Option<bool>,
    pub user_ids: Vec<String>,
    pub model_type_codes: Vec<String>,
    pub all_tags: Vec<String>,
    pub any_tags: Vec<String>,
    pub catalog_ids: Vec<String>,
}

impl KeywordTagSearch {
    pub fn to_predicate(&self) -> Result<Predicate> {
        let mut parts = Vec::new();

        if let Some(name) = any_keyword(&solution::NAME, &self.keywords) {
            let mut revision_text = Vec::new();
            if let Some(p) = any_keyword(&description::DESCRIPTION, &self.keywords) {
                revision_text.push(Predicate::related(&revision::DESCRIPTIONS, p));
            }
            revision_text.extend(any_keyword(&revision::AUTHORS, &self.keywords));
            revision_text.extend(any_keyword(&revision::PUBLISHER, &self.keywords));

            parts.push(Predicate::Or(vec![
                name,
                Predicate::related(
                    &solution::REVISIONS,
                    Predicate::combine(Combinator::Or, revision_text),
                ),
            ]));
        }

        push_solution_facets(
            &mut parts,
            self.active,
            &self.user_ids,
            &self.model_type_codes,
            &self.all_tags,
            &self.any_tags,
            &self.catalog_ids,
        )?;

        finish(parts)
    }
}

/// Solutions changed after an instant, directly or through any revision.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedSinceSearch {
    pub active: bool,
    #[serde(default)]
    pub access_type_codes: Vec<String>,
    pub since: DateTime<Utc>,
}

impl ModifiedSinceSearch {
    pub fn to_predicate(&self) -> Result<Predicate> {
        let since = Scalar::Timestamp(self.since);
        let mut parts = vec![
            Predicate::Eq {
                field: &solution::ACTIVE,
                value: Scalar::Bool(self.active),
            },
            Predicate::Or(vec![
                Predicate::Compare {
                    field: &solution::MODIFIED,
                    op: CompareOp::Gt,
                    value: since.clone(),
                },
                Predicate::related(
                    &solution::REVISIONS,
                    Predicate::Compare {
                        field: &revision::MODIFIED,
                        op: CompareOp::Gt,
                        value: since,
                    },
                ),
            ]),
        ];
        if let Some(access) = in_list(&revision::ACCESS_TYPE_CODE, &self.access_type_codes)? {
            parts.push(Predicate::related(&solution::REVISIONS, access));
        }
        Ok(Predicate::And(parts))
    }
}

fn push_solution_facets(
    parts: &mut Vec<Predicate>,
    active: Option<bool>,
    user_ids: &[String],
    model_type_codes: &[String],
    all_tags: &[String],
    any_tags: &[String],
    catalog_ids: &[String],
) -> Result<()> {
    if let Some(active) = active {
        parts.push(Predicate::Eq {
            field: &solution::ACTIVE,
            value: Scalar::Bool(active),
        });
    }
    parts.extend(in_list(&solution::USER_ID, user_ids)?);
    parts.extend(in_list(&solution::MODEL_TYPE_CODE, model_type_codes)?);
    parts.extend(value_set(&solution::TAGS, all_tags, SetMode::All));
    parts.extend(value_set(&solution::TAGS, any_tags, SetMode::Any));
    parts.extend(value_set(&solution::CATALOGS, catalog_ids, SetMode::Any));
    Ok(())
}

fn finish(parts: Vec<Predicate>) -> Result<Predicate> {
    if parts.is_empty() {
        return Err(crate::Error::invalid(NO_FIELDS_MESSAGE));
    }
    Ok(Predicate::combine(Combinator::And, parts))
}
