use super::bind::{push_scalar, push_scalar_array, push_text, push_text_array};
use super::BindValue;
use crate::db::search::escape::contains_pattern;
use crate::db::search::predicate::{Predicate, SetMode};
use crate::db::search::schema::{FieldDef, FieldKind, Relation, RelationKind};

/// Table alias source for correlated subqueries (`c1`, `c2`, ...).
#[derive(Debug, Default)]
pub(super) struct Aliases(usize);

impl Aliases {
    pub(super) fn next(&mut self) -> String {
        self.0 += 1;
        format!("c{}", self.0)
    }
}

fn column(alias: &str, field: &FieldDef) -> String {
    format!("{}.{}", alias, field.column)
}

fn compared_column(alias: &str, field: &FieldDef) -> String {
    if field.kind == FieldKind::Text {
        format!("lower({})", column(alias, field))
    } else {
        column(alias, field)
    }
}

fn join_parts(mut parts: Vec<String>, sep: &str, empty: &str) -> String {
    match parts.len() {
        0 => empty.to_string(),
        1 => parts.remove(0),
        _ => format!("({})", parts.join(sep)),
    }
}

/// Render a predicate against the row aliased `alias`.
///
/// To-many relations are only reached through correlated subqueries, so the
/// enclosing query keeps one row per entity.
pub(super) fn build_predicate_clause(
    predicate: &Predicate,
    alias: &str,
    bind_params: &mut Vec<BindValue>,
    aliases: &mut Aliases,
) -> String {
    match predicate {
        Predicate::Eq { field, value } => {
            let idx = push_scalar(bind_params, field.kind, value);
            format!("{} = ${}", compared_column(alias, field), idx)
        }
        Predicate::OneOf {
            field,
            values,
            or_null,
        } => {
            let null_test = format!("{} IS NULL", column(alias, field));
            if values.is_empty() {
                return if *or_null {
                    null_test
                } else {
                    "FALSE".to_string()
                };
            }
            let idx = push_scalar_array(bind_params, field.kind, values);
            let any = format!("{} = ANY(${})", compared_column(alias, field), idx);
            if *or_null {
                format!("({} OR {})", any, null_test)
            } else {
                any
            }
        }
        Predicate::IsNull { field } => format!("{} IS NULL", column(alias, field)),
        Predicate::Compare { field, op, value } => {
            let idx = push_scalar(bind_params, field.kind, value);
            format!("{} {} ${}", column(alias, field), op.as_sql(), idx)
        }
        Predicate::Contains { field, keyword } => {
            let idx = push_text(bind_params, contains_pattern(keyword));
            format!("{} ILIKE ${} ESCAPE E'\\\\'", column(alias, field), idx)
        }
        Predicate::Members {
            relation,
            values,
            mode,
        } => build_members_clause(relation, values, *mode, alias, bind_params, aliases),
        Predicate::Related {
            relation,
            predicate,
        } => {
            if !matches!(relation.kind, RelationKind::Rows { .. }) {
                return "FALSE".to_string();
            }
            let c = aliases.next();
            let inner = build_predicate_clause(predicate, &c, bind_params, aliases);
            format!(
                "EXISTS (SELECT 1 FROM {table} {c} WHERE {c}.{fk} = {alias}.{pk} AND {inner})",
                table = relation.table,
                fk = relation.foreign_key,
                pk = relation.parent_key,
            )
        }
        Predicate::And(parts) => {
            let rendered = parts
                .iter()
                .map(|p| build_predicate_clause(p, alias, bind_params, aliases))
                .collect();
            join_parts(rendered, " AND ", "TRUE")
        }
        Predicate::Or(parts) => {
            let rendered = parts
                .iter()
                .map(|p| build_predicate_clause(p, alias, bind_params, aliases))
                .collect();
            join_parts(rendered, " OR ", "FALSE")
        }
    }
}

/// Distinct-count subquery: equal to |S| for ALL-of-set, positive for ANY-of-set.
fn build_members_clause(
    relation: &Relation,
    values: &[String],
    mode: SetMode,
    alias: &str,
    bind_params: &mut Vec<BindValue>,
    aliases: &mut Aliases,
) -> String {
    let Some(value_column) = relation.value_column() else {
        return "FALSE".to_string();
    };
    let mut distinct: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        if !distinct.contains(v) {
            distinct.push(v.clone());
        }
    }
    let wanted = distinct.len();
    let c = aliases.next();
    let idx = push_text_array(bind_params, distinct);
    let count = format!(
        "(SELECT COUNT(DISTINCT {c}.{vc}) FROM {table} {c} WHERE {c}.{fk} = {alias}.{pk} AND {c}.{vc} = ANY(${idx}))",
        vc = value_column,
        table = relation.table,
        fk = relation.foreign_key,
        pk = relation.parent_key,
    );
    match mode {
        SetMode::All => format!("{} = {}", count, wanted),
        SetMode::Any => format!("{} > 0", count),
    }
}
