//! SQL query builder for entity searches.
//!
//! Builds SQL from a [`SearchQuery`], including:
//! - The filter predicate (positional `$n` binds, never inlined user text)
//! - Sorting with a guaranteed id tiebreak
//! - Scalar and full-graph JSON projections (`jsonb_build_object`)
//! - Count, bounded fetch, key fetch and graph load variants

use crate::db::search::schema::{EntitySchema, FieldKind, RelationKind};
use crate::db::traits::{SearchQuery, Window};
use chrono::{DateTime, Utc};

mod bind;
mod clauses;

use clauses::{build_predicate_clause, Aliases};

/// Alias of the searched entity's table in every generated query.
const ROOT_ALIAS: &str = "t";

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    TextArray(Vec<String>),
    Bool(bool),
    BoolArray(Vec<bool>),
    BigInt(i64),
    BigIntArray(Vec<i64>),
    Timestamp(DateTime<Utc>),
    TimestampArray(Vec<DateTime<Utc>>),
}

pub struct QueryBuilder<'a> {
    query: &'a SearchQuery,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(query: &'a SearchQuery) -> Self {
        Self { query }
    }

    fn schema(&self) -> &'static EntitySchema {
        self.query.schema
    }

    fn push_where(&self, sql: &mut String, bind_params: &mut Vec<BindValue>) {
        let mut aliases = Aliases::default();
        let clause =
            build_predicate_clause(&self.query.predicate, ROOT_ALIAS, bind_params, &mut aliases);
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }

    /// Bounded page fetch of scalar projections.
    pub fn build_sql(&self, window: Window) -> (String, Vec<BindValue>) {
        let schema = self.schema();
        let mut sql = format!(
            "SELECT {} AS record FROM {} {}",
            scalar_projection(schema, ROOT_ALIAS),
            schema.table,
            ROOT_ALIAS
        );
        let mut bind_params = Vec::new();

        self.push_where(&mut sql, &mut bind_params);
        self.push_order_by(&mut sql);

        sql.push_str(&format!(" LIMIT {} OFFSET {}", window.limit, window.offset));

        (sql, bind_params)
    }

    /// Total match count; distinct ids when the predicate reaches into relations.
    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let schema = self.schema();
        let counted = if self.query.predicate.touches_relations() {
            format!("COUNT(DISTINCT {}.{})", ROOT_ALIAS, schema.id.column)
        } else {
            "COUNT(*)".to_string()
        };
        let mut sql = format!("SELECT {} FROM {} {}", counted, schema.table, ROOT_ALIAS);
        let mut bind_params = Vec::new();

        self.push_where(&mut sql, &mut bind_params);

        (sql, bind_params)
    }

    /// Every match, scalar projection only, no ordering or limit.
    pub fn build_keys_sql(&self) -> (String, Vec<BindValue>) {
        let schema = self.schema();
        let mut sql = format!(
            "SELECT {} AS record FROM {} {}",
            scalar_projection(schema, ROOT_ALIAS),
            schema.table,
            ROOT_ALIAS
        );
        let mut bind_params = Vec::new();

        self.push_where(&mut sql, &mut bind_params);

        (sql, bind_params)
    }

    fn push_order_by(&self, sql: &mut String) {
        let sort = self.query.sort.clone().with_tiebreak(self.schema());
        let order_by: Vec<String> = sort
            .keys()
            .iter()
            .map(|key| {
                let dir = if key.is_ascending() { "ASC" } else { "DESC" };
                let col = format!("{}.{}", ROOT_ALIAS, key.field.column);
                if key.field.kind == FieldKind::Text {
                    format!("lower({col}) {dir} NULLS LAST")
                } else {
                    format!("{col} {dir} NULLS LAST")
                }
            })
            .collect();

        sql.push_str(" ORDER BY ");
        sql.push_str(&order_by.join(", "));
    }
}

/// Load full object graphs (scalars plus every relation, recursively) by id.
///
/// Ids that cannot be bound for the schema's id type are skipped.
pub fn build_graph_sql(schema: &EntitySchema, ids: &[String]) -> (String, Vec<BindValue>) {
    let mut aliases = Aliases::default();
    let projection = graph_projection(schema, ROOT_ALIAS, &mut aliases);
    let bind = match schema.id.kind {
        FieldKind::Integer => {
            BindValue::BigIntArray(ids.iter().filter_map(|id| id.parse().ok()).collect())
        }
        _ => BindValue::TextArray(ids.to_vec()),
    };
    let sql = format!(
        "SELECT {projection} AS record FROM {table} {ROOT_ALIAS} WHERE {ROOT_ALIAS}.{id} = ANY($1)",
        table = schema.table,
        id = schema.id.column,
    );
    (sql, vec![bind])
}

fn scalar_pairs(schema: &EntitySchema, alias: &str) -> Vec<String> {
    schema
        .fields
        .iter()
        .map(|f| format!("'{}', {}.{}", f.name, alias, f.column))
        .collect()
}

fn scalar_projection(schema: &EntitySchema, alias: &str) -> String {
    format!("jsonb_build_object({})", scalar_pairs(schema, alias).join(", "))
}

fn graph_projection(schema: &EntitySchema, alias: &str, aliases: &mut Aliases) -> String {
    let mut pairs = scalar_pairs(schema, alias);
    for relation in schema.relations {
        let c = aliases.next();
        let (item, order) = match relation.kind {
            RelationKind::ValueSet { value_column } => (
                format!("{c}.{value_column}"),
                format!("{c}.{value_column}"),
            ),
            RelationKind::Rows { schema: child } => (
                graph_projection(child, &c, aliases),
                format!("{c}.{}", child.id.column),
            ),
        };
        pairs.push(format!(
            "'{name}', COALESCE((SELECT jsonb_agg({item} ORDER BY {order}) FROM {table} {c} WHERE {c}.{fk} = {alias}.{pk}), '[]'::jsonb)",
            name = relation.name,
            table = relation.table,
            fk = relation.foreign_key,
            pk = relation.parent_key,
        ));
    }
    format!("jsonb_build_object({})", pairs.join(", "))
}
