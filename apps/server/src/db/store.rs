//! PostgreSQL implementation of [`RecordStore`].

use crate::config::DatabaseConfig;
use crate::db::search::query_builder::{build_graph_sql, BindValue, QueryBuilder};
use crate::db::search::schema::EntitySchema;
use crate::db::traits::{RecordStore, SearchQuery, Window};
use crate::models::Record;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::{Executor, PgPool, Postgres};
use std::time::Duration;

#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily connecting pool from configuration.
    ///
    /// Connections are opened on first use, so startup does not wait on the
    /// database.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        let statement_timeout = config.statement_timeout_seconds;
        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min_size)
            .max_connections(config.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if statement_timeout > 0 {
                        let sql = format!("SET statement_timeout = {}", statement_timeout * 1000);
                        conn.execute(sql.as_str()).await?;
                    }
                    Ok(())
                })
            })
            .connect_lazy(&config.url)?;
        Ok(Self::new(pool))
    }

    async fn fetch_records(&self, sql: &str, bind_values: Vec<BindValue>) -> Result<Vec<Record>> {
        let mut query = sqlx::query_scalar::<_, JsonValue>(sql);
        for value in bind_values {
            query = bind(query, value);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        rows.into_iter()
            .map(|value| {
                Record::from_value(value).ok_or_else(|| {
                    crate::Error::Internal("Projection did not produce a JSON object".to_string())
                })
            })
            .collect()
    }
}

type ScalarQuery<'q, O> = sqlx::query::QueryScalar<'q, Postgres, O, PgArguments>;

fn bind<'q, O>(query: ScalarQuery<'q, O>, value: BindValue) -> ScalarQuery<'q, O> {
    match value {
        BindValue::Text(v) => query.bind(v),
        BindValue::TextArray(vs) => query.bind(vs),
        BindValue::Bool(v) => query.bind(v),
        BindValue::BoolArray(vs) => query.bind(vs),
        BindValue::BigInt(v) => query.bind(v),
        BindValue::BigIntArray(vs) => query.bind(vs),
        BindValue::Timestamp(v) => query.bind(v),
        BindValue::TimestampArray(vs) => query.bind(vs),
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn count(&self, query: &SearchQuery) -> Result<i64> {
        let (sql, bind_values) = QueryBuilder::new(query).build_count_sql();

        let mut count_query = sqlx::query_scalar::<_, i64>(&sql);
        for value in bind_values {
            count_query = bind(count_query, value);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(crate::Error::Database)?;

        Ok(total)
    }

    async fn fetch(&self, query: &SearchQuery, window: Window) -> Result<Vec<Record>> {
        let (sql, bind_values) = QueryBuilder::new(query).build_sql(window);
        self.fetch_records(&sql, bind_values).await
    }

    async fn fetch_keys(&self, query: &SearchQuery) -> Result<Vec<Record>> {
        let (sql, bind_values) = QueryBuilder::new(query).build_keys_sql();
        self.fetch_records(&sql, bind_values).await
    }

    async fn load_graph(
        &self,
        schema: &'static EntitySchema,
        ids: &[String],
    ) -> Result<Vec<Record>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let (sql, bind_values) = build_graph_sql(schema, ids);
        self.fetch_records(&sql, bind_values).await
    }
}
