//! Core traits for search storage backends

use crate::db::search::predicate::Predicate;
use crate::db::search::schema::EntitySchema;
use crate::db::search::sort::SortSpec;
use crate::models::Record;
use crate::Result;
use async_trait::async_trait;

/// A fully built, validated search over one entity.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub schema: &'static EntitySchema,
    pub predicate: Predicate,
    pub sort: SortSpec,
}

/// Row window of a bounded fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

/// Read-only query execution over a store of records.
///
/// Implementations never retry; failures are returned as is.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Number of distinct entities matching the predicate.
    async fn count(&self, query: &SearchQuery) -> Result<i64>;

    /// Matching entities in sort order, restricted to `window`.
    ///
    /// Scalar fields only.
    async fn fetch(&self, query: &SearchQuery, window: Window) -> Result<Vec<Record>>;

    /// Every matching entity, scalar fields only, in no particular order.
    ///
    /// The result may hold several rows for one entity when the store
    /// evaluates relations by joining; callers coalesce on the id.
    async fn fetch_keys(&self, query: &SearchQuery) -> Result<Vec<Record>>;

    /// Full object graphs (scalars and every relation) for the given ids.
    ///
    /// Unknown ids are skipped; the order of the result is unspecified.
    async fn load_graph(&self, schema: &'static EntitySchema, ids: &[String])
        -> Result<Vec<Record>>;
}
