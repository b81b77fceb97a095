//! In-process [`RecordStore`] holding full object graphs as JSON.
//!
//! Predicates are evaluated with [`Predicate::matches`](crate::db::search::predicate::Predicate::matches),
//! the same semantics the SQL renderer encodes. `fetch_keys` reproduces the
//! duplicate rows a join-based store would return for relation filters, so the
//! coalescing pager is exercised against realistic input.

use crate::db::search::schema::EntitySchema;
use crate::db::traits::{RecordStore, SearchQuery, Window};
use crate::models::Record;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: RwLock<HashMap<&'static str, Vec<Record>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace (by id) a record with its nested relations.
    pub fn insert(&self, schema: &'static EntitySchema, record: Record) -> Result<()> {
        let key = record.key(schema).ok_or_else(|| {
            crate::Error::invalid(format!("{} record has no {}", schema.name, schema.id.name))
        })?;
        let mut tables = self
            .tables
            .write()
            .map_err(|_| crate::Error::Internal("memory store lock poisoned".to_string()))?;
        let rows = tables.entry(schema.table).or_default();
        match rows
            .iter_mut()
            .find(|r| r.key(schema).as_deref() == Some(key.as_str()))
        {
            Some(existing) => *existing = record,
            None => rows.push(record),
        }
        Ok(())
    }

    pub fn len(&self, schema: &EntitySchema) -> usize {
        self.tables
            .read()
            .map(|t| t.get(schema.table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn matching(&self, query: &SearchQuery) -> Result<Vec<Record>> {
        let tables = self
            .tables
            .read()
            .map_err(|_| crate::Error::Internal("memory store lock poisoned".to_string()))?;
        Ok(tables
            .get(query.schema.table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| query.predicate.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn count(&self, query: &SearchQuery) -> Result<i64> {
        Ok(self.matching(query)?.len() as i64)
    }

    async fn fetch(&self, query: &SearchQuery, window: Window) -> Result<Vec<Record>> {
        let sort = query.sort.clone().with_tiebreak(query.schema);
        let mut rows = self.matching(query)?;
        rows.sort_by(|a, b| sort.compare(a.fields(), b.fields()));
        Ok(rows
            .into_iter()
            .skip(window.offset)
            .take(window.limit)
            .map(|r| r.project(query.schema))
            .collect())
    }

    async fn fetch_keys(&self, query: &SearchQuery) -> Result<Vec<Record>> {
        let mut out = Vec::new();
        for record in self.matching(query)? {
            let rows = query.predicate.join_rows(record.fields());
            let projected = record.project(query.schema);
            out.extend(std::iter::repeat(projected).take(rows));
        }
        Ok(out)
    }

    async fn load_graph(
        &self,
        schema: &'static EntitySchema,
        ids: &[String],
    ) -> Result<Vec<Record>> {
        let tables = self
            .tables
            .read()
            .map_err(|_| crate::Error::Internal("memory store lock poisoned".to_string()))?;
        let Some(rows) = tables.get(schema.table) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .filter(|r| r.key(schema).is_some_and(|k| ids.contains(&k)))
            .cloned()
            .collect())
    }
}
