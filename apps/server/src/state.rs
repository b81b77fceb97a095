//! Shared application state

use crate::config::Config;
use crate::db::search::engine::SearchEngine;
use crate::db::{PostgresRecordStore, RecordStore};
use crate::services::SearchService;
use crate::Result;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub search: Arc<SearchService>,
}

impl AppState {
    /// State backed by PostgreSQL (connections are opened lazily).
    pub fn new(config: Config) -> Result<Self> {
        let store = PostgresRecordStore::connect_lazy(&config.database)?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// State over any record store.
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let engine = Arc::new(SearchEngine::new(store, config.search.clone()));
        Self {
            config: Arc::new(config),
            search: Arc::new(SearchService::new(engine)),
        }
    }
}
