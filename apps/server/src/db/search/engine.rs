//! Search implementation - query preparation and paging
//!
//! The SearchEngine is responsible for:
//! - Applying page defaults and limits
//! - Binding sort keys to the searched entity
//! - Two-phase count-and-fetch paging for scalar results
//! - Coalescing, in-memory paging for full object graphs

use crate::config::SearchConfig;
use crate::db::search::params::{PageParams, PageRequest};
use crate::db::search::predicate::Predicate;
use crate::db::search::schema::EntitySchema;
use crate::db::search::sort::SortSpec;
use crate::db::traits::{RecordStore, SearchQuery};
use crate::Result;
use std::sync::Arc;

mod execute;
mod fallback;

/// Search engine executes entity searches against a [`RecordStore`].
#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<dyn RecordStore>,
    search_config: SearchConfig,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn RecordStore>, search_config: SearchConfig) -> Self {
        Self {
            store,
            search_config,
        }
    }

    /// Apply defaults and validate the caller's page controls.
    pub fn page_request(&self, params: &PageParams) -> Result<PageRequest> {
        PageRequest::resolve(params, &self.search_config)
    }

    /// Combine a built predicate with the request's sort keys.
    pub fn prepare(
        &self,
        schema: &'static EntitySchema,
        predicate: Predicate,
        request: &PageRequest,
    ) -> Result<SearchQuery> {
        let sort = SortSpec::resolve(schema, &request.sort)?.with_tiebreak(schema);
        Ok(SearchQuery {
            schema,
            predicate,
            sort,
        })
    }
}
