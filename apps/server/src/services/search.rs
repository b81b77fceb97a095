//! Search service - entity and solution searches
//!
//! Orchestrates search operations by:
//! - Validating criteria and page controls before any store round trip
//! - Building predicates through the shared builders
//! - Choosing the pager: two-phase for scalar results, in-memory fallback
//!   for full object graphs

use crate::{
    db::search::engine::SearchEngine,
    db::search::facets::{KeywordTagSearch, ModifiedSinceSearch, PortalSearch},
    db::search::filter::build_filter,
    db::search::membership::value_set,
    db::search::params::{FilterCriteria, PageParams, SearchParameters},
    db::search::predicate::SetMode,
    models::{entities::solution, EntityKind, Page, Record},
    Result,
};
use std::sync::Arc;

/// Search service coordinates catalog searches
pub struct SearchService {
    search_engine: Arc<SearchEngine>,
}

impl SearchService {
    pub fn new(search_engine: Arc<SearchEngine>) -> Self {
        Self { search_engine }
    }

    /// Generic search over one entity's scalar fields.
    ///
    /// GET/POST /ccds/search/{entity}
    pub async fn search(
        &self,
        entity: EntityKind,
        criteria: &FilterCriteria,
        paging: &PageParams,
    ) -> Result<Page<Record>> {
        let schema = entity.schema();
        let request = self.search_engine.page_request(paging)?;
        let predicate = build_filter(schema, criteria)?;
        let query = self.search_engine.prepare(schema, predicate, &request)?;

        tracing::debug!(
            entity = schema.name,
            fields = criteria.fields.len(),
            combinator = ?criteria.combinator,
            "Entity search"
        );

        self.search_engine.search_page(&query, &request).await
    }

    /// Convenience wrapper over parsed query-string or body parameters.
    pub async fn search_parameters(
        &self,
        entity: EntityKind,
        params: &SearchParameters,
    ) -> Result<Page<Record>> {
        self.search(entity, &params.criteria, &params.paging).await
    }

    /// Solutions carrying a tag (scalar fields).
    ///
    /// GET /ccds/solutions/tag/{tag}
    pub async fn search_by_tag(&self, tag: &str, paging: &PageParams) -> Result<Page<Record>> {
        let schema = &solution::SCHEMA;
        let request = self.search_engine.page_request(paging)?;
        let predicate = value_set(&solution::TAGS, &[tag.to_string()], SetMode::Any)
            .ok_or_else(|| crate::Error::invalid("Tag must not be blank"))?;
        let query = self.search_engine.prepare(schema, predicate, &request)?;
        self.search_engine.search_page(&query, &request).await
    }

    /// Portal catalog search returning full solution graphs.
    pub async fn find_portal_solutions(
        &self,
        search: &PortalSearch,
        paging: &PageParams,
    ) -> Result<Page<Record>> {
        let request = self.search_engine.page_request(paging)?;
        let predicate = search.to_predicate()?;
        let query = self
            .search_engine
            .prepare(&solution::SCHEMA, predicate, &request)?;
        self.search_engine.search_graph_page(&query, &request).await
    }

    /// Keyword and tag search returning full solution graphs.
    pub async fn find_solutions_by_keywords_and_tags(
        &self,
        search: &KeywordTagSearch,
        paging: &PageParams,
    ) -> Result<Page<Record>> {
        let request = self.search_engine.page_request(paging)?;
        let predicate = search.to_predicate()?;
        let query = self
            .search_engine
            .prepare(&solution::SCHEMA, predicate, &request)?;
        self.search_engine.search_graph_page(&query, &request).await
    }

    /// Solutions modified, directly or through a revision, after `since`.
    pub async fn find_solutions_modified_since(
        &self,
        search: &ModifiedSinceSearch,
        paging: &PageParams,
    ) -> Result<Page<Record>> {
        let request = self.search_engine.page_request(paging)?;
        let predicate = search.to_predicate()?;
        let query = self
            .search_engine
            .prepare(&solution::SCHEMA, predicate, &request)?;
        self.search_engine.search_graph_page(&query, &request).await
    }
}
