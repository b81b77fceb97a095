use super::SearchEngine;
use crate::db::search::params::PageRequest;
use crate::db::traits::SearchQuery;
use crate::models::{Page, Record};
use crate::Result;

impl SearchEngine {
    /// Two-phase paging: count, then a bounded fetch with the same predicate.
    ///
    /// The fetch is skipped when nothing matches or the requested page starts
    /// past the last match. Count and fetch are separate reads, so a row
    /// written in between may be reflected in one and not the other.
    pub async fn search_page(
        &self,
        query: &SearchQuery,
        request: &PageRequest,
    ) -> Result<Page<Record>> {
        let total = self.store.count(query).await?;

        if total == 0 {
            tracing::debug!(entity = query.schema.name, "No matches, skipping fetch");
            return Ok(Page::empty(0, request));
        }

        let offset = request.offset();
        if offset as i64 >= total {
            tracing::debug!(
                entity = query.schema.name,
                total,
                page = request.page,
                size = request.size,
                "Requested page starts past the last match"
            );
            return Ok(Page::empty(total, request));
        }

        let items = self.store.fetch(query, request.window()).await?;
        let returned = items.len() as i64;

        tracing::debug!(
            entity = query.schema.name,
            total,
            page = request.page,
            size = request.size,
            returned,
            fallback = false,
            "Search page fetched"
        );

        Ok(Page::new(items, total.max(returned), request))
    }
}
