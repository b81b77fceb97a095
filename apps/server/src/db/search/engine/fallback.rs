use super::SearchEngine;
use crate::db::search::params::PageRequest;
use crate::db::traits::SearchQuery;
use crate::models::{Page, Record};
use crate::Result;
use std::collections::{HashMap, HashSet};

impl SearchEngine {
    /// Paging for searches that return full object graphs.
    ///
    /// Every match is fetched as a scalar key row, duplicates from join
    /// fan-out are coalesced on the id, the set is ordered (caller keys, then
    /// id) and sliced in memory. Only the sliced ids are loaded as graphs.
    /// Cost grows with the number of matches.
    pub async fn search_graph_page(
        &self,
        query: &SearchQuery,
        request: &PageRequest,
    ) -> Result<Page<Record>> {
        let schema = query.schema;
        let rows = self.store.fetch_keys(query).await?;
        let fetched = rows.len();

        let mut seen = HashSet::with_capacity(rows.len());
        let mut keyed: Vec<(String, Record)> = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(key) = row.key(schema) else {
                tracing::warn!(entity = schema.name, "Skipping match without an id");
                continue;
            };
            if seen.insert(key.clone()) {
                keyed.push((key, row));
            }
        }

        let sort = query.sort.clone().with_tiebreak(schema);
        keyed.sort_by(|(_, a), (_, b)| sort.compare(a.fields(), b.fields()));

        let total = keyed.len() as i64;
        let offset = request.offset();
        if offset >= keyed.len() {
            tracing::debug!(
                entity = schema.name,
                total,
                page = request.page,
                size = request.size,
                "Requested page starts past the last match"
            );
            return Ok(Page::empty(total, request));
        }

        let ids: Vec<String> = keyed
            .into_iter()
            .skip(offset)
            .take(request.size)
            .map(|(key, _)| key)
            .collect();

        let mut graphs: HashMap<String, Record> = self
            .store
            .load_graph(schema, &ids)
            .await?
            .into_iter()
            .filter_map(|graph| graph.key(schema).map(|key| (key, graph)))
            .collect();

        let items: Vec<Record> = ids.iter().filter_map(|id| graphs.remove(id)).collect();
        if items.len() != ids.len() {
            tracing::warn!(
                entity = schema.name,
                expected = ids.len(),
                loaded = items.len(),
                "Some matches disappeared before their graphs were loaded"
            );
        }

        tracing::debug!(
            entity = schema.name,
            total,
            fetched_rows = fetched,
            page = request.page,
            size = request.size,
            returned = items.len(),
            fallback = true,
            "Search page assembled in memory"
        );

        Ok(Page::new(items, total, request))
    }
}
