use async_trait::async_trait;
use cds_server::db::search::facets::KeywordTagSearch;
use cds_server::db::search::params::{FilterCriteria, PageParams};
use cds_server::db::search::schema::EntitySchema;
use cds_server::db::{RecordStore, SearchQuery, Window};
use cds_server::models::{EntityKind, Record};
use cds_server::{AppState, Config, Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store reporting a fixed count and recording how often rows are fetched.
#[derive(Default)]
struct ScriptedStore {
    total: i64,
    fail: bool,
    fetches: AtomicUsize,
}

impl ScriptedStore {
    fn with_total(total: i64) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn count(&self, _query: &SearchQuery) -> Result<i64> {
        self.check()?;
        Ok(self.total)
    }

    async fn fetch(&self, _query: &SearchQuery, _window: Window) -> Result<Vec<Record>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Vec::new())
    }

    async fn fetch_keys(&self, _query: &SearchQuery) -> Result<Vec<Record>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Vec::new())
    }

    async fn load_graph(
        &self,
        _schema: &'static EntitySchema,
        _ids: &[String],
    ) -> Result<Vec<Record>> {
        self.check()?;
        Ok(Vec::new())
    }
}

fn state_over(store: Arc<ScriptedStore>) -> AppState {
    AppState::with_store(Config::default(), store as Arc<dyn RecordStore>)
}

fn active() -> FilterCriteria {
    FilterCriteria::and().with("active", true)
}

#[tokio::test]
async fn zero_count_skips_the_fetch() -> anyhow::Result<()> {
    let store = Arc::new(ScriptedStore::with_total(0));
    let state = state_over(store.clone());

    let page = state
        .search
        .search(EntityKind::Solution, &active(), &PageParams::default())
        .await?;

    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 0);
    assert_eq!(store.fetches.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn page_past_the_count_skips_the_fetch() -> anyhow::Result<()> {
    let store = Arc::new(ScriptedStore::with_total(4));
    let state = state_over(store.clone());

    let params = PageParams {
        page: Some(2),
        size: Some(2),
        sort: Vec::new(),
    };
    let page = state
        .search
        .search(EntityKind::Solution, &active(), &params)
        .await?;
    assert_eq!(page.total_elements, 4);
    assert_eq!(store.fetches.load(Ordering::SeqCst), 0);

    let params = PageParams {
        page: Some(1),
        ..params
    };
    state
        .search
        .search(EntityKind::Solution, &active(), &params)
        .await?;
    assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn store_failures_reach_the_caller() -> anyhow::Result<()> {
    let store = Arc::new(ScriptedStore::failing());
    let state = state_over(store.clone());

    let err = state
        .search
        .search(EntityKind::Solution, &active(), &PageParams::default())
        .await
        .expect_err("count failure must surface");
    assert!(matches!(err, Error::Database(_)));
    assert!(!err.is_client_error());
    assert_eq!(store.fetches.load(Ordering::SeqCst), 0);

    let search = KeywordTagSearch {
        active: Some(true),
        ..Default::default()
    };
    let err = state
        .search
        .find_solutions_by_keywords_and_tags(&search, &PageParams::default())
        .await
        .expect_err("key fetch failure must surface");
    assert!(matches!(err, Error::Database(_)));
    assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    Ok(())
}
