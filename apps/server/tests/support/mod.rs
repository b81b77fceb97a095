#![allow(dead_code)]

pub mod builders;
pub mod fixtures;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use cds_server::{
    api::create_router,
    db::{MemoryRecordStore, RecordStore},
    models::{EntityKind, Record},
    AppState, Config,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

// Re-export commonly used items
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryRecordStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::new_with_config(|_| {})
    }

    pub fn new_with_config(configure: impl FnOnce(&mut Config)) -> Self {
        cds_server::logging::init_simple_logging();

        let mut config = Config::default();
        configure(&mut config);

        let store = Arc::new(MemoryRecordStore::new());
        let state = AppState::with_store(config, store.clone() as Arc<dyn RecordStore>);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            store,
        }
    }

    /// Insert JSON objects as records of `kind`.
    pub fn seed(&self, kind: EntityKind, records: Vec<Value>) -> anyhow::Result<()> {
        for value in records {
            let record = Record::from_value(value).context("record must be a JSON object")?;
            self.store.insert(kind.schema(), record)?;
        }
        Ok(())
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Value)> {
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value)?),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("content-type", "application/json")
            .body(body)
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes: Bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("parse response body")?
        };

        Ok((status, headers, json))
    }
}
