//! Catalog search routes
//!
//! Path parameters are case-sensitive and percent-decoded by axum's `Path`
//! extractor, so `/ccds/solutions/tag/deep%20learning` searches for the tag
//! `deep learning`.

use crate::api::handlers::search;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn ccds_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/search/:entity",
            get(search::search_entity).post(search::search_entity_post),
        )
        .route("/solutions/tag/:tag", get(search::search_by_tag))
        .route("/solutions/portal", post(search::portal_search))
        .route("/solutions/kwtag", post(search::keyword_tag_search))
        .route("/solutions/modified", post(search::modified_since_search))
}
