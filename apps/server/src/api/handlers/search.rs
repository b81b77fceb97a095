//! Search operation handlers
//!
//! Handles catalog search operations:
//! - Entity search (GET /ccds/search/{entity}?field=value&_j=o&page=0&size=20&sort=-name)
//! - Entity search with a JSON body (POST /ccds/search/{entity})
//! - Solutions by tag (GET /ccds/solutions/tag/{tag})
//! - Multi-facet solution searches (POST /ccds/solutions/{portal,kwtag,modified})

use crate::{
    db::search::facets::{KeywordTagSearch, ModifiedSinceSearch, PortalSearch},
    db::search::params::{parse_query_string, PageParams, SearchBody, SearchParameters},
    models::{EntityKind, Page, Record},
    state::AppState,
    Result,
};
use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    Json,
};
use serde::Deserialize;

/// Facet search body: facet fields plus `page`, `size` and `sort`.
#[derive(Debug, Deserialize)]
pub struct FacetRequest<T> {
    #[serde(flatten)]
    pub facets: T,
    #[serde(flatten)]
    pub paging: PageParams,
}

fn entity_from_path(segment: &str) -> Result<EntityKind> {
    EntityKind::from_path(segment)
        .ok_or_else(|| crate::Error::NotFound(format!("Unknown entity type: {}", segment)))
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| crate::Error::invalid(rejection.body_text()))
}

/// GET /ccds/search/{entity}
pub async fn search_entity(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<Record>>> {
    let entity = entity_from_path(&entity)?;
    let items = parse_query_string(query.as_deref().unwrap_or(""));
    let params = SearchParameters::from_items(&items)?;

    let page = state.search.search_parameters(entity, &params).await?;
    Ok(Json(page))
}

/// POST /ccds/search/{entity}
pub async fn search_entity_post(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    payload: std::result::Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<Page<Record>>> {
    let entity = entity_from_path(&entity)?;
    let params = SearchParameters::from_body(json_body(payload)?);

    let page = state.search.search_parameters(entity, &params).await?;
    Ok(Json(page))
}

/// GET /ccds/solutions/tag/{tag}
///
/// Only page controls are accepted in the query string.
pub async fn search_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<Record>>> {
    let items = parse_query_string(query.as_deref().unwrap_or(""));
    let params = SearchParameters::from_items(&items)?;
    if let Some((name, _)) = params.criteria.fields.first() {
        return Err(crate::Error::invalid(format!(
            "Unexpected parameter for tag search: {}",
            name
        )));
    }

    let page = state.search.search_by_tag(&tag, &params.paging).await?;
    Ok(Json(page))
}

/// POST /ccds/solutions/portal
pub async fn portal_search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FacetRequest<PortalSearch>>, JsonRejection>,
) -> Result<Json<Page<Record>>> {
    let request = json_body(payload)?;
    let page = state
        .search
        .find_portal_solutions(&request.facets, &request.paging)
        .await?;
    Ok(Json(page))
}

/// POST /ccds/solutions/kwtag
pub async fn keyword_tag_search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FacetRequest<KeywordTagSearch>>, JsonRejection>,
) -> Result<Json<Page<Record>>> {
    let request = json_body(payload)?;
    let page = state
        .search
        .find_solutions_by_keywords_and_tags(&request.facets, &request.paging)
        .await?;
    Ok(Json(page))
}

/// POST /ccds/solutions/modified
pub async fn modified_since_search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FacetRequest<ModifiedSinceSearch>>, JsonRejection>,
) -> Result<Json<Page<Record>>> {
    let request = json_body(payload)?;
    let page = state
        .search
        .find_solutions_modified_since(&request.facets, &request.paging)
        .await?;
    Ok(Json(page))
}
