use crate::{
    application::search_textiles::dto::{SearchRequest, SearchResult},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use std::time::Instant;
use tracing::{info, instrument};

/// Searches the catalog from query-string parameters.
///
/// # Query Parameters
/// - `price_min`, `price_max`: inclusive price bounds (optional)
/// - `color`, `material`: exact enumerated values (optional)
/// - `in_stock`: `true` for available stock, `false` for sold out (optional)
/// - `q`: free-text query (optional)
/// - `sort`: `newest` (default), `oldest`, `price_asc`, `price_desc`, `name`
/// - `page`, `limit`: 1-based page and page size (optional)
///
/// # Errors
/// `AppError::ValidationError` / `AppError::BadRequest` for malformed input,
/// `AppError::StoreUnavailable` when the catalog store fails
#[instrument(skip(state, params))]
pub async fn search_textiles(
    State(state): State<AppState>,
    params: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<SearchResult>, AppError> {
    let Query(request) = params?;
    run_search(&state, request).await
}

/// Same search, taking the filter object as a JSON body.
#[instrument(skip(state, body))]
pub async fn search_textiles_json(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResult>, AppError> {
    let Json(request) = body?;
    run_search(&state, request).await
}

async fn run_search(state: &AppState, request: SearchRequest) -> Result<Json<SearchResult>, AppError> {
    let start_time = Instant::now();
    let result = state.search.execute(request).await?;

    info!(
        "Search completed in {:?}, returned {} of {} textiles",
        start_time.elapsed(),
        result.items.len(),
        result.total
    );
    Ok(Json(result))
}
