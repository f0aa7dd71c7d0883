//! Catalog API handlers: search and detail lookups.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use reelscout_core::{
    Candidate, CatalogError, MovieRecord, PersonRecord, SeasonRecord, ShowRecord,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Search response: an array, or `null` when nothing matched confidently.
type SearchResponse = Json<Option<Vec<Candidate>>>;

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

fn catalog_error(e: CatalogError) -> ApiError {
    match e {
        CatalogError::InvalidIdentifier { .. } => error(StatusCode::BAD_REQUEST, e.to_string()),
        CatalogError::Fetch(_) => {
            warn!(error = %e, "Catalog fetch failed");
            error(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

fn found<T>(record: Option<T>, what: &str, id: &str) -> Result<Json<T>, ApiError> {
    record.map(Json).ok_or_else(|| {
        error(
            StatusCode::NOT_FOUND,
            format!("No structured data on {} page {}", what, id),
        )
    })
}

// ============================================================================
// Search handlers
// ============================================================================

/// GET /api/v1/search/movies?query=
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<SearchResponse, ApiError> {
    state
        .catalog()
        .search_movie(&params.query)
        .await
        .map(Json)
        .map_err(catalog_error)
}

/// GET /api/v1/search/tv?query=
///
/// TV results are returned unfiltered, in page order.
pub async fn search_tv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<SearchResponse, ApiError> {
    state
        .catalog()
        .search_tv(&params.query)
        .await
        .map(Json)
        .map_err(catalog_error)
}

/// GET /api/v1/search/people?query=
pub async fn search_people(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<SearchResponse, ApiError> {
    state
        .catalog()
        .search_person(&params.query)
        .await
        .map(Json)
        .map_err(catalog_error)
}

// ============================================================================
// Detail handlers
// ============================================================================

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieRecord>, ApiError> {
    let movie = state.catalog().get_movie(&id).await.map_err(catalog_error)?;
    found(movie, "movie", &id)
}

/// GET /api/v1/shows/{id}
pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ShowRecord>, ApiError> {
    let show = state.catalog().get_show(&id).await.map_err(catalog_error)?;
    found(show, "show", &id)
}

/// GET /api/v1/shows/{id}/seasons/{season}
pub async fn get_season(
    State(state): State<Arc<AppState>>,
    Path((id, season)): Path<(String, u32)>,
) -> Result<Json<SeasonRecord>, ApiError> {
    state
        .catalog()
        .get_season(&id, season)
        .await
        .map(Json)
        .map_err(catalog_error)
}

/// GET /api/v1/people/{id}
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PersonRecord>, ApiError> {
    let person = state.catalog().get_person(&id).await.map_err(catalog_error)?;
    found(person, "person", &id)
}
