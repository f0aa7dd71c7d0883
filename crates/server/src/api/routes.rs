use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{catalog, handlers, middleware::metrics_middleware};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Search
        .route("/search/movies", get(catalog::search_movies))
        .route("/search/tv", get(catalog::search_tv))
        .route("/search/people", get(catalog::search_people))
        // Details
        .route("/movies/{id}", get(catalog::get_movie))
        .route("/shows/{id}", get(catalog::get_show))
        .route("/shows/{id}/seasons/{season}", get(catalog::get_season))
        .route("/people/{id}", get(catalog::get_person))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
