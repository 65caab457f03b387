use super::{
    handlers::{health, search, textiles},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{Router, middleware, routing::get};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Search
        .route(
            "/api/v1/textiles/search",
            get(search::search_textiles).post(search::search_textiles_json),
        )
        // Textiles
        .route("/api/v1/textiles/{id}", get(textiles::get_textile))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
