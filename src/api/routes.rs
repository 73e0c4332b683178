use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Users
        .route("/users", post(handlers::register))
        .route("/users/login", post(handlers::login))
        .route("/users/:id", get(handlers::get_user))
        // Catalog
        .route("/movies", get(handlers::get_movies))
        .route("/movies/:id", get(handlers::get_movie))
        // Saved lists
        .route(
            "/users/:id/watchlist",
            get(handlers::get_watchlist).post(handlers::add_to_watchlist),
        )
        .route(
            "/users/:id/watchlist/:movie_id",
            delete(handlers::remove_from_watchlist),
        )
        .route(
            "/users/:id/preferences",
            get(handlers::get_preferences).post(handlers::add_preference),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}
