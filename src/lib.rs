//! Bookstore Server
//!
//! A Rust REST API server exposing CRUD operations over an in-memory
//! collection of library books.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Create the state with a freshly seeded book collection
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new()),
        }
    }
}

/// Build the application router.
///
/// Lives in the library (rather than `main`) so tests can construct a fresh
/// app with clean in-memory data for each run.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Unmatched methods on known paths answer 404 like unknown paths do,
    // so every method router carries the same fallback.
    let routes = Router::new()
        // Root endpoint directory
        .route("/", get(api::root::index).fallback(api::route_not_found))
        // Books
        .route(
            "/api/books",
            get(api::books::list_books)
                .post(api::books::create_book)
                .fallback(api::route_not_found),
        )
        .route(
            "/api/books/:id",
            get(api::books::get_book)
                .put(api::books::update_book)
                .delete(api::books::delete_book)
                .fallback(api::route_not_found),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .fallback(api::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
