//! API handlers for the bookstore REST endpoints

pub mod books;
pub mod openapi;
pub mod root;

use crate::error::AppError;

/// Fallback handler for any method+path that matches no route
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
