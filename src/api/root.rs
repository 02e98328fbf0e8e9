//! Root endpoint directory

use axum::Json;
use serde_json::{json, Value};

/// Welcome document listing the available endpoints
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "Endpoint directory")
    )
)]
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Library Books API",
        "endpoints": {
            "GET /api/books": "Get all books",
            "GET /api/books/:id": "Get a specific book by ID",
            "POST /api/books": "Create a new book",
            "PUT /api/books/:id": "Update a book",
            "DELETE /api/books/:id": "Delete a book"
        }
    }))
}
