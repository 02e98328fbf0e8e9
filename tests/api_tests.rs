//! API integration tests
//!
//! Each test builds a fresh in-process app (clean in-memory data, as the
//! collection reseeds per instance) and drives the router directly, without
//! binding a socket.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookstore_server::{config::AppConfig, create_app, AppState};

fn test_app() -> Router {
    create_app(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response body")
    };

    (status, value)
}

#[tokio::test]
async fn root_lists_endpoints() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Library Books API");
    assert_eq!(
        body["endpoints"].as_object().expect("No endpoints").len(),
        5
    );
}

#[tokio::test]
async fn list_returns_seeded_books() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/books", None).await;

    assert_eq!(status, StatusCode::OK);
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 4);
    assert_eq!(books[0]["title"], "Dune");
}

#[tokio::test]
async fn get_book_by_id() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/books/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["title"], "Dune Messiah");
    assert_eq!(body["author"], "Frank Herbert");
}

#[tokio::test]
async fn get_missing_book_is_404() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/books/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn create_book_appends_to_collection() {
    let app = test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "A Fire Upon the Deep",
            "author": "Vernor Vinge",
            "year": 1992,
            "genre": "Sci-Fi",
            "copiesAvailable": 2
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 5);
    assert_eq!(created["title"], "A Fire Upon the Deep");
    assert_eq!(created["copiesAvailable"], 2);

    // The new record is listed and fetchable, deep-equal to the create response
    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    let books = list.as_array().expect("Expected an array");
    assert_eq!(books.len(), 5);
    assert_eq!(books[4], created);

    let (status, fetched) = send(&app, Method::GET, "/api/books/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_defaults_year_and_genre_to_null_and_copies_to_zero() {
    let app = test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Untracked", "author": "Anonymous" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    // year/genre are present as null, copiesAvailable is 0 (not null)
    assert_eq!(created.get("year"), Some(&Value::Null));
    assert_eq!(created.get("genre"), Some(&Value::Null));
    assert_eq!(created["copiesAvailable"], 0);
}

#[tokio::test]
async fn create_without_title_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "author": "No Title Author" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(
        body["error"],
        "Field \"title\" is required and must be a non-empty string."
    );

    // No mutation occurred
    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list.as_array().expect("Expected an array").len(), 4);
}

#[tokio::test]
async fn create_with_non_integer_year_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Dune", "author": "Frank Herbert", "year": "1965" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Field \"year\" must be an integer if provided.");
}

#[tokio::test]
async fn create_with_negative_copies_is_400() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Dune", "author": "Frank Herbert", "copiesAvailable": -3 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Field \"copiesAvailable\" must be a non-negative integer if provided."
    );
}

#[tokio::test]
async fn ids_are_never_reused_after_delete() {
    let app = test_app();

    let (_, first) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "First", "author": "A" })),
    )
    .await;
    assert_eq!(first["id"], 5);

    let (status, _) = send(&app, Method::DELETE, "/api/books/5", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, second) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Second", "author": "B" })),
    )
    .await;
    assert_eq!(second["id"], 6);
}

#[tokio::test]
async fn partial_update_changes_only_provided_fields() {
    let app = test_app();

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/books/2",
        Some(json!({ "copiesAvailable": 7, "genre": "Science Fiction" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 2);
    assert_eq!(updated["copiesAvailable"], 7);
    assert_eq!(updated["genre"], "Science Fiction");
    assert_eq!(updated["title"], "Dune Messiah");
    assert_eq!(updated["author"], "Frank Herbert");
    assert_eq!(updated["year"], 1969);
}

#[tokio::test]
async fn update_missing_book_is_404() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/books/99",
        Some(json!({ "title": "Ghost" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn update_missing_book_outranks_invalid_payload() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/books/99",
        Some(json!({ "copiesAvailable": -2 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn update_with_invalid_field_leaves_record_unchanged() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/books/1",
        Some(json!({ "copiesAvailable": -2 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Field \"copiesAvailable\" must be a non-negative integer if provided."
    );

    let (_, book) = send(&app, Method::GET, "/api/books/1", None).await;
    assert_eq!(book["copiesAvailable"], 3);
}

#[tokio::test]
async fn delete_book_removes_it_from_collection() {
    let app = test_app();

    let (status, body) = send(&app, Method::DELETE, "/api/books/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted successfully");
    assert_eq!(body["book"]["id"], 3);
    assert_eq!(body["book"]["title"], "The Hobbit");

    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    let books = list.as_array().expect("Expected an array");
    assert_eq!(books.len(), 3);
    assert!(books.iter().all(|b| b["id"] != 3));
}

#[tokio::test]
async fn deleting_twice_succeeds_once() {
    let app = test_app();

    let (status, _) = send(&app, Method::DELETE, "/api/books/4", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, "/api/books/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/unknown", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn unmatched_method_on_known_path_is_404() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books/1",
        Some(json!({ "title": "Nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}
