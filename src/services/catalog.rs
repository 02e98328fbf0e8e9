//! Catalog management service
//!
//! Sole owner of the in-memory book collection. The shelf (book vector plus
//! the id counter) sits behind a single mutex, so each request's mutation
//! runs to completion before the next one touches the collection.

use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, UpdateBook},
};

/// The shared collection state: insertion-ordered books and the next id.
/// Ids are never reused within a process lifetime.
struct Shelf {
    books: Vec<Book>,
    next_id: i64,
}

pub struct CatalogService {
    shelf: Mutex<Shelf>,
}

impl CatalogService {
    /// Create the catalog seeded with the initial fixture set
    pub fn new() -> Self {
        let books = seed_books();
        let next_id = books.last().map(|b| b.id + 1).unwrap_or(1);

        Self {
            shelf: Mutex::new(Shelf { books, next_id }),
        }
    }

    /// List all books in insertion order
    pub async fn list_books(&self) -> Vec<Book> {
        self.shelf.lock().await.books.clone()
    }

    /// Get a book by id
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        let shelf = self.shelf.lock().await;
        shelf
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(book_not_found)
    }

    /// Create a new book with the next unused id and append it to the shelf
    pub async fn create_book(&self, payload: CreateBook) -> Book {
        let mut shelf = self.shelf.lock().await;

        let book = Book {
            id: shelf.next_id,
            title: payload.title,
            author: payload.author,
            year: payload.year,
            genre: payload.genre,
            copies_available: payload.copies_available,
        };
        shelf.next_id += 1;
        shelf.books.push(book.clone());

        tracing::debug!("Created book id={} ({})", book.id, book.title);
        book
    }

    /// Apply a partial update to the book with the given id
    pub async fn update_book(&self, id: i64, patch: UpdateBook) -> AppResult<Book> {
        let mut shelf = self.shelf.lock().await;
        let book = shelf
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(book_not_found)?;

        patch.apply(book);
        Ok(book.clone())
    }

    /// Remove the book with the given id, returning the removed record
    pub async fn delete_book(&self, id: i64) -> AppResult<Book> {
        let mut shelf = self.shelf.lock().await;
        let idx = shelf
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(book_not_found)?;

        let removed = shelf.books.remove(idx);
        tracing::debug!("Deleted book id={}", removed.id);
        Ok(removed)
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

fn book_not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

/// Initial fixture set, reloaded on every process start
fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            year: Some(1965),
            genre: Some("Sci-Fi".to_string()),
            copies_available: 3,
        },
        Book {
            id: 2,
            title: "Dune Messiah".to_string(),
            author: "Frank Herbert".to_string(),
            year: Some(1969),
            genre: Some("Sci-Fi".to_string()),
            copies_available: 2,
        },
        Book {
            id: 3,
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            year: Some(1937),
            genre: Some("Fantasy".to_string()),
            copies_available: 4,
        },
        Book {
            id: 4,
            title: "The Pragmatic Programmer".to_string(),
            author: "Andrew Hunt; David Thomas".to_string(),
            year: Some(1999),
            genre: Some("Tech".to_string()),
            copies_available: 1,
        },
    ]
}
