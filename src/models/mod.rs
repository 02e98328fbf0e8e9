//! Data models for the bookstore server

pub mod book;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
