//! Book model and per-operation request payloads.
//!
//! Write requests arrive as raw JSON and are validated field by field so
//! that every violation maps to a 400 response naming the offending field.
//! The resulting `CreateBook`/`UpdateBook` structures are what handlers and
//! the catalog service operate on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// A book record in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier assigned by the service, immutable once set
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year; serialized as null when unknown
    pub year: Option<i32>,
    /// Genre label; serialized as null when unknown
    pub genre: Option<String>,
    /// Number of copies currently available (never negative)
    pub copies_available: i64,
}

/// Validated payload for the create operation
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    #[serde(default)]
    pub copies_available: i64,
}

impl CreateBook {
    /// Validate a raw JSON body for creation.
    ///
    /// `title` and `author` are required non-empty strings; `year` must be
    /// an integer when given; `genre` a string when given; `copiesAvailable`
    /// a non-negative integer when given, defaulting to 0 otherwise. Note
    /// the asymmetry: `year`/`genre` default to null, `copiesAvailable` to 0.
    pub fn parse(body: &Value) -> AppResult<Self> {
        let title = required_string(body, "title")?;
        let author = required_string(body, "author")?;
        let year = provided_year(body)?;
        let genre = match body.get("genre") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(genre_error()),
        };
        let copies_available = provided_copies(body)?.unwrap_or(0);

        Ok(Self {
            title,
            author,
            year,
            genre,
            copies_available,
        })
    }
}

/// Validated payload for the partial update operation.
///
/// `None` means the field was absent from the request body and keeps its
/// stored value. `genre` distinguishes "absent" from "present as null": the
/// latter clears the stored genre.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub genre: Option<Option<String>>,
    pub copies_available: Option<i64>,
}

impl UpdateBook {
    /// Validate a raw JSON body for a partial update.
    ///
    /// Required-field checks are skipped, but any field that is present must
    /// satisfy its constraint: non-empty string for `title`/`author`,
    /// integer for `year`, non-negative integer for `copiesAvailable`.
    pub fn parse(body: &Value) -> AppResult<Self> {
        let title = provided_string(body, "title")?;
        let author = provided_string(body, "author")?;
        let year = provided_year(body)?;
        let genre = match body.get("genre") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(_) => return Err(genre_error()),
        };
        let copies_available = provided_copies(body)?;

        Ok(Self {
            title,
            author,
            year,
            genre,
            copies_available,
        })
    }

    /// Merge the provided fields into a stored record; absent fields keep
    /// their previous value and `id` is never altered.
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(year) = self.year {
            book.year = Some(year);
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
        if let Some(copies) = self.copies_available {
            book.copies_available = copies;
        }
    }
}

fn required_string(body: &Value, field: &str) -> AppResult<String> {
    match body.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(AppError::Validation(format!(
            "Field \"{}\" is required and must be a non-empty string.",
            field
        ))),
    }
}

fn provided_string(body: &Value, field: &str) -> AppResult<Option<String>> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
        Some(_) => Err(AppError::Validation(format!(
            "Field \"{}\" must be a non-empty string if provided.",
            field
        ))),
    }
}

fn provided_year(body: &Value) -> AppResult<Option<i32>> {
    match body.get("year") {
        None => Ok(None),
        Some(v) => match v.as_i64().and_then(|n| i32::try_from(n).ok()) {
            Some(n) => Ok(Some(n)),
            None => Err(AppError::Validation(
                "Field \"year\" must be an integer if provided.".to_string(),
            )),
        },
    }
}

fn provided_copies(body: &Value) -> AppResult<Option<i64>> {
    match body.get("copiesAvailable") {
        None => Ok(None),
        Some(v) => match v.as_i64() {
            Some(n) if n >= 0 => Ok(Some(n)),
            _ => Err(AppError::Validation(
                "Field \"copiesAvailable\" must be a non-negative integer if provided.".to_string(),
            )),
        },
    }
}

fn genre_error() -> AppError {
    AppError::Validation("Field \"genre\" must be a string if provided.".to_string())
}
