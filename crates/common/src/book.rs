//! The book record and the payloads that create or modify it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::BookId;

/// A book on the reading list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub published: i32,
    pub pages: i32,
    pub genres: Vec<String>,
    pub rating: f32,
}

/// Reasons a book is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("pages must not be negative, got {0}")]
    NegativePages(i32),
}

impl Book {
    /// Checks the invariants every stored book must satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.pages < 0 {
            return Err(ValidationError::NegativePages(self.pages));
        }
        Ok(())
    }
}

/// Creation payload. Every field is required and the client cannot choose an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewBook {
    pub title: String,
    pub published: i32,
    pub pages: i32,
    pub genres: Vec<String>,
    pub rating: f32,
}

impl NewBook {
    /// Builds a book with an unassigned id, ready for insertion.
    pub fn into_book(self) -> Book {
        Book {
            id: BookId::unassigned(),
            title: self.title,
            published: self.published,
            pages: self.pages,
            genres: self.genres,
            rating: self.rating,
        }
    }
}

/// Partial update payload.
///
/// A missing (or `null`) field leaves the stored value alone. The genre list
/// only replaces the stored one when it is non-empty, so an update can never
/// clear a book's genres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl BookUpdate {
    /// Overwrites the fields of `book` that this update carries.
    pub fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(published) = self.published {
            book.published = published;
        }
        if let Some(pages) = self.pages {
            book.pages = pages;
        }
        if let Some(genres) = self.genres.filter(|g| !g.is_empty()) {
            book.genres = genres;
        }
        if let Some(rating) = self.rating {
            book.rating = rating;
        }
    }
}
