//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::display::{canonical_url, EntityKind};

/// Book as stored. Each book references exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    /// Genres the book is filed under
    pub genre_ids: Vec<i32>,
}

impl Book {
    pub fn url(&self) -> String {
        canonical_url(EntityKind::Book, self.id)
    }
}

/// Title/summary projection of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        canonical_url(EntityKind::Book, self.id)
    }
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

/// Book with its derived display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookView {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
    pub url: String,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author_id: book.author_id,
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre_ids: book.genre_ids.clone(),
            url: book.url(),
        }
    }
}

/// Book summary with its canonical URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BookSummaryView {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<&BookSummary> for BookSummaryView {
    fn from(book: &BookSummary) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book.url(),
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub author_id: i32,
    #[validate(length(min = 1, message = "Summary must not be empty"))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_urls() {
        let book = Book {
            id: 12,
            title: "Frankenstein".to_string(),
            author_id: 3,
            summary: "A modern Prometheus".to_string(),
            isbn: "9780141439471".to_string(),
            genre_ids: vec![1],
        };
        assert_eq!(book.url(), "/catalog/book/12");
        assert_eq!(BookSummary::from(&book).url(), "/catalog/book/12");
        assert_eq!(BookView::from(&book).url, "/catalog/book/12");
    }

    #[test]
    fn test_create_book_requires_title() {
        let draft = CreateBook {
            title: String::new(),
            author_id: 1,
            summary: "s".to_string(),
            isbn: "i".to_string(),
            genre_ids: vec![],
        };
        assert!(draft.validate().is_err());
    }
}
