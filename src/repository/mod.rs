//! Repository layer for catalog persistence
//!
//! Each entity kind is reached through its own store trait. [`Repository`]
//! implements them over PostgreSQL, [`memory::MemoryStore`] keeps everything
//! in process.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, BookInstance, BookSummary, CreateAuthor, CreateBook, CreateBookInstance,
        CreateGenre, Genre,
    },
};

pub use memory::MemoryStore;

/// Sort direction for ordered lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn author_find_by_id(&self, id: i32) -> AppResult<Option<Author>>;

    /// All authors ordered by family name
    async fn authors_find(&self, order: SortOrder) -> AppResult<Vec<Author>>;

    async fn author_save(&self, data: &CreateAuthor) -> AppResult<Author>;

    async fn author_delete_by_id(&self, id: i32) -> AppResult<()>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn book_find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Books referencing the given author
    async fn books_find_by_author(&self, author_id: i32) -> AppResult<Vec<Book>>;

    /// Title/summary projection of the books referencing the given author
    async fn book_summaries_find_by_author(&self, author_id: i32) -> AppResult<Vec<BookSummary>>;

    async fn book_save(&self, data: &CreateBook) -> AppResult<Book>;

    async fn book_delete_by_id(&self, id: i32) -> AppResult<()>;
}

#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn genre_find_by_id(&self, id: i32) -> AppResult<Option<Genre>>;

    /// All genres ordered by name
    async fn genres_find(&self) -> AppResult<Vec<Genre>>;

    async fn genre_save(&self, data: &CreateGenre) -> AppResult<Genre>;

    async fn genre_delete_by_id(&self, id: i32) -> AppResult<()>;
}

#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    async fn book_instance_find_by_id(&self, id: i32) -> AppResult<Option<BookInstance>>;

    async fn book_instances_find_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>>;

    async fn book_instance_save(&self, data: &CreateBookInstance) -> AppResult<BookInstance>;

    async fn book_instance_delete_by_id(&self, id: i32) -> AppResult<()>;
}

/// Everything the catalog services need from a store
#[async_trait]
pub trait CatalogStore: AuthorStore + BookStore + GenreStore + BookInstanceStore {
    /// Round-trip to the backing store
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Turn a foreign key violation into a validation failure
pub(crate) fn map_reference_error(err: sqlx::Error, message: String) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::Validation(message),
        _ => AppError::Database(err),
    }
}

pub(crate) fn not_found(kind: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} {} not found", kind, id))
}
