//! Data models for the LocalLibrary catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod display;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorView, CreateAuthor};
pub use book::{Book, BookSummary, BookSummaryView, BookView, CreateBook};
pub use book_instance::{BookInstance, BookInstanceStatus, BookInstanceView, CreateBookInstance};
pub use display::{canonical_url, format_date, EntityKind};
pub use genre::{CreateGenre, Genre, GenreView};
