//! In-process catalog store
//!
//! Mirrors the PostgreSQL repository: ids come from a single increasing
//! counter, references are checked on insert and delete, and listings are
//! ordered the same way.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use validator::Validate;

use super::{
    not_found, AuthorStore, BookInstanceStore, BookStore, CatalogStore, GenreStore, SortOrder,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, BookInstance, BookSummary, CreateAuthor, CreateBook, CreateBookInstance,
        CreateGenre, Genre,
    },
};

#[derive(Default)]
struct Tables {
    last_id: i32,
    authors: BTreeMap<i32, Author>,
    books: BTreeMap<i32, Book>,
    genres: BTreeMap<i32, Genre>,
    book_instances: BTreeMap<i32, BookInstance>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn author_find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn authors_find(&self, order: SortOrder) -> AppResult<Vec<Author>> {
        let mut authors: Vec<Author> = self.tables.read().await.authors.values().cloned().collect();
        // stable sort keeps id order between equal family names
        authors.sort_by(|a, b| match order {
            SortOrder::Ascending => a.family_name.cmp(&b.family_name),
            SortOrder::Descending => b.family_name.cmp(&a.family_name),
        });
        Ok(authors)
    }

    async fn author_save(&self, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;

        let mut tables = self.tables.write().await;
        let author = Author {
            id: tables.next_id(),
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        tables.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn author_delete_by_id(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.books.values().any(|book| book.author_id == id) {
            return Err(AppError::Validation(format!("Author {} still has books", id)));
        }
        tables
            .authors
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Author", id))
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn book_find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn books_find_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        Ok(self
            .tables
            .read()
            .await
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn book_summaries_find_by_author(&self, author_id: i32) -> AppResult<Vec<BookSummary>> {
        Ok(self
            .tables
            .read()
            .await
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .map(BookSummary::from)
            .collect())
    }

    async fn book_save(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;

        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&data.author_id) {
            return Err(AppError::Validation(format!(
                "Author {} does not exist",
                data.author_id
            )));
        }
        let book = Book {
            id: tables.next_id(),
            title: data.title.clone(),
            author_id: data.author_id,
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            genre_ids: data.genre_ids.clone(),
        };
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn book_delete_by_id(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.book_instances.values().any(|copy| copy.book_id == id) {
            return Err(AppError::Validation(format!("Book {} still has copies", id)));
        }
        tables
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Book", id))
    }
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn genre_find_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        Ok(self.tables.read().await.genres.get(&id).cloned())
    }

    async fn genres_find(&self) -> AppResult<Vec<Genre>> {
        let mut genres: Vec<Genre> = self.tables.read().await.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn genre_save(&self, data: &CreateGenre) -> AppResult<Genre> {
        data.validate()?;

        let mut tables = self.tables.write().await;
        let genre = Genre {
            id: tables.next_id(),
            name: data.name.clone(),
        };
        tables.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn genre_delete_by_id(&self, id: i32) -> AppResult<()> {
        self.tables
            .write()
            .await
            .genres
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Genre", id))
    }
}

#[async_trait]
impl BookInstanceStore for MemoryStore {
    async fn book_instance_find_by_id(&self, id: i32) -> AppResult<Option<BookInstance>> {
        Ok(self.tables.read().await.book_instances.get(&id).cloned())
    }

    async fn book_instances_find_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        Ok(self
            .tables
            .read()
            .await
            .book_instances
            .values()
            .filter(|copy| copy.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn book_instance_save(&self, data: &CreateBookInstance) -> AppResult<BookInstance> {
        data.validate()?;

        let mut tables = self.tables.write().await;
        if !tables.books.contains_key(&data.book_id) {
            return Err(AppError::Validation(format!(
                "Book {} does not exist",
                data.book_id
            )));
        }
        let instance = BookInstance {
            id: tables.next_id(),
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            status: data.status.unwrap_or_default(),
            due_back: data.due_back.unwrap_or_else(Utc::now),
        };
        tables.book_instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn book_instance_delete_by_id(&self, id: i32) -> AppResult<()> {
        self.tables
            .write()
            .await
            .book_instances
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("BookInstance", id))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
