//! Book persistence on PostgreSQL

use async_trait::async_trait;
use validator::Validate;

use super::{map_reference_error, not_found, BookStore, Repository};
use crate::{
    error::AppResult,
    models::book::{Book, BookSummary, CreateBook},
};

#[async_trait]
impl BookStore for Repository {
    async fn book_find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn, genre_ids FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn books_find_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author_id, summary, isbn, genre_ids
            FROM books
            WHERE author_id = $1
            ORDER BY id
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn book_summaries_find_by_author(&self, author_id: i32) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE author_id = $1 ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn book_save(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;

        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author_id, summary, isbn, genre_ids
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(&data.genre_ids)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, format!("Author {} does not exist", data.author_id)))
    }

    async fn book_delete_by_id(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_reference_error(e, format!("Book {} still has copies", id)))?;
        if result.rows_affected() == 0 {
            return Err(not_found("Book", id));
        }
        Ok(())
    }
}
