//! Book instance persistence on PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

use super::{map_reference_error, not_found, BookInstanceStore, Repository};
use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, CreateBookInstance},
};

/// Row as stored; status is kept as text
#[derive(FromRow)]
struct BookInstanceRow {
    id: i32,
    book_id: i32,
    imprint: String,
    status: String,
    due_back: DateTime<Utc>,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        Ok(BookInstance {
            id: row.id,
            book_id: row.book_id,
            imprint: row.imprint,
            status: row.status.parse().map_err(AppError::Internal)?,
            due_back: row.due_back,
        })
    }
}

#[async_trait]
impl BookInstanceStore for Repository {
    async fn book_instance_find_by_id(&self, id: i32) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstanceRow>(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(BookInstance::try_from)
        .transpose()
    }

    async fn book_instances_find_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            SELECT id, book_id, imprint, status, due_back
            FROM book_instances
            WHERE book_id = $1
            ORDER BY id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(BookInstance::try_from).collect()
    }

    async fn book_instance_save(&self, data: &CreateBookInstance) -> AppResult<BookInstance> {
        data.validate()?;

        let status = data.status.unwrap_or_default();
        let due_back = data.due_back.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, BookInstanceRow>(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(status.as_str())
        .bind(due_back)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_reference_error(e, format!("Book {} does not exist", data.book_id)))?;
        BookInstance::try_from(row)
    }

    async fn book_instance_delete_by_id(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("BookInstance", id));
        }
        Ok(())
    }
}
