//! Author persistence on PostgreSQL

use async_trait::async_trait;
use validator::Validate;

use super::{map_reference_error, not_found, AuthorStore, Repository, SortOrder};
use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
};

#[async_trait]
impl AuthorStore for Repository {
    async fn author_find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    async fn authors_find(&self, order: SortOrder) -> AppResult<Vec<Author>> {
        // Byte-wise collation keeps ordering identical to the in-memory store
        let query = format!(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            ORDER BY family_name COLLATE "C" {}, id ASC
            "#,
            order.as_sql()
        );
        let rows = sqlx::query_as::<_, Author>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn author_save(&self, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;

        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, family_name, date_of_birth, date_of_death
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Inserted author id={}", author.id);
        Ok(author)
    }

    async fn author_delete_by_id(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_reference_error(e, format!("Author {} still has books", id)))?;
        if result.rows_affected() == 0 {
            return Err(not_found("Author", id));
        }
        Ok(())
    }
}
