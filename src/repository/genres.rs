//! Genre persistence on PostgreSQL

use async_trait::async_trait;
use validator::Validate;

use super::{not_found, GenreStore, Repository};
use crate::{
    error::AppResult,
    models::genre::{CreateGenre, Genre},
};

#[async_trait]
impl GenreStore for Repository {
    async fn genre_find_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    async fn genres_find(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"SELECT id, name FROM genres ORDER BY name COLLATE "C", id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn genre_save(&self, data: &CreateGenre) -> AppResult<Genre> {
        data.validate()?;

        let genre = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(genre)
    }

    async fn genre_delete_by_id(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Genre", id));
        }
        Ok(())
    }
}
