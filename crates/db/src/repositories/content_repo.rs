//! Repository for the `contents` table.

use roomkit_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{Content, CreateContent, UpdateContent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, image, created_at, updated_at";

/// Provides CRUD operations for contents.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new content, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateContent) -> Result<Content, sqlx::Error> {
        let query = format!(
            "INSERT INTO contents (title, image)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(&input.title)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Find a content by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contents, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Content>(&query).fetch_all(pool).await
    }

    /// Update a content. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContent,
    ) -> Result<Option<Content>, sqlx::Error> {
        let query = format!(
            "UPDATE contents SET
                title = COALESCE($2, title),
                image = COALESCE($3, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a content by ID; its version chain goes with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
