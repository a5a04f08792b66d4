//! Repository for the `main_contents` table.
//!
//! Rows are immutable snapshots. The only update ever issued is the retire
//! step of [`MainContentRepo::append_successor`], which flips `is_latest` and
//! sets `next_uuid` on the predecessor.

use roomkit_core::types::DbId;
use roomkit_core::version_chain::NewVersion;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::main_content::MainContent;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, title, body, image, content_id, prev_uuid, next_uuid, \
    version, is_latest, user_id, created_at, updated_at";

/// Provides insert, lookup, and chain-append operations for main contents.
pub struct MainContentRepo;

impl MainContentRepo {
    /// Insert a version as the latest of its chain with no successor.
    ///
    /// Generic over the executor so it runs on the pool or inside a transaction.
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &NewVersion,
    ) -> Result<MainContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO main_contents
                (uuid, title, body, image, content_id, prev_uuid, next_uuid, version, is_latest, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, NULL, $7, true, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MainContent>(&query)
            .bind(input.uuid)
            .bind(&input.title)
            .bind(input.body.as_ref().map(|b| b.encode()))
            .bind(&input.image)
            .bind(input.content_id)
            .bind(input.prev_uuid)
            .bind(input.version)
            .bind(input.user_id)
            .fetch_one(executor)
            .await
    }

    /// Find a version by its uuid.
    pub async fn find_by_uuid(pool: &PgPool, uuid: Uuid) -> Result<Option<MainContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM main_contents WHERE uuid = $1");
        sqlx::query_as::<_, MainContent>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Find the latest version of a content (if any).
    pub async fn find_latest_by_content(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Option<MainContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM main_contents
             WHERE content_id = $1 AND is_latest = true"
        );
        sqlx::query_as::<_, MainContent>(&query)
            .bind(content_id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions of a content, ordered by version descending.
    pub async fn list_by_content(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Vec<MainContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM main_contents
             WHERE content_id = $1
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, MainContent>(&query)
            .bind(content_id)
            .fetch_all(pool)
            .await
    }

    /// Retire `current` and insert `successor` in one transaction.
    ///
    /// The retire step is conditional on `current` still being latest. If it
    /// matches no row the transaction is rolled back and `None` is returned.
    /// A failed insert drops the transaction, which rolls the retire back too.
    pub async fn append_successor(
        pool: &PgPool,
        current: Uuid,
        successor: &NewVersion,
    ) -> Result<Option<MainContent>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Retire the current latest (compare-and-swap on is_latest).
        let retired = sqlx::query(
            "UPDATE main_contents SET is_latest = false, next_uuid = $2 \
             WHERE uuid = $1 AND is_latest = true",
        )
        .bind(current)
        .bind(successor.uuid)
        .execute(&mut *tx)
        .await?;

        if retired.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        // Insert the successor as the new latest.
        let row = Self::insert(&mut *tx, successor).await?;

        tx.commit().await?;
        Ok(Some(row))
    }
}
