//! PostgreSQL implementation of the version-chain [`VersionStore`].

use async_trait::async_trait;
use roomkit_core::error::CoreError;
use roomkit_core::types::DbId;
use roomkit_core::version_chain::{ContentRef, NewVersion, VersionRecord, VersionStore};
use uuid::Uuid;

use crate::repositories::{ContentRepo, MainContentRepo};
use crate::DbPool;

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// [`VersionStore`] backed by the `contents` and `main_contents` tables.
#[derive(Clone)]
pub struct PgVersionStore {
    pool: DbPool,
}

impl PgVersionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error into the domain taxonomy.
///
/// Unique violations on `uq_*` constraints become `Conflict`; everything else
/// is a storage failure.
pub fn map_db_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Version store database error");
    CoreError::Storage(err.to_string())
}

#[async_trait]
impl VersionStore for PgVersionStore {
    async fn find_content(&self, id: DbId) -> Result<Option<ContentRef>, CoreError> {
        let content = ContentRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_db_error)?;
        Ok(content.map(ContentRef::from))
    }

    async fn find_version(&self, uuid: Uuid) -> Result<Option<VersionRecord>, CoreError> {
        let row = MainContentRepo::find_by_uuid(&self.pool, uuid)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(VersionRecord::from))
    }

    async fn find_latest(&self, content_id: DbId) -> Result<Option<VersionRecord>, CoreError> {
        let row = MainContentRepo::find_latest_by_content(&self.pool, content_id)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(VersionRecord::from))
    }

    async fn list_versions(&self, content_id: DbId) -> Result<Vec<VersionRecord>, CoreError> {
        let rows = MainContentRepo::list_by_content(&self.pool, content_id)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(VersionRecord::from).collect())
    }

    async fn insert_initial(&self, version: &NewVersion) -> Result<VersionRecord, CoreError> {
        let row = MainContentRepo::insert(&self.pool, version)
            .await
            .map_err(map_db_error)?;
        Ok(row.into())
    }

    async fn append_successor(
        &self,
        current: Uuid,
        successor: &NewVersion,
    ) -> Result<Option<VersionRecord>, CoreError> {
        let row = MainContentRepo::append_successor(&self.pool, current, successor)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(VersionRecord::from))
    }
}
