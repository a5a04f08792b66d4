//! Persistence interface consumed by [`super::VersionChain`].

use async_trait::async_trait;
use uuid::Uuid;

use super::record::{ContentRef, NewVersion, VersionRecord};
use crate::error::CoreError;
use crate::types::DbId;

/// Storage operations the version-chain manager depends on.
///
/// Implementations map their own failures to [`CoreError::Storage`], or to
/// [`CoreError::Conflict`] when a uniqueness rule rejects a write.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Look up the base content a chain belongs to.
    async fn find_content(&self, id: DbId) -> Result<Option<ContentRef>, CoreError>;

    /// Look up a single version by uuid.
    async fn find_version(&self, uuid: Uuid) -> Result<Option<VersionRecord>, CoreError>;

    /// The record with `is_latest = true` for a content, if any.
    async fn find_latest(&self, content_id: DbId) -> Result<Option<VersionRecord>, CoreError>;

    /// Every version of a content, ordered by `version` descending.
    async fn list_versions(&self, content_id: DbId) -> Result<Vec<VersionRecord>, CoreError>;

    /// Insert the head of a new chain.
    async fn insert_initial(&self, version: &NewVersion) -> Result<VersionRecord, CoreError>;

    /// Atomically retire `current` and insert `successor` as the new latest.
    ///
    /// The retire step must only match while `current` is still latest. When
    /// it matches nothing, nothing is written and `Ok(None)` is returned.
    async fn append_successor(
        &self,
        current: Uuid,
        successor: &NewVersion,
    ) -> Result<Option<VersionRecord>, CoreError>;
}
