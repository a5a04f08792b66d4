//! In-memory [`VersionStore`] used by the manager's unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::record::{ContentRef, NewVersion, VersionRecord};
use super::store::VersionStore;
use crate::error::CoreError;
use crate::types::DbId;

#[derive(Default)]
struct State {
    contents: HashMap<DbId, ContentRef>,
    versions: Vec<VersionRecord>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub async fn add_content(&self, id: DbId, title: &str, image: Option<&str>) {
        self.state.lock().await.contents.insert(
            id,
            ContentRef {
                id,
                title: title.to_string(),
                image: image.map(str::to_string),
            },
        );
    }

    /// Snapshot of every stored version, in insertion order.
    pub async fn all_versions(&self) -> Vec<VersionRecord> {
        self.state.lock().await.versions.clone()
    }

    /// Overwrite pointers outside the manager, to simulate corrupted data.
    pub async fn set_pointers(&self, uuid: Uuid, prev: Option<Uuid>, next: Option<Uuid>) {
        let mut state = self.state.lock().await;
        if let Some(record) = state.versions.iter_mut().find(|r| r.uuid == uuid) {
            record.prev_uuid = prev;
            record.next_uuid = next;
        }
    }

    /// Remove a version outright, leaving dangling pointers behind.
    pub async fn remove_version(&self, uuid: Uuid) {
        self.state.lock().await.versions.retain(|r| r.uuid != uuid);
    }
}

fn materialize(version: &NewVersion) -> VersionRecord {
    let now = chrono::Utc::now();
    VersionRecord {
        uuid: version.uuid,
        title: version.title.clone(),
        body: version.body.clone(),
        image: version.image.clone(),
        content_id: version.content_id,
        prev_uuid: version.prev_uuid,
        next_uuid: None,
        version: version.version,
        is_latest: true,
        user_id: version.user_id,
        created_at: now,
        updated_at: now,
    }
}

fn check_unique(state: &State, version: &NewVersion) -> Result<(), CoreError> {
    if state.versions.iter().any(|r| r.uuid == version.uuid) {
        return Err(CoreError::Conflict("uq_main_contents_uuid".into()));
    }
    Ok(())
}

#[async_trait]
impl VersionStore for InMemoryStore {
    async fn find_content(&self, id: DbId) -> Result<Option<ContentRef>, CoreError> {
        Ok(self.state.lock().await.contents.get(&id).cloned())
    }

    async fn find_version(&self, uuid: Uuid) -> Result<Option<VersionRecord>, CoreError> {
        let state = self.state.lock().await;
        Ok(state.versions.iter().find(|r| r.uuid == uuid).cloned())
    }

    async fn find_latest(&self, content_id: DbId) -> Result<Option<VersionRecord>, CoreError> {
        let state = self.state.lock().await;
        Ok(state
            .versions
            .iter()
            .find(|r| r.content_id == Some(content_id) && r.is_latest)
            .cloned())
    }

    async fn list_versions(&self, content_id: DbId) -> Result<Vec<VersionRecord>, CoreError> {
        let state = self.state.lock().await;
        let mut records: Vec<_> = state
            .versions
            .iter()
            .filter(|r| r.content_id == Some(content_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(records)
    }

    async fn insert_initial(&self, version: &NewVersion) -> Result<VersionRecord, CoreError> {
        let mut state = self.state.lock().await;
        check_unique(&state, version)?;
        if state
            .versions
            .iter()
            .any(|r| r.content_id == version.content_id && r.is_latest)
        {
            return Err(CoreError::Conflict("uq_main_contents_latest".into()));
        }
        let record = materialize(version);
        state.versions.push(record.clone());
        Ok(record)
    }

    async fn append_successor(
        &self,
        current: Uuid,
        successor: &NewVersion,
    ) -> Result<Option<VersionRecord>, CoreError> {
        let mut state = self.state.lock().await;
        check_unique(&state, successor)?;
        let Some(predecessor) = state
            .versions
            .iter_mut()
            .find(|r| r.uuid == current && r.is_latest)
        else {
            return Ok(None);
        };
        predecessor.is_latest = false;
        predecessor.next_uuid = Some(successor.uuid);
        predecessor.updated_at = chrono::Utc::now();

        let record = materialize(successor);
        state.versions.push(record.clone());
        Ok(Some(record))
    }
}
