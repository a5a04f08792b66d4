//! The version-chain manager for main contents.
//!
//! Every edit of a content's main body produces a new immutable
//! [`VersionRecord`]. Records of one content form a doubly linked chain
//! (`prev_uuid` / `next_uuid`) ordered by `version`, and exactly one record per
//! content carries `is_latest = true`.
//!
//! [`VersionChain`] owns the rules; storage is injected as a [`VersionStore`].

mod record;
mod store;

#[cfg(test)]
mod memory;

use std::collections::HashSet;

use uuid::Uuid;

pub use record::{ContentRef, NewChain, NewVersion, VersionPatch, VersionRecord};
pub use store::VersionStore;

use crate::error::CoreError;
use crate::main_content::{parse_optional_uuid, validate_title, ContentBody, Direction};
use crate::types::DbId;

/// Entity name used in not-found errors for versions.
pub const ENTITY_VERSION: &str = "MainContent";

/// Entity name used in not-found errors for a content without any version.
pub const ENTITY_CHAIN: &str = "MainContentChain";

/// Entity name used in not-found errors for the base content.
pub const ENTITY_CONTENT: &str = "Content";

/// Creates, appends to, and walks version chains.
pub struct VersionChain<S> {
    store: S,
}

impl<S: VersionStore> VersionChain<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The injected store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start the chain for a content with its first version.
    ///
    /// Title and image fall back to the content's own values. A `prev_uuid`
    /// that is well-formed but unknown is dropped instead of failing the call.
    pub async fn create_initial(
        &self,
        input: NewChain,
        user_id: Option<DbId>,
    ) -> Result<VersionRecord, CoreError> {
        let content = self
            .store
            .find_content(input.content_id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY_CONTENT, input.content_id))?;

        let requested_uuid = parse_optional_uuid(input.uuid.as_deref(), "uuid")?;
        let prev_uuid = self.resolve_prev_uuid(input.prev_uuid.as_deref()).await?;

        let title = input
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(content.title);
        validate_title(&title)?;
        let image = input.image.filter(|i| !i.is_empty()).or(content.image);

        if let Some(latest) = self.store.find_latest(content.id).await? {
            return Err(CoreError::Conflict(format!(
                "Content {} already has a version chain (latest {} at version {}); append to it instead",
                content.id, latest.uuid, latest.version
            )));
        }

        let uuid = match requested_uuid {
            Some(uuid) => {
                if self.store.find_version(uuid).await?.is_some() {
                    return Err(CoreError::Conflict(format!(
                        "A version with uuid {uuid} already exists"
                    )));
                }
                uuid
            }
            None => Uuid::new_v4(),
        };

        let record = self
            .store
            .insert_initial(&NewVersion {
                uuid,
                title,
                body: input.body,
                image,
                content_id: Some(content.id),
                prev_uuid,
                version: 1,
                user_id,
            })
            .await?;

        tracing::info!(
            uuid = %record.uuid,
            content_id = content.id,
            prev_uuid = ?record.prev_uuid,
            "Created initial main content version"
        );
        Ok(record)
    }

    /// Append a new version after `current_uuid`, which must be the latest.
    ///
    /// Fields missing from `patch` are copied from the current version, and so
    /// are empty strings. Losing a race against another append on the same
    /// version yields `Conflict`.
    pub async fn append(
        &self,
        current_uuid: Uuid,
        patch: VersionPatch,
        user_id: Option<DbId>,
    ) -> Result<VersionRecord, CoreError> {
        let current = self.get_by_uuid(current_uuid).await?;
        if !current.is_latest {
            return Err(CoreError::Conflict(format!(
                "Version {current_uuid} (version {}) is not the latest; fetch the latest version and retry",
                current.version
            )));
        }
        let title = patch.title.filter(|t| !t.trim().is_empty());
        if let Some(title) = &title {
            validate_title(title)?;
        }
        let image = patch.image.filter(|i| !i.is_empty());
        let body = patch
            .body
            .filter(|b| !matches!(b, ContentBody::Text(text) if text.is_empty()));

        let version = current.version.checked_add(1).ok_or_else(|| {
            CoreError::Conflict(format!("Version counter exhausted after {current_uuid}"))
        })?;

        let successor = NewVersion {
            uuid: Uuid::new_v4(),
            title: title.unwrap_or_else(|| current.title.clone()),
            body: body.or_else(|| current.body.clone()),
            image: image.or_else(|| current.image.clone()),
            content_id: current.content_id,
            prev_uuid: Some(current.uuid),
            version,
            user_id,
        };

        match self.store.append_successor(current.uuid, &successor).await? {
            Some(record) => {
                tracing::info!(
                    uuid = %record.uuid,
                    prev_uuid = %current_uuid,
                    version = record.version,
                    "Appended main content version"
                );
                Ok(record)
            }
            None => {
                tracing::warn!(uuid = %current_uuid, "Append lost race; version already superseded");
                Err(CoreError::Conflict(format!(
                    "Version {current_uuid} was superseded by a concurrent update; fetch the latest version and retry"
                )))
            }
        }
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<VersionRecord, CoreError> {
        self.store
            .find_version(uuid)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY_VERSION, uuid))
    }

    pub async fn get_latest(&self, content_id: DbId) -> Result<VersionRecord, CoreError> {
        self.store
            .find_latest(content_id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY_CHAIN, content_id))
    }

    /// All versions of a content, newest first. Empty when none exist.
    pub async fn list_versions(&self, content_id: DbId) -> Result<Vec<VersionRecord>, CoreError> {
        let versions = self.store.list_versions(content_id).await?;
        tracing::debug!(content_id, count = versions.len(), "Listed main content versions");
        Ok(versions)
    }

    /// Walk the chain from `start` along `direction`, start record included.
    ///
    /// Stops at a null pointer, at a pointer that no longer resolves, or at a
    /// uuid already visited.
    pub async fn history(
        &self,
        start: Uuid,
        direction: Direction,
    ) -> Result<Vec<VersionRecord>, CoreError> {
        let first = self.get_by_uuid(start).await?;
        let mut pointer = follow(&first, direction);
        let mut seen = HashSet::from([first.uuid]);
        let mut records = vec![first];

        while let Some(uuid) = pointer {
            if !seen.insert(uuid) {
                tracing::warn!(%start, %uuid, %direction, "Version chain loops back; stopping traversal");
                break;
            }
            match self.store.find_version(uuid).await? {
                Some(record) => {
                    pointer = follow(&record, direction);
                    records.push(record);
                }
                None => {
                    tracing::warn!(%start, %uuid, %direction, "Dangling version pointer; stopping traversal");
                    break;
                }
            }
        }

        tracing::debug!(%start, %direction, count = records.len(), "Walked version history");
        Ok(records)
    }

    async fn resolve_prev_uuid(&self, raw: Option<&str>) -> Result<Option<Uuid>, CoreError> {
        let Some(prev) = parse_optional_uuid(raw, "prevUuid")? else {
            return Ok(None);
        };
        if self.store.find_version(prev).await?.is_some() {
            Ok(Some(prev))
        } else {
            tracing::warn!(prev_uuid = %prev, "Previous version not found; storing null prevUuid");
            Ok(None)
        }
    }
}

fn follow(record: &VersionRecord, direction: Direction) -> Option<Uuid> {
    match direction {
        Direction::Prev => record.prev_uuid,
        Direction::Next => record.next_uuid,
    }
}

/// Check the chain invariants over every record of one content.
///
/// Versions must run `1..=n` without gaps, neighbours must point at each
/// other, and exactly the highest version must be latest. The first record's
/// `prev_uuid` is not checked since initial creation may keep a foreign one.
pub fn verify_chain(records: &[VersionRecord]) -> Result<(), CoreError> {
    let broken = |msg: String| Err(CoreError::Validation(msg));

    let mut sorted: Vec<&VersionRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.version);
    let Some(last) = sorted.last() else {
        return Ok(());
    };

    let content_id = sorted[0].content_id;
    let mut uuids = HashSet::new();
    for (index, record) in sorted.iter().enumerate() {
        if record.content_id != content_id {
            return broken(format!("Record {} belongs to another content", record.uuid));
        }
        if !uuids.insert(record.uuid) {
            return broken(format!("Duplicate uuid {}", record.uuid));
        }
        let expected = index as i32 + 1;
        if record.version != expected {
            return broken(format!(
                "Expected version {expected}, found {} at {}",
                record.version, record.uuid
            ));
        }
    }

    for pair in sorted.windows(2) {
        let (older, newer) = (pair[0], pair[1]);
        if older.next_uuid != Some(newer.uuid) || newer.prev_uuid != Some(older.uuid) {
            return broken(format!(
                "Versions {} and {} are not linked to each other",
                older.version, newer.version
            ));
        }
    }

    if last.next_uuid.is_some() {
        return broken(format!("Newest version {} has a successor pointer", last.uuid));
    }
    let latest: Vec<_> = sorted.iter().filter(|r| r.is_latest).collect();
    if latest.len() != 1 || latest[0].uuid != last.uuid {
        return broken(format!(
            "Expected only version {} to be latest, found {} latest records",
            last.version,
            latest.len()
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
