//! Records and inputs of the version chain.

use serde::Serialize;
use uuid::Uuid;

use crate::main_content::ContentBody;
use crate::types::{DbId, Timestamp};

/// One immutable snapshot of a content's main body.
///
/// Serialized with camelCase keys; the body travels under `content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub uuid: Uuid,
    pub title: String,
    #[serde(rename = "content")]
    pub body: Option<ContentBody>,
    pub image: Option<String>,
    pub content_id: Option<DbId>,
    pub prev_uuid: Option<Uuid>,
    pub next_uuid: Option<Uuid>,
    pub version: i32,
    pub is_latest: bool,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The base content a chain attaches to, as seen by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef {
    pub id: DbId,
    pub title: String,
    pub image: Option<String>,
}

/// Input for starting a chain.
///
/// `uuid` and `prev_uuid` are the raw client strings; sentinel values such as
/// `"null"` are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct NewChain {
    pub content_id: DbId,
    pub title: Option<String>,
    pub body: Option<ContentBody>,
    pub image: Option<String>,
    pub uuid: Option<String>,
    pub prev_uuid: Option<String>,
}

/// Fields to change when appending a version. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct VersionPatch {
    pub title: Option<String>,
    pub body: Option<ContentBody>,
    pub image: Option<String>,
}

/// A fully resolved row ready to be inserted by a [`super::VersionStore`].
///
/// `next_uuid` is always null and `is_latest` always true for a fresh row, so
/// neither is carried here.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVersion {
    pub uuid: Uuid,
    pub title: String,
    pub body: Option<ContentBody>,
    pub image: Option<String>,
    pub content_id: Option<DbId>,
    pub prev_uuid: Option<Uuid>,
    pub version: i32,
    pub user_id: Option<DbId>,
}
