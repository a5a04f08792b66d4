//! Main-content version row model.
//!
//! The `body` column holds text; [`ContentBody`] decoding happens only when a
//! row is turned into a [`VersionRecord`].

use roomkit_core::main_content::ContentBody;
use roomkit_core::types::{DbId, Timestamp};
use roomkit_core::version_chain::VersionRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `main_contents` table.
#[derive(Debug, Clone, FromRow)]
pub struct MainContent {
    pub id: DbId,
    pub uuid: Uuid,
    pub title: String,
    pub body: Option<String>,
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

impl From<MainContent> for VersionRecord {
    fn from(row: MainContent) -> Self {
        VersionRecord {
            uuid: row.uuid,
            title: row.title,
            body: row.body.map(ContentBody::decode),
            image: row.image,
            content_id: row.content_id,
            prev_uuid: row.prev_uuid,
            next_uuid: row.next_uuid,
            version: row.version,
            is_latest: row.is_latest,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
