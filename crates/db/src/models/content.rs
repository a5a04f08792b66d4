//! Base content entity model and DTOs.

use roomkit_core::types::{DbId, Timestamp};
use roomkit_core::version_chain::ContentRef;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: DbId,
    pub title: String,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new content.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContent {
    pub title: String,
    pub image: Option<String>,
}

/// DTO for updating a content. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContent {
    pub title: Option<String>,
    pub image: Option<String>,
}

impl From<Content> for ContentRef {
    fn from(content: Content) -> Self {
        ContentRef {
            id: content.id,
            title: content.title,
            image: content.image,
        }
    }
}
