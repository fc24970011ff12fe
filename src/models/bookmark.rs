use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkModel {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBookmark {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}
