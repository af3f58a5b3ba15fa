use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: i64,
    pub file_path: String,
    /// Position in the media, in seconds.
    pub position: f64,
    pub label: Option<String>,
    pub created_at: i64,
}
