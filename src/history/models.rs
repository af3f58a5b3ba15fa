use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub file_path: String,
    pub name: String,
    pub media_type: Option<String>,
    pub last_played: i64,
    pub last_position: f64,
}
