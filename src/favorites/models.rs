use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub file_path: String,
    pub name: String,
    pub media_type: Option<String>,
    pub added_at: i64,
}
