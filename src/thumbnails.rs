use serde::Serialize;
use sqlx::{Pool, Sqlite};

use crate::database::unix_now;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CachedThumbnail {
    pub file_path: String,
    /// Base64-encoded JPEG, as produced by the media backend.
    pub data: String,
    pub created_at: i64,
}

pub struct ThumbnailStore {
    pool: Pool<Sqlite>,
}

impl ThumbnailStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Upsert keyed by path, then evict the oldest rows beyond `max_entries`
    /// (the `cacheSize` setting).
    pub async fn save_thumbnail(
        &self,
        file_path: &str,
        data: &str,
        max_entries: u64,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT OR REPLACE INTO thumbnails (file_path, data, created_at) VALUES (?, ?, ?)")
            .bind(file_path)
            .bind(data)
            .bind(unix_now())
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "DELETE FROM thumbnails WHERE file_path NOT IN
             (SELECT file_path FROM thumbnails ORDER BY created_at DESC, file_path ASC LIMIT ?)",
        )
        .bind(max_entries as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_thumbnail(&self, file_path: &str) -> Result<Option<CachedThumbnail>, AppError> {
        let thumbnail = sqlx::query_as::<_, CachedThumbnail>(
            "SELECT file_path, data, created_at FROM thumbnails WHERE file_path = ?",
        )
        .bind(file_path)
        .fetch_optional(&self.pool)
        .await?;

        Ok(thumbnail)
    }
}
