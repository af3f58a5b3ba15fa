pub mod models;

use models::HistoryEntry;
use sqlx::{Pool, Sqlite};

use crate::database::unix_now;
use crate::errors::AppError;

pub struct HistoryManager {
    pool: Pool<Sqlite>,
}

impl HistoryManager {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// One row per file: replaying a file refreshes its `last_played` and
    /// resume position instead of appending.
    pub async fn record_playback(
        &self,
        file_path: &str,
        name: &str,
        media_type: Option<&str>,
        position: f64,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO history (file_path, name, media_type, last_played, last_position) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(file_path)
        .bind(name)
        .bind(media_type)
        .bind(unix_now())
        .bind(position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_recent(&self, limit: i64) -> Result<Vec<HistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            "SELECT file_path, name, media_type, last_played, last_position
             FROM history
             ORDER BY last_played DESC, file_path ASC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Resume position for the `rememberPosition` setting.
    pub async fn get_entry(&self, file_path: &str) -> Result<Option<HistoryEntry>, AppError> {
        let entry = sqlx::query_as::<_, HistoryEntry>(
            "SELECT file_path, name, media_type, last_played, last_position
             FROM history WHERE file_path = ?",
        )
        .bind(file_path)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM history").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn recent_is_most_recent_first_with_limit() {
        let dir = tempfile::tempdir().unwrap();
        let manager = HistoryManager::new(test_pool(dir.path()).await);

        // Same-second inserts tie on last_played; the path tiebreaker keeps
        // the ordering deterministic for the test.
        sqlx::query(
            "INSERT INTO history (file_path, name, last_played, last_position) VALUES
             ('/old.mp4', 'old', 100, 0),
             ('/mid.mp4', 'mid', 200, 0),
             ('/new.mp4', 'new', 300, 0)",
        )
        .execute(&manager.pool)
        .await
        .unwrap();

        let recent = manager.get_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].file_path, "/new.mp4");
        assert_eq!(recent[1].file_path, "/mid.mp4");
    }

    #[tokio::test]
    async fn replay_updates_instead_of_duplicating() {
        let dir = tempfile::tempdir().unwrap();
        let manager = HistoryManager::new(test_pool(dir.path()).await);

        manager
            .record_playback("/a.mp4", "a", Some("video"), 10.0)
            .await
            .unwrap();
        manager
            .record_playback("/a.mp4", "a", Some("video"), 42.5)
            .await
            .unwrap();

        let recent = manager.get_recent(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].last_position, 42.5);

        let entry = manager.get_entry("/a.mp4").await.unwrap().unwrap();
        assert_eq!(entry.last_position, 42.5);
        assert!(manager.get_entry("/missing.mp4").await.unwrap().is_none());
    }
}
