pub mod models;

use models::Bookmark;
use sqlx::{Pool, Sqlite};

use crate::database::unix_now;
use crate::errors::AppError;

pub struct BookmarksManager {
    pool: Pool<Sqlite>,
}

impl BookmarksManager {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Ids come from an AUTOINCREMENT column, so a deleted id is never
    /// handed out again.
    pub async fn add_bookmark(
        &self,
        file_path: &str,
        position: f64,
        label: Option<&str>,
    ) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO bookmarks (file_path, position, label, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(file_path)
        .bind(position)
        .bind(label)
        .bind(unix_now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_bookmarks(&self, file_path: &str) -> Result<Vec<Bookmark>, AppError> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            "SELECT id, file_path, position, label, created_at
             FROM bookmarks WHERE file_path = ? ORDER BY position ASC",
        )
        .bind(file_path)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookmarks)
    }

    pub async fn delete_bookmark(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
