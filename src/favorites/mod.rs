pub mod models;

use models::Favorite;
use sqlx::{Pool, Sqlite};

use crate::database::unix_now;
use crate::errors::AppError;

pub struct FavoritesManager {
    pool: Pool<Sqlite>,
}

impl FavoritesManager {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Upsert keyed by path: starring an already-starred file refreshes the
    /// stored name/type rather than duplicating.
    pub async fn add_favorite(
        &self,
        file_path: &str,
        name: &str,
        media_type: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO favorites (file_path, name, media_type, added_at) VALUES (?, ?, ?, ?)",
        )
        .bind(file_path)
        .bind(name)
        .bind(media_type)
        .bind(unix_now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove_favorite(&self, file_path: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM favorites WHERE file_path = ?")
            .bind(file_path)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn is_favorite(&self, file_path: &str) -> Result<bool, AppError> {
        let result = sqlx::query("SELECT 1 FROM favorites WHERE file_path = ?")
            .bind(file_path)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result.is_some())
    }

    pub async fn get_favorites(&self) -> Result<Vec<Favorite>, AppError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT file_path, name, media_type, added_at FROM favorites ORDER BY added_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }
}
