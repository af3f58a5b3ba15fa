use serde::Serialize;
use sqlx::{Pool, Row, Sqlite};

use crate::database::unix_now;
use crate::errors::AppError;

/// A named bundle of playback options (speed, filters, subtitle styling and
/// the like) the UI can apply in one step. The payload is opaque JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackProfile {
    pub name: String,
    pub settings: serde_json::Value,
    pub created_at: i64,
}

pub struct ProfilesManager {
    pool: Pool<Sqlite>,
}

fn profile_from_row(row: sqlx::sqlite::SqliteRow) -> PlaybackProfile {
    let raw: String = row.get("settings");
    PlaybackProfile {
        name: row.get("name"),
        settings: serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null),
        created_at: row.get("created_at"),
    }
}

impl ProfilesManager {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn save_profile(
        &self,
        name: &str,
        settings: &serde_json::Value,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT OR REPLACE INTO profiles (name, settings, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(serde_json::to_string(settings)?)
            .bind(unix_now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn get_profile(&self, name: &str) -> Result<Option<PlaybackProfile>, AppError> {
        let row = sqlx::query("SELECT name, settings, created_at FROM profiles WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(profile_from_row))
    }

    pub async fn get_profiles(&self) -> Result<Vec<PlaybackProfile>, AppError> {
        let rows = sqlx::query("SELECT name, settings, created_at FROM profiles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(profile_from_row).collect())
    }

    pub async fn delete_profile(&self, name: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM profiles WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use serde_json::json;

    #[tokio::test]
    async fn save_get_overwrite_delete() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ProfilesManager::new(test_pool(dir.path()).await);

        manager
            .save_profile("night", &json!({"speed": 1.25, "volume": 40}))
            .await
            .unwrap();
        manager
            .save_profile("night", &json!({"speed": 1.5}))
            .await
            .unwrap();

        let profile = manager.get_profile("night").await.unwrap().unwrap();
        assert_eq!(profile.settings["speed"], json!(1.5));
        assert!(profile.settings.get("volume").is_none());

        assert_eq!(manager.get_profiles().await.unwrap().len(), 1);

        manager.delete_profile("night").await.unwrap();
        assert!(manager.get_profile("night").await.unwrap().is_none());
    }
}
