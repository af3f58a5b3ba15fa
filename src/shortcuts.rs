use serde::Serialize;
use sqlx::{Pool, Row, Sqlite};

use crate::database::unix_now;
use crate::errors::AppError;

/// A user keybinding, keyed by the action it triggers. `keys` is the
/// UI-defined chord description (e.g. `["Ctrl", "ArrowRight"]`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub action: String,
    pub keys: serde_json::Value,
    pub updated_at: i64,
}

pub struct ShortcutsManager {
    pool: Pool<Sqlite>,
}

fn shortcut_from_row(row: sqlx::sqlite::SqliteRow) -> Shortcut {
    let raw: String = row.get("keys");
    Shortcut {
        action: row.get("action"),
        keys: serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null),
        updated_at: row.get("updated_at"),
    }
}

impl ShortcutsManager {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn save_shortcut(
        &self,
        action: &str,
        keys: &serde_json::Value,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT OR REPLACE INTO shortcuts (action, keys, updated_at) VALUES (?, ?, ?)")
            .bind(action)
            .bind(serde_json::to_string(keys)?)
            .bind(unix_now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn get_shortcut(&self, action: &str) -> Result<Option<Shortcut>, AppError> {
        let row = sqlx::query("SELECT action, keys, updated_at FROM shortcuts WHERE action = ?")
            .bind(action)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(shortcut_from_row))
    }

    pub async fn get_shortcuts(&self) -> Result<Vec<Shortcut>, AppError> {
        let rows = sqlx::query("SELECT action, keys, updated_at FROM shortcuts ORDER BY action ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(shortcut_from_row).collect())
    }
}
