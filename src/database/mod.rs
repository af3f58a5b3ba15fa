use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use tauri::{AppHandle, Manager};

use crate::errors::AppError;

/// Seconds since the epoch, the timestamp stored in every record table.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub struct DatabaseManager {
    pub pool: Pool<Sqlite>,
}

impl DatabaseManager {
    pub async fn new(app_handle: &AppHandle) -> Result<Self, AppError> {
        let app_dir = app_handle
            .path()
            .app_data_dir()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Self::connect(&app_dir.join("pulse.db")).await
    }

    /// Open (creating if necessary) the database at `db_path` and apply the
    /// schema. Split out of `new` so tests can point at a scratch file.
    pub async fn connect(db_path: &Path) -> Result<Self, AppError> {
        log::info!("Connecting to database at: {:?}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(
                sqlx::sqlite::SqliteConnectOptions::new()
                    .filename(db_path)
                    .create_if_missing(true),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        let schema = include_str!("schema.sql");

        for statement in schema.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt).execute(&pool).await.map_err(|e| {
                    AppError::Database(format!(
                        "Failed to execute schema statement '{}': {}",
                        stmt, e
                    ))
                })?;
            }
        }

        Ok(Self { pool })
    }
}

#[cfg(test)]
pub(crate) async fn test_pool(dir: &Path) -> Pool<Sqlite> {
    DatabaseManager::connect(&dir.join("test.db"))
        .await
        .unwrap()
        .pool
}
