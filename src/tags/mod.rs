pub mod models;

use models::{Tag, TagAssignment};
use sqlx::{Pool, Sqlite};

use crate::database::unix_now;
use crate::errors::AppError;

pub struct TagsManager {
    pool: Pool<Sqlite>,
}

impl TagsManager {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Tag names are unique; creating a duplicate is a Database error.
    pub async fn create_tag(&self, name: &str) -> Result<i64, AppError> {
        let result = sqlx::query("INSERT INTO tags (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(unix_now())
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_tags(&self) -> Result<Vec<Tag>, AppError> {
        let tags =
            sqlx::query_as::<_, Tag>("SELECT id, name, created_at FROM tags ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(tags)
    }

    pub async fn delete_tag(&self, tag_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tag_files WHERE tag_id = ?")
            .bind(tag_id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(tag_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn assign_tag(&self, file_path: &str, tag_id: i64) -> Result<i64, AppError> {
        let result =
            sqlx::query("INSERT INTO tag_files (tag_id, file_path, added_at) VALUES (?, ?, ?)")
                .bind(tag_id)
                .bind(file_path)
                .bind(unix_now())
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn unassign_tag(&self, file_path: &str, tag_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tag_files WHERE tag_id = ? AND file_path = ?")
            .bind(tag_id)
            .bind(file_path)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn files_for_tag(&self, tag_id: i64) -> Result<Vec<TagAssignment>, AppError> {
        let assignments = sqlx::query_as::<_, TagAssignment>(
            "SELECT id, tag_id, file_path, added_at FROM tag_files WHERE tag_id = ?",
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn tags_for_file(&self, file_path: &str) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.created_at
             FROM tags t
             JOIN tag_files tf ON tf.tag_id = t.id
             WHERE tf.file_path = ?
             ORDER BY t.name ASC",
        )
        .bind(file_path)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn assignment_joins_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TagsManager::new(test_pool(dir.path()).await);

        let action = manager.create_tag("action").await.unwrap();
        let seen = manager.create_tag("seen").await.unwrap();

        manager.assign_tag("/a.mp4", action).await.unwrap();
        manager.assign_tag("/b.mp4", action).await.unwrap();
        manager.assign_tag("/a.mp4", seen).await.unwrap();

        let action_files = manager.files_for_tag(action).await.unwrap();
        assert_eq!(action_files.len(), 2);

        let a_tags = manager.tags_for_file("/a.mp4").await.unwrap();
        let names: Vec<&str> = a_tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["action", "seen"]);
    }

    #[tokio::test]
    async fn duplicate_tag_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TagsManager::new(test_pool(dir.path()).await);

        manager.create_tag("watch-later").await.unwrap();
        let err = manager.create_tag("watch-later").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn deleting_a_tag_drops_its_assignments() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TagsManager::new(test_pool(dir.path()).await);

        let tag = manager.create_tag("temp").await.unwrap();
        manager.assign_tag("/a.mp4", tag).await.unwrap();
        manager.delete_tag(tag).await.unwrap();

        assert!(manager.files_for_tag(tag).await.unwrap().is_empty());
        assert!(manager.tags_for_file("/a.mp4").await.unwrap().is_empty());
    }
}
