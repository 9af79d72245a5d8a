//! File metadata model and repository for mini-drive.
//!
//! One row per stored file, owned by a user. Rows are created on upload,
//! deleted on delete, and never mutated in between.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::{DriveError, Result};

/// Metadata for a stored file.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FileRecord {
    /// Unique file ID.
    pub id: i64,
    /// Original filename as supplied by the uploader.
    pub original_name: String,
    /// Server-generated on-disk name (`<uuid><original extension>`).
    pub stored_name: String,
    /// Content type reported at upload time.
    pub content_type: String,
    /// File size in bytes.
    pub size: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// The random identifier used to build the stored name.
    pub file_uuid: String,
    /// When the file was uploaded.
    pub created_at: String,
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// Original filename.
    pub original_name: String,
    /// Stored filename.
    pub stored_name: String,
    /// Content type.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Random identifier behind the stored name.
    pub file_uuid: String,
}

/// Repository for file metadata operations.
///
/// All single-record lookups are ownership-scoped: they filter by record id
/// AND owning user id in the same query, which is the sole authorization
/// mechanism for file access.
pub struct FileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new file record.
    pub async fn create(&self, file: &NewFileRecord) -> Result<FileRecord> {
        let result = sqlx::query(
            "INSERT INTO files (original_name, stored_name, content_type, size, user_id, file_uuid)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&file.original_name)
        .bind(&file.stored_name)
        .bind(&file.content_type)
        .bind(file.size)
        .bind(file.user_id)
        .bind(&file.file_uuid)
        .execute(self.pool)
        .await
        .map_err(|e| DriveError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DriveError::NotFound("file".to_string()))
    }

    /// Get a file record by ID, regardless of owner.
    async fn get_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT id, original_name, stored_name, content_type, size, user_id, file_uuid, created_at
             FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DriveError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a file record by ID and owning user (ownership-scoped lookup).
    ///
    /// A wrong id and a file owned by someone else are indistinguishable:
    /// both return `None`.
    pub async fn get_owned(&self, id: i64, user_id: i64) -> Result<Option<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT id, original_name, stored_name, content_type, size, user_id, file_uuid, created_at
             FROM files WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DriveError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List all files owned by a user, in insertion order.
    pub async fn list_by_owner(&self, user_id: i64) -> Result<Vec<FileRecord>> {
        let result = sqlx::query_as::<_, FileRecord>(
            "SELECT id, original_name, stored_name, content_type, size, user_id, file_uuid, created_at
             FROM files WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| DriveError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Delete a file record by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DriveError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
