//! Response DTOs for the Web API.

use serde::Serialize;

use crate::db::{FileRecord, User};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Plain acknowledgment message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Current user in responses (never includes the password hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// When the account was created.
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at.clone(),
        }
    }
}

/// A stored file in responses.
#[derive(Debug, Serialize)]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// Original filename.
    pub original_name: String,
    /// On-disk storage name.
    pub storage_name: String,
    /// Content type.
    pub content_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// When the file was uploaded.
    pub created_at: String,
}

impl From<&FileRecord> for FileResponse {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id,
            original_name: record.original_name.clone(),
            storage_name: record.stored_name.clone(),
            content_type: record.content_type.clone(),
            size: record.size,
            user_id: record.user_id,
            created_at: record.created_at.clone(),
        }
    }
}

/// File metadata descriptor (GET /files/:id/metadata).
#[derive(Debug, Serialize)]
pub struct FileMetadataResponse {
    /// File ID.
    pub id: i64,
    /// Original filename.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// Content type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// When the file was uploaded.
    pub created_at: String,
    /// Relative download URL.
    pub download_url: String,
}

impl From<&FileRecord> for FileMetadataResponse {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id,
            name: record.original_name.clone(),
            size: record.size,
            content_type: record.content_type.clone(),
            created_at: record.created_at.clone(),
            download_url: format!("/files/{}", record.id),
        }
    }
}
