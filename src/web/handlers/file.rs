//! File handlers: upload, list, download, delete, metadata.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::Response,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{FileRecord, FileRepository, NewFileRecord};
use crate::storage::FileStorage;
use crate::web::dto::{ApiResponse, FileMetadataResponse, FileResponse, MessageResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// Maximum accepted upload size: 5 MiB.
pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

/// Accepted file extensions. Matching is by extension string only; file
/// content is not inspected.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".png", ".pdf"];

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Sanitizes the filename to prevent header injection and uses RFC 5987
/// encoding for non-ASCII filenames.
fn content_disposition_header(filename: &str) -> String {
    // ASCII fallback with control characters removed
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' => '_',
            '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{filename}\"");
    }

    let encoded = urlencoding::encode(filename);

    format!("attachment; filename=\"{sanitized}\"; filename*=UTF-8''{encoded}")
}

/// Fetch a record via the ownership-scoped lookup and require its disk
/// object to exist.
///
/// Both failure modes, including a record owned by someone else, collapse
/// into the same NotFound so the endpoint leaks nothing about other users'
/// files.
async fn find_owned_on_disk(
    state: &AppState,
    file_id: i64,
    user_id: i64,
) -> Result<FileRecord, ApiError> {
    let record = FileRepository::new(state.db.pool())
        .get_owned(file_id, user_id)
        .await
        .map_err(|e| {
            tracing::error!("File lookup failed: {}", e);
            ApiError::internal("Failed to look up file")
        })?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    if !state.storage.exists(&record.stored_name) {
        tracing::warn!(
            "File record {} has no disk object {}",
            record.id,
            record.stored_name
        );
        return Err(ApiError::not_found("File not found"));
    }

    Ok(record)
}

/// POST /files - Upload a file.
///
/// Request body: multipart/form-data with a single "file" field.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    // Extract the file part from the multipart body
    let mut original_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        if field.name() != Some("file") {
            continue;
        }

        original_name = field.file_name().map(|s| s.to_string());
        content_type = field.content_type().map(|s| s.to_string());
        content = Some(
            field
                .bytes()
                .await
                .map_err(|e| {
                    tracing::debug!("Failed to read file content: {}", e);
                    ApiError::bad_request("Failed to read file")
                })?
                .to_vec(),
        );
        // First "file" field wins; any repeats are ignored.
        break;
    }

    let original_name = original_name.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    if content.len() > MAX_UPLOAD_SIZE {
        return Err(ApiError::bad_request("File size is too large"));
    }

    let ext = FileStorage::extension(&original_name);
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ApiError::bad_request("Invalid file type"));
    }

    // Disk write first, DB insert second. The two steps are not atomic.
    let file_uuid = Uuid::new_v4().to_string();
    let stored_name = format!("{file_uuid}{ext}");

    state.storage.save(&content, &stored_name).map_err(|e| {
        tracing::error!("Failed to store uploaded file: {}", e);
        ApiError::internal("Could not save the file")
    })?;

    let new_record = NewFileRecord {
        original_name: original_name.clone(),
        stored_name: stored_name.clone(),
        content_type: content_type
            .unwrap_or_else(|| "application/octet-stream".to_string()),
        size: content.len() as i64,
        user_id: user.id,
        file_uuid,
    };

    let record = FileRepository::new(state.db.pool())
        .create(&new_record)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create file record: {}", e);
            // Best-effort cleanup of the just-written disk object
            let _ = state.storage.delete(&stored_name);
            ApiError::internal("Failed to save file record")
        })?;

    Ok(Json(ApiResponse::new(FileResponse::from(&record))))
}

/// GET /files - List the caller's files.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, ApiError> {
    let records = FileRepository::new(state.db.pool())
        .list_by_owner(user.id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list files: {}", e);
            ApiError::internal("Failed to fetch files")
        })?;

    let responses = records.iter().map(FileResponse::from).collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /files/:id - Download a file.
///
/// The response suggests the original filename, not the storage name.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(file_id): Path<i64>,
) -> Result<Response<Body>, ApiError> {
    let record = find_owned_on_disk(&state, file_id, user.id).await?;

    let content = state.storage.load(&record.stored_name).map_err(|e| {
        tracing::error!("Failed to load file: {}", e);
        ApiError::not_found("File not found")
    })?;

    let content_type = if record.content_type.is_empty() {
        mime_guess::from_path(&record.original_name)
            .first_or_octet_stream()
            .to_string()
    } else {
        record.content_type.clone()
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&record.original_name),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

/// DELETE /files/:id - Delete a file.
///
/// Disk removal happens first; the record is kept if it fails, so a disk
/// error never silently orphans metadata.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(file_id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let record = find_owned_on_disk(&state, file_id, user.id).await?;

    state.storage.delete(&record.stored_name).map_err(|e| {
        tracing::error!("Failed to delete file from disk: {}", e);
        ApiError::internal("Failed to delete file")
    })?;

    FileRepository::new(state.db.pool())
        .delete(record.id)
        .await
        .map_err(|e| {
            // Disk object is already gone; the record now points at nothing
            // and later lookups will report NotFound.
            tracing::error!("Failed to delete file record {}: {}", record.id, e);
            ApiError::internal("Failed to delete file record")
        })?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "File deleted successfully",
    ))))
}

/// GET /files/:id/metadata - Get file metadata.
pub async fn get_file_metadata(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(file_id): Path<i64>,
) -> Result<Json<ApiResponse<FileMetadataResponse>>, ApiError> {
    let record = find_owned_on_disk(&state, file_id, user.id).await?;

    Ok(Json(ApiResponse::new(FileMetadataResponse::from(&record))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_header_simple_ascii() {
        let result = content_disposition_header("document.pdf");
        assert_eq!(result, "attachment; filename=\"document.pdf\"");
    }

    #[test]
    fn test_content_disposition_header_with_spaces() {
        let result = content_disposition_header("my document.pdf");
        assert_eq!(result, "attachment; filename=\"my document.pdf\"");
    }

    #[test]
    fn test_content_disposition_header_non_ascii() {
        let result = content_disposition_header("日本語ファイル.pdf");
        assert!(result.starts_with("attachment; filename=\""));
        assert!(result.contains("filename*=UTF-8''"));
    }

    #[test]
    fn test_content_disposition_header_double_quote() {
        let result = content_disposition_header("test\"file.pdf");
        assert!(result.contains("filename=\"test_file.pdf\""));
        assert!(result.contains("filename*=UTF-8''"));
    }

    #[test]
    fn test_content_disposition_header_control_characters() {
        // Header injection attempt
        let result = content_disposition_header("test\r\nX-Injected: bad.pdf");
        assert!(!result.contains('\r'));
        assert!(!result.contains('\n'));
        assert!(result.starts_with("attachment; filename="));
    }

    #[test]
    fn test_allowed_extensions_exact_match() {
        assert!(ALLOWED_EXTENSIONS.contains(&".jpg"));
        assert!(ALLOWED_EXTENSIONS.contains(&".png"));
        assert!(ALLOWED_EXTENSIONS.contains(&".pdf"));
        // Case-sensitive string match, as documented
        assert!(!ALLOWED_EXTENSIONS.contains(&".JPG"));
        assert!(!ALLOWED_EXTENSIONS.contains(&".exe"));
    }

    #[test]
    fn test_max_upload_size() {
        assert_eq!(MAX_UPLOAD_SIZE, 5 * 1024 * 1024);
    }
}
