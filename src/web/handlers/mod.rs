//! Request handlers for the Web API.

pub mod auth;
pub mod file;

pub use auth::{login, logout, signup, validate};
pub use file::{delete_file, download_file, get_file_metadata, list_files, upload_file};

use crate::auth::TokenKeys;
use crate::storage::FileStorage;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (sqlx pool).
    pub db: Database,
    /// Physical file storage.
    pub storage: FileStorage,
    /// Session token keys.
    pub tokens: TokenKeys,
    /// Session cookie lifetime in seconds.
    pub cookie_max_age_secs: i64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Database,
        storage: FileStorage,
        jwt_secret: &str,
        token_expiry_days: i64,
        cookie_max_age_days: i64,
    ) -> Self {
        Self {
            db,
            storage,
            tokens: TokenKeys::new(jwt_secret, token_expiry_days),
            cookie_max_age_secs: cookie_max_age_days * 24 * 60 * 60,
        }
    }
}
