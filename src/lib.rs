//! mini-drive - minimal personal file-storage web service.
//!
//! Users register, authenticate with a stateless cookie-held session token,
//! and upload/list/download/delete files scoped to their account.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod storage;
pub mod web;

pub use auth::{hash_password, verify_password, Claims, PasswordError, TokenError, TokenKeys};
pub use config::Config;
pub use db::{Database, FileRecord, FileRepository, NewFileRecord, NewUser, User, UserRepository};
pub use error::{DriveError, Result};
pub use storage::FileStorage;
pub use web::WebServer;
