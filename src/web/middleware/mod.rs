//! Middleware for the Web API.

pub mod auth;
pub mod cors;

pub use auth::{CurrentUser, SESSION_COOKIE};
pub use cors::create_cors_layer;
