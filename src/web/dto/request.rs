//! Request DTOs for the Web API.

use serde::Deserialize;

/// Signup request.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Email address.
    pub email: String,
    /// Password (plaintext in transit, hashed before storage).
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}
