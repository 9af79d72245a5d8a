//! Authentication primitives for mini-drive.
//!
//! Password hashing (Argon2id) and stateless session tokens (HS256 JWT).

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Claims, TokenError, TokenKeys, TOKEN_ISSUER};
