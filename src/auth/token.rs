//! Stateless session tokens for mini-drive.
//!
//! Tokens are HS256-signed JWTs holding the user's identity and an expiry.
//! The server keeps no session state; each request is authenticated from
//! the token alone plus a fresh user lookup.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::User;

/// Issuer claim embedded in every token.
pub const TOKEN_ISSUER: &str = "mini-drive";

/// Session token errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Token issuance failed.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Token is malformed, expired, missing claims, or wrongly signed.
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: u64,
    /// Token issuer.
    pub iss: String,
}

/// Signing and verification keys for session tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_days: i64,
}

impl TokenKeys {
    /// Create token keys from a shared secret.
    pub fn new(secret: &str, expiry_days: i64) -> Self {
        // HS256 only: a token signed with any other algorithm family is
        // rejected outright. exp is a required claim.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_days,
        }
    }

    /// Issue a signed session token for a user.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let exp = Utc::now() + Duration::days(self.expiry_days);
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            exp: exp.timestamp() as u64,
            iss: TOKEN_ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a session token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 42,
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password: "hash".to_string(),
            created_at: "2026-01-01 00:00:00".to_string(),
        }
    }

    fn sign_claims(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = TokenKeys::new("test-secret", 7);
        let token = keys.issue(&test_user()).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.username, "tester");
        assert_eq!(claims.email, "tester@example.com");
        assert_eq!(claims.iss, TOKEN_ISSUER);
    }

    #[test]
    fn test_expiry_is_seven_days() {
        let keys = TokenKeys::new("test-secret", 7);
        let token = keys.issue(&test_user()).unwrap();
        let claims = keys.verify(&token).unwrap();

        let expected = (Utc::now() + Duration::days(7)).timestamp() as u64;
        // Allow a couple of seconds of slack between issue and check.
        assert!(claims.exp.abs_diff(expected) < 5);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = TokenKeys::new("test-secret", 7);
        let claims = Claims {
            id: 1,
            username: String::new(),
            email: "x@example.com".to_string(),
            exp: (Utc::now() - Duration::days(1)).timestamp() as u64,
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = sign_claims("test-secret", &claims);

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_token_valid_just_before_expiry_boundary() {
        let keys = TokenKeys::new("test-secret", 7);
        let claims = Claims {
            id: 1,
            username: String::new(),
            email: "x@example.com".to_string(),
            exp: (Utc::now() + Duration::seconds(120)).timestamp() as u64,
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = sign_claims("test-secret", &claims);

        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let keys = TokenKeys::new("secret-one", 7);
        let other = TokenKeys::new("secret-two", 7);

        let token = keys.issue(&test_user()).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        // HS512 is in the HMAC family but not the configured algorithm.
        let keys = TokenKeys::new("test-secret", 7);
        let claims = Claims {
            id: 1,
            username: String::new(),
            email: "x@example.com".to_string(),
            exp: (Utc::now() + Duration::days(1)).timestamp() as u64,
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let keys = TokenKeys::new("test-secret", 7);
        assert!(keys.verify("not.a.token").is_err());
        assert!(keys.verify("").is_err());
    }
}
