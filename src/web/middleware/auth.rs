//! Session-cookie authentication guard.
//!
//! Every guarded request goes through the same gate: read the
//! `Authorization` cookie, verify the token, then load the user from the
//! database. Any failure short-circuits with 401 before the handler runs.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::db::{User, UserRepository};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "Authorization";

/// Extractor for the authenticated user.
///
/// Use this extractor to require a valid session for a handler. The handler
/// receives the freshly loaded User, so a token for a since-removed account
/// never reaches a handler.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let jar = CookieJar::from_headers(&parts.headers);
            let token = jar
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| ApiError::unauthorized("Login required"))?;

            // Verify signature, algorithm, and expiry
            let claims = state.tokens.verify(&token).map_err(|e| {
                tracing::debug!("Session token rejected: {}", e);
                ApiError::unauthorized("Invalid token")
            })?;

            // Fresh lookup: the token alone is not proof the account exists
            let user = UserRepository::new(state.db.pool())
                .get_by_id(claims.id)
                .await
                .map_err(|e| {
                    tracing::error!("User lookup failed: {}", e);
                    ApiError::internal("Authentication failed")
                })?
                .ok_or_else(|| ApiError::unauthorized("User not found"))?;

            Ok(CurrentUser(user))
        })
    }
}
