//! Authentication handlers: signup, login, logout, validate.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::auth::{hash_password, verify_password};
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{ApiResponse, LoginRequest, MessageResponse, SignupRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{CurrentUser, SESSION_COOKIE};

/// Uniform message for any credential failure.
///
/// Unknown email and wrong password deliberately read the same, so the
/// endpoint cannot be used to enumerate accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Build the session Set-Cookie value.
fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age={max_age_secs}"
    )
}

/// Build a Set-Cookie value that clears the session cookie.
fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=0")
}

/// POST /signup - Create a new user account.
///
/// No token is issued at signup; the caller must log in separately.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected signup body: {}", e);
        ApiError::bad_request("Invalid request body")
    })?;

    let repo = UserRepository::new(state.db.pool());

    // Pre-insert existence check. Not a transactional guarantee: two
    // concurrent signups with the same email can both pass this point.
    let existing = repo.get_by_email(&req.email).await.map_err(|e| {
        tracing::error!("Email lookup failed: {}", e);
        ApiError::internal("Failed to create user")
    })?;
    if existing.is_some() {
        return Err(ApiError::conflict("Email already exists"));
    }

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal("Failed to hash password")
    })?;

    repo.create(&NewUser::new(&req.email, password_hash))
        .await
        .map_err(|e| {
            tracing::error!("User creation failed: {}", e);
            ApiError::internal("Failed to create user")
        })?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "User created successfully",
    ))))
}

/// POST /login - Authenticate and set the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected login body: {}", e);
        ApiError::bad_request("Invalid request body")
    })?;

    let repo = UserRepository::new(state.db.pool());

    let user = repo
        .get_by_email(&req.email)
        .await
        .map_err(|e| {
            tracing::error!("User lookup failed: {}", e);
            ApiError::internal("Failed to log in")
        })?
        .ok_or_else(|| ApiError::bad_request(INVALID_CREDENTIALS))?;

    verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::bad_request(INVALID_CREDENTIALS))?;

    let token = state.tokens.issue(&user).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal("Failed to generate token")
    })?;

    let cookie = session_cookie(&token, state.cookie_max_age_secs);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::new(MessageResponse::new(
            "User logged in successfully",
        ))),
    ))
}

/// POST /logout - Clear the session cookie.
///
/// Succeeds unconditionally; tokens are stateless so there is nothing to
/// revoke server-side.
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(ApiResponse::new(MessageResponse::new(
            "User logged out successfully",
        ))),
    )
}

/// GET /validate - Confirm the session and return the current user.
pub async fn validate(
    CurrentUser(user): CurrentUser,
) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::new(UserResponse::from(&user)))
}
