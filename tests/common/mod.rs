//! Test helpers for Web API integration tests.

use axum::http::header;
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use mini_drive::web::handlers::AppState;
use mini_drive::web::router::{create_health_router, create_router};
use mini_drive::{Database, FileStorage};

/// Secret used to sign tokens in tests.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server with an in-memory database and temp storage.
///
/// The TempDir must be kept alive for the duration of the test.
pub async fn create_test_server() -> (TestServer, Arc<AppState>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let storage =
        FileStorage::new(temp_dir.path().join("uploads")).expect("Failed to create storage");

    let app_state = Arc::new(AppState::new(db, storage, TEST_JWT_SECRET, 7, 30));

    let router = create_router(app_state.clone(), &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, app_state, temp_dir)
}

/// Sign up a user.
pub async fn signup(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/signup")
        .json(&json!({ "email": email, "password": password }))
        .await
}

/// Extract the `Authorization=<token>` pair from a Set-Cookie header.
pub fn session_cookie(response: &TestResponse) -> String {
    let set_cookie = response
        .header(header::SET_COOKIE)
        .to_str()
        .expect("Set-Cookie is not valid UTF-8")
        .to_string();
    set_cookie
        .split(';')
        .next()
        .expect("empty Set-Cookie header")
        .to_string()
}

/// Sign up and log in, returning the session cookie pair for Cookie headers.
pub async fn signup_and_login(server: &TestServer, email: &str, password: &str) -> String {
    let response = signup(server, email, password).await;
    response.assert_status_ok();

    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();

    session_cookie(&response)
}

/// Read the error message out of an error response body.
pub fn error_message(body: &Value) -> String {
    body["error"]["message"]
        .as_str()
        .expect("missing error message")
        .to_string()
}
