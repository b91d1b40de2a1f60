// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use fitdiet_tracker::config::Config;
use fitdiet_tracker::db::FirestoreDb;
use fitdiet_tracker::middleware::auth::create_jwt;
use fitdiet_tracker::routes::create_router;
use fitdiet_tracker::services::{DietAdvisor, GeminiClient};
use fitdiet_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

fn build_app(config: Config, db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let advisor = DietAdvisor::new(GeminiClient::from_config(&config));
    let state = Arc::new(AppState {
        config,
        db,
        advisor,
    });
    (create_router(state.clone()), state)
}

/// Create a test app with an offline database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::test_default(), FirestoreDb::new_mock())
}

/// Create an offline test app whose Gemini calls go to `gemini_base_url`.
#[allow(dead_code)]
pub fn create_test_app_with_gemini(gemini_base_url: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        gemini_base_url: gemini_base_url.to_string(),
        ..Config::test_default()
    };
    build_app(config, FirestoreDb::new_mock())
}

/// Create a test app backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::test_default(), test_db().await)
}

/// Session token for `user_id` signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Unique id for test isolation.
#[allow(dead_code)]
pub fn unique_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// Build a JSON request carrying `token` in the `x-auth-token` header.
#[allow(dead_code)]
pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-auth-token", token);

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("response body should be JSON")
}
