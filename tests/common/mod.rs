//! Shared setup for the HTTP-level tests: an in-memory app behind `axum-test`.
#![allow(dead_code)]

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Duration;
use markd::services::token::TokenIssuer;
use markd::startup::{AppState, app};
use markd::store::MemoryStore;
use serde_json::{Value, json};

pub const SECRET: &[u8] = b"integration-test-secret";

pub fn test_server() -> TestServer {
    let store = Arc::new(MemoryStore::new());
    let tokens = TokenIssuer::new(SECRET, Duration::minutes(15));
    let mut state = AppState::new(store.clone(), store, tokens);

    // default Argon2 parameters are needlessly slow in debug builds
    let cheap = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(1024, 1, 1, None).unwrap(),
    );
    state.auth_service = state.auth_service.with_hasher(cheap);

    TestServer::new(app(state)).unwrap()
}

pub async fn signup(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    body["access_token"].as_str().unwrap().to_string()
}

/// Signs up a fresh account and returns its bearer token.
pub async fn account(server: &TestServer, email: &str) -> String {
    signup(server, email, "secret-password").await;
    login(server, email, "secret-password").await
}
