mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::{account, login, signup, test_server};

#[tokio::test]
async fn signup_returns_created_user_without_hash() {
    let server = test_server();

    let user = signup(&server, "felipe@gmail.com", "secret-pasword").await;

    assert_eq!(user["email"], "felipe@gmail.com");
    assert!(user["id"].is_string());
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(user.get("hash").is_none());
}

#[tokio::test]
async fn signup_with_taken_email_is_forbidden() {
    let server = test_server();
    signup(&server, "a@x.com", "p").await;

    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": "a@x.com", "password": "different" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "Credentials taken");
}

#[tokio::test]
async fn malformed_credentials_are_bad_requests() {
    let server = test_server();

    for path in ["/auth/signup", "/auth/login"] {
        for body in [
            json!({ "password": "p" }),
            json!({ "email": "a@x.com" }),
            json!({ "email": "", "password": "p" }),
            json!({ "email": "a@x.com", "password": "" }),
            json!({ "email": "not-an-email", "password": "p" }),
        ] {
            let response = server.post(path).json(&body).await;
            assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{path} {body}");
        }

        let response = server.post(path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{path} no body");
    }
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let server = test_server();
    signup(&server, "a@x.com", "p").await;

    let wrong_password = server
        .post("/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "wrong" }))
        .await;
    let unknown_email = server
        .post("/auth/login")
        .json(&json!({ "email": "nobody@x.com", "password": "p" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(unknown_email.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(wrong_password.text(), unknown_email.text());
}

#[tokio::test]
async fn protected_routes_require_a_valid_bearer_token() {
    let server = test_server();

    let response = server.get("/users/profile").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/bookmarks")
        .authorization_bearer("not.a.token")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_login_then_edit_profile() {
    let server = test_server();

    signup(&server, "a@x.com", "p").await;
    let response = server
        .post("/auth/signup")
        .json(&json!({ "email": "a@x.com", "password": "p" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let token = login(&server, "a@x.com", "p").await;

    let response = server
        .patch("/users")
        .authorization_bearer(&token)
        .json(&json!({ "firstName": "A" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let user: Value = response.json();
    assert_eq!(user["firstName"], "A");
    assert_eq!(user["email"], "a@x.com");
}

#[tokio::test]
async fn profile_reflects_edits() {
    let server = test_server();
    let token = account(&server, "felipe@gmail.com").await;

    let response = server
        .patch("/users")
        .authorization_bearer(&token)
        .json(&json!({ "firstName": "Felipe", "email": "felipe@tutorial.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get("/users/profile")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let user: Value = response.json();
    assert_eq!(user["firstName"], "Felipe");
    assert_eq!(user["email"], "felipe@tutorial.com");
    assert_eq!(user["lastName"], Value::Null);
}

#[tokio::test]
async fn editing_email_to_a_taken_one_is_forbidden() {
    let server = test_server();
    account(&server, "a@x.com").await;
    let token = account(&server, "b@x.com").await;

    let response = server
        .patch("/users")
        .authorization_bearer(&token)
        .json(&json!({ "email": "a@x.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_check_is_public() {
    let server = test_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
