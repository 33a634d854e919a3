#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use forgewiki_api::auth::session::SessionConfig;
use forgewiki_api::config::ServerConfig;
use forgewiki_api::router::build_app_router;
use forgewiki_api::state::AppState;

pub const APP_URL: &str = "http://localhost:3000/";

/// Build a test `ServerConfig` with safe defaults and fixture reset enabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_url: APP_URL.to_string(),
        fixture_reset_enabled: true,
        session: SessionConfig {
            secret: "integration-test-session-secret".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Seed a fresh store and build the full application router on top of it.
pub async fn build_test_app() -> Router {
    build_test_app_with(test_config()).await
}

pub async fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::seeded(config)
        .await
        .expect("fixture seeding should succeed");
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn json_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PATCH, uri, body).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::delete(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Log in as a fixture user and return the `name=value` session cookie.
pub async fn login(app: &Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": "password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login as {username}");
    session_cookie(&response).expect("login must set a session cookie")
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    header.split(';').next().map(|pair| pair.trim().to_string())
}

/// Log in as `username` and issue an API token named `name`.
pub async fn issue_token(app: &Router, username: &str, name: &str) -> String {
    let cookie = login(app, username).await;
    let request = Request::post(format!("/api/v1/users/{username}/tokens"))
        .header(COOKIE, cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "name": name }).to_string()))
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED, "token for {username}");
    body_json(response).await["sha1"]
        .as_str()
        .expect("token response carries sha1")
        .to_string()
}

/// Decode an unpadded-or-padded base64 JSON string field.
pub fn decode_field(value: &serde_json::Value) -> Vec<u8> {
    forgewiki_core::content::decode_content(value.as_str().expect("string field"))
        .expect("valid base64")
}
