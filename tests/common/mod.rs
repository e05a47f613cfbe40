#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;
use uuid::Uuid;

use storefront_api::{
    config::{AppConfig, BackendConfig},
    dto::auth::Claims,
    middleware::auth::{AuthUser, TOKEN_AUDIENCE},
    routes,
    state::AppState,
};

pub const JWT_SECRET: &str = "test-jwt-secret-with-enough-length";
pub const ANON_KEY: &str = "anon-test-key";

/// No backend, no JWT secret, both pages in mock mode.
pub fn local_state() -> AppState {
    AppState::new(AppConfig::local())
}

pub fn state_with_backend(base_url: &str) -> AppState {
    let mut config = AppConfig::local();
    config.backend = Some(BackendConfig {
        url: base_url.to_string(),
        anon_key: ANON_KEY.to_string(),
    });
    config.jwt_secret = Some(JWT_SECRET.to_string());
    AppState::new(config)
}

pub fn token_for(user_id: Uuid, email: &str) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        email: Some(email.to_string()),
        role: "authenticated".to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        aud: Some(TOKEN_AUDIENCE.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("encode token")
}

pub fn auth_user(user_id: Uuid) -> AuthUser {
    AuthUser {
        user_id,
        email: Some("shopper@example.com".to_string()),
        role: "authenticated".to_string(),
        access_token: token_for(user_id, "shopper@example.com"),
    }
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub async fn get(state: &AppState, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(routes::app(state.clone()), Method::GET, uri, None, token).await
}

pub async fn post(
    state: &AppState,
    uri: &str,
    body: Value,
    token: Option<&str>,
) -> (StatusCode, Value) {
    send(routes::app(state.clone()), Method::POST, uri, Some(body), token).await
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake backend");
    });
    format!("http://{addr}")
}
