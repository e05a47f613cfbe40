//! Router-level tests against an in-process stand-in for the hosted backend.

mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use storefront_api::{
    backend::extract_error_message,
    session::AuthEvent,
};
use uuid::Uuid;

const SHOPPER_PASSWORD: &str = "correct-horse";

#[derive(Clone, Default)]
struct Fake {
    admin_token: Arc<Mutex<String>>,
    logouts: Arc<AtomicUsize>,
    admin_listings: Arc<AtomicUsize>,
    function_calls: Arc<Mutex<Vec<Value>>>,
    shopper_id: Uuid,
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string()
}

async fn token(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    if body["password"] != SHOPPER_PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })),
        )
            .into_response();
    }
    Json(json!({
        "access_token": "provider-token",
        "refresh_token": "refresh",
        "expires_in": 3600,
        "user": { "id": fake.shopper_id, "email": body["email"], "phone": "" }
    }))
    .into_response()
}

async fn logout(State(fake): State<Fake>) -> StatusCode {
    fake.logouts.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

async fn admin_products(State(fake): State<Fake>, headers: HeaderMap) -> Response {
    fake.admin_listings.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers) != *fake.admin_token.lock() {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "Admin access required" })))
            .into_response();
    }
    Json(json!({
        "products": [
            { "id": 1001, "name": "Sfane duffle", "slug": "sfane-duffle", "price": "414", "active": true,
              "product_images": [{ "id": 1, "image_url": "/DuffleBag.jpg" }] },
            { "id": 1002, "name": "Broken", "slug": "broken", "price": "n/a", "active": true,
              "product_images": null }
        ]
    }))
    .into_response()
}

async fn admin_products_post(State(fake): State<Fake>, Json(body): Json<Value>) -> Json<Value> {
    fake.function_calls.lock().push(body);
    Json(json!({ "ok": true }))
}

async fn merge_cart(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    if body["items"][0]["product_id"] == 404 {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Product is not available" })))
            .into_response();
    }
    fake.function_calls.lock().push(body);
    Json(json!({ "ok": true })).into_response()
}

async fn products() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Sfane duffle", "slug": "sfane-duffle", "price": 414, "original_price": 1199,
          "offer_type": "PERCENT", "discount_percent": 65,
          "product_images": [{ "image_url": "/DuffleBag.jpg" }],
          "product_categories": [{ "categories": { "id": 1, "name": "Travel", "slug": "travel" } }] },
        { "id": 2, "name": "City Sling", "slug": "city-sling", "price": "899",
          "offer_type": "NONE", "product_images": [],
          "product_categories": [] },
        { "id": 3, "name": "Ghost", "slug": "ghost", "price": null }
    ]))
}

async fn categories() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Travel", "slug": "travel", "active": true },
        { "id": 2, "name": "Work", "slug": "work", "active": true }
    ]))
}

async fn start_backend() -> (Fake, String) {
    let fake = Fake {
        shopper_id: Uuid::new_v4(),
        ..Default::default()
    };
    let router = Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .route(
            "/functions/v1/admin-products",
            get(admin_products).post(admin_products_post),
        )
        .route("/functions/v1/merge-cart", post(merge_cart))
        .route("/rest/v1/products", get(products))
        .route("/rest/v1/categories", get(categories))
        .with_state(fake.clone());
    let base_url = common::spawn_server(router).await;
    (fake, base_url)
}

#[test]
fn error_messages_come_from_known_fields() {
    assert_eq!(
        extract_error_message(r#"{"error":"invalid_grant","error_description":"Bad creds"}"#).as_deref(),
        Some("Bad creds")
    );
    assert_eq!(
        extract_error_message(r#"{"error":{"message":"nested"}}"#).as_deref(),
        Some("nested")
    );
    assert_eq!(extract_error_message("plain text").as_deref(), Some("plain text"));
    assert_eq!(extract_error_message("  "), None);
}

#[tokio::test]
async fn login_surfaces_provider_message_verbatim() {
    let (_, base_url) = start_backend().await;
    let state = common::state_with_backend(&base_url);

    let (status, body) = common::post(
        &state,
        "/api/auth/login",
        json!({ "email": "a@b.co", "password": "nope" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid login credentials");

    let (status, _) = common::post(&state, "/api/auth/login", json!({ "email": "a@b.co" }), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_publishes_signed_in() {
    let (fake, base_url) = start_backend().await;
    let state = common::state_with_backend(&base_url);
    let mut subscription = state.sessions.subscribe(fake.shopper_id);

    let (status, body) = common::post(
        &state,
        "/api/auth/login",
        json!({ "email": "a@b.co", "password": SHOPPER_PASSWORD }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token"], "provider-token");

    let snapshot = subscription.changed().await.expect("snapshot");
    assert_eq!(snapshot.event, AuthEvent::SignedIn);
}

#[tokio::test]
async fn failed_admin_probe_signs_out_and_forbids() {
    let (fake, base_url) = start_backend().await;
    let state = common::state_with_backend(&base_url);
    let user_id = Uuid::new_v4();
    let token = common::token_for(user_id, "shopper@example.com");
    let mut subscription = state.sessions.subscribe(user_id);

    let (status, body) = common::get(&state, "/api/admin/summary", Some(&token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin check failed (403): Admin access required");
    assert_eq!(fake.logouts.load(Ordering::SeqCst), 1);
    let snapshot = subscription.changed().await.expect("snapshot");
    assert_eq!(snapshot.event, AuthEvent::SignedOut);
}

#[tokio::test]
async fn admin_console_and_remote_catalog() {
    let (fake, base_url) = start_backend().await;
    let state = common::state_with_backend(&base_url);
    let admin_id = Uuid::new_v4();
    let token = common::token_for(admin_id, "admin@example.com");
    *fake.admin_token.lock() = token.clone();

    let (status, body) = common::get(&state, "/api/admin/summary", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["revenue"], 41_700);

    let (status, body) = common::post(
        &state,
        "/api/admin/products",
        json!({ "name": "Travel Tote", "slug": "travel-tote", "price": "1499", "stock": "20" }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product Travel Tote created.");
    assert_eq!(body["data"]["id"], 1003);

    let (_, body) = common::get(&state, "/api/admin/orders?status=PACKED", Some(&token)).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let listings_before = fake.admin_listings.load(Ordering::SeqCst);
    let (status, body) = common::get(&state, "/api/admin/catalog", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fake.admin_listings.load(Ordering::SeqCst), listings_before + 1);
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"], 414.0);

    let (status, body) = common::post(
        &state,
        "/api/admin/catalog",
        json!({ "name": "Pouch", "slug": "pouch", "price": "abc" }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Name, slug, and valid price are required.");

    let (status, _) = common::post(
        &state,
        "/api/admin/catalog",
        json!({ "name": "Pouch", "slug": "pouch", "price": "349", "image_url": "/pouch.jpg" }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let calls = fake.function_calls.lock().clone();
    assert_eq!(calls[0]["action"], "create");
    assert_eq!(calls[0]["product"]["price"], 349.0);
    assert_eq!(calls[0]["product"]["images"], json!(["/pouch.jpg"]));
}

#[tokio::test]
async fn merge_cart_defaults_quantity_and_relays_errors() {
    let (fake, base_url) = start_backend().await;
    let state = common::state_with_backend(&base_url);
    let token = common::token_for(Uuid::new_v4(), "shopper@example.com");

    let (status, body) = common::post(&state, "/api/cart/merge", json!({ "product_id": 7 }), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Added to cart.");
    assert_eq!(fake.function_calls.lock()[0]["items"][0]["quantity"], 1);

    let (status, body) = common::post(&state, "/api/cart/merge", json!({ "product_id": 404 }), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Product is not available");

    let (status, _) = common::post(
        &state,
        "/api/cart/merge",
        json!({ "product_id": 7, "quantity": 0 }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = common::post(&state, "/api/cart/merge", json!({ "product_id": 7 }), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_listing_and_categories() {
    let (_, base_url) = start_backend().await;
    let state = common::state_with_backend(&base_url);

    let (status, body) = common::get(&state, "/api/catalog/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["badge"], "65% off");
    assert_eq!(items[1]["image_url"], "/Allbags.png");

    let (_, body) = common::get(&state, "/api/catalog/products?category=travel", None).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));

    let (status, body) = common::get(&state, "/api/catalog/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["product_count"], 1);
    assert_eq!(body["data"]["items"][1]["product_count"], 0);
}
