mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use storefront_api::{
    config::{AppConfig, Mode},
    domain::cart::{CartState, totals},
    models::CartLineItem,
    routes,
    seed,
    state::AppState,
};

async fn create_cart(state: &AppState) -> String {
    let (status, body) = common::post(state, "/api/carts", json!({}), None).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["cart_id"].as_str().expect("cart id").to_string()
}

async fn call(state: &AppState, method: Method, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
    common::send(routes::app(state.clone()), method, uri, body, None).await
}

#[test]
fn seed_cart_totals_are_grouped_rupees() {
    let cart = CartState::seeded();
    let totals = cart.totals();

    assert_eq!(totals.subtotal, 3097);
    assert_eq!(totals.total, 3097);
    assert_eq!(totals.subtotal_label, "₹3,097");
    assert_eq!(totals.shipping_label, "Free");
}

#[test]
fn totals_of_empty_bag_are_zero() {
    let totals = totals(&[]);
    assert_eq!(totals.total, 0);
    assert_eq!(totals.total_label, "₹0");
}

#[test]
fn seed_factory_returns_independent_copies() {
    let mut first = seed::initial_cart();
    first[0].quantity = 9;
    assert_eq!(seed::initial_cart()[0].quantity, 1);
}

#[test]
fn non_positive_quantity_removes_the_line() {
    let mut cart = CartState::seeded();
    assert!(cart.set_quantity("sku_sling_001", -1));
    assert!(!cart.contains("sku_sling_001"));
    assert!(!cart.set_quantity("sku_sling_001", 2));
}

#[test]
fn save_then_restore_resets_quantity_to_one() {
    let mut cart = CartState::seeded();
    assert!(cart.move_to_saved("sku_sling_001"));
    assert_eq!(cart.saved[0].quantity, 2);
    assert_eq!(cart.totals().subtotal, 1299);

    assert!(cart.restore("sku_sling_001"));
    assert!(cart.saved.is_empty());
    let sling = cart.items.iter().find(|i| i.id == "sku_sling_001").expect("restored");
    assert_eq!(sling.quantity, 1);
}

#[test]
fn restore_keeps_existing_bag_line() {
    let mut cart = CartState::seeded();
    cart.saved.push(CartLineItem {
        id: "sku_duffle_001".to_string(),
        name: "Signature Duffle".to_string(),
        unit_price: 1299,
        quantity: 4,
        image_url: None,
    });

    assert!(cart.restore("sku_duffle_001"));
    let dupes = cart.items.iter().filter(|i| i.id == "sku_duffle_001").count();
    assert_eq!(dupes, 1);
    assert!(!cart.is_saved("sku_duffle_001"));
}

#[tokio::test]
async fn cart_session_round_trip_over_http() {
    let state = common::local_state();
    let cart_id = create_cart(&state).await;

    let (status, body) = call(
        &state,
        Method::PUT,
        &format!("/api/carts/{cart_id}/items/sku_duffle_001"),
        Some(json!({ "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totals"]["subtotal"], 1299 * 3 + 899 * 2);

    let (status, body) = call(
        &state,
        Method::POST,
        &format!("/api/carts/{cart_id}/items/sku_sling_001/save"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["saved"][0]["id"], "sku_sling_001");

    let (status, body) = call(
        &state,
        Method::DELETE,
        &format!("/api/carts/{cart_id}/saved/sku_sling_001"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["saved"].as_array().map(Vec::len), Some(0));

    let (status, body) = common::get(&state, &format!("/api/carts/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["totals"]["total_label"], "₹3,897");
}

#[tokio::test]
async fn carts_do_not_share_state() {
    let state = common::local_state();
    let first = create_cart(&state).await;
    let second = create_cart(&state).await;

    call(
        &state,
        Method::DELETE,
        &format!("/api/carts/{first}/items/sku_duffle_001"),
        None,
    )
    .await;

    let (_, body) = common::get(&state, &format!("/api/carts/{second}"), None).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(state.carts.len().await, 2);
}

#[tokio::test]
async fn deleting_cart_frees_the_session() {
    let state = common::local_state();
    let cart_id = create_cart(&state).await;
    assert_eq!(state.carts.len().await, 1);

    let (status, body) = call(&state, Method::DELETE, &format!("/api/carts/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart closed.");
    assert!(state.carts.is_empty().await);

    let (status, _) = common::get(&state, &format!("/api/carts/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&state, Method::DELETE, &format!("/api/carts/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_cart_or_item_is_not_found() {
    let state = common::local_state();
    let cart_id = create_cart(&state).await;

    let (status, _) = common::get(
        &state,
        "/api/carts/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &state,
        Method::POST,
        &format!("/api/carts/{cart_id}/saved/sku_missing/restore"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn real_cart_mode_is_paused() {
    let mut config = AppConfig::local();
    config.cart_mode = Mode::Real;
    let state = AppState::new(config);

    let (status, body) = common::post(&state, "/api/carts", json!({}), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body["message"],
        "Cart is in REAL mode, but backend wiring is paused. Set `CART_MODE=mock` to view the sample cart."
    );
}

#[tokio::test]
async fn merge_needs_auth_configuration() {
    let state = common::local_state();
    let (status, _) = common::post(
        &state,
        "/api/cart/merge",
        json!({ "product_id": 1001 }),
        Some("whatever"),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
