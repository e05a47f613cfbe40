use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use crate::{
    audit,
    config::Mode,
    domain::cart::CartState,
    dto::cart::{CartView, MergeCartRequest, SetQuantityRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{Ack, ApiResponse, Meta},
    state::AppState,
};

pub const MERGE_CART_FUNCTION: &str = "merge-cart";

const REAL_MODE_MESSAGE: &str =
    "Cart is in REAL mode, but backend wiring is paused. Set `CART_MODE=mock` to view the sample cart.";

fn ensure_mock_mode(state: &AppState) -> AppResult<()> {
    match state.config.cart_mode {
        Mode::Mock => Ok(()),
        Mode::Real => Err(AppError::Unavailable(REAL_MODE_MESSAGE.to_string())),
    }
}

fn view(cart_id: Uuid, cart: &CartState) -> ApiResponse<CartView> {
    let view = CartView::new(cart_id, cart);
    let meta = Meta::new(view.items.len());
    ApiResponse::success("OK", view, Some(meta))
}

pub async fn create_cart(state: &AppState) -> AppResult<ApiResponse<CartView>> {
    ensure_mock_mode(state)?;

    let cart_id = Uuid::new_v4();
    let cart = CartState::seeded();
    let resp = view(cart_id, &cart);
    state.carts.insert(cart_id, cart).await;

    tracing::debug!(%cart_id, "cart session created");
    Ok(resp)
}

pub async fn get_cart(state: &AppState, cart_id: Uuid) -> AppResult<ApiResponse<CartView>> {
    state
        .carts
        .read(&cart_id, |cart| view(cart_id, cart))
        .await
        .ok_or(AppError::NotFound)
}

pub async fn delete_cart(state: &AppState, cart_id: Uuid) -> AppResult<ApiResponse<Ack>> {
    state.carts.remove(&cart_id).await.ok_or(AppError::NotFound)?;

    tracing::debug!(%cart_id, "cart session closed");
    Ok(ApiResponse::success("Cart closed.", Ack::ok(), Some(Meta::empty())))
}

/// Runs one cart mutation. A missing cart or a mutation reporting `false`
/// (unknown item) is a 404.
async fn mutate(
    state: &AppState,
    cart_id: Uuid,
    action: &str,
    item_id: &str,
    f: impl FnOnce(&mut CartState) -> bool,
) -> AppResult<ApiResponse<CartView>> {
    let resp = state
        .carts
        .update(&cart_id, |cart| f(cart).then(|| view(cart_id, cart)))
        .await
        .flatten()
        .ok_or(AppError::NotFound)?;

    tracing::debug!(%cart_id, item_id, action, "cart updated");
    Ok(resp)
}

pub async fn set_quantity(
    state: &AppState,
    cart_id: Uuid,
    item_id: &str,
    payload: SetQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    mutate(state, cart_id, "set_quantity", item_id, |cart| {
        cart.set_quantity(item_id, payload.quantity)
    })
    .await
}

pub async fn remove_item(
    state: &AppState,
    cart_id: Uuid,
    item_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    mutate(state, cart_id, "remove", item_id, |cart| cart.set_quantity(item_id, 0)).await
}

pub async fn move_to_saved(
    state: &AppState,
    cart_id: Uuid,
    item_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    mutate(state, cart_id, "save_for_later", item_id, |cart| {
        cart.move_to_saved(item_id)
    })
    .await
}

pub async fn restore(
    state: &AppState,
    cart_id: Uuid,
    item_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    mutate(state, cart_id, "restore", item_id, |cart| cart.restore(item_id)).await
}

pub async fn remove_saved(
    state: &AppState,
    cart_id: Uuid,
    item_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    mutate(state, cart_id, "remove_saved", item_id, |cart| {
        cart.remove_saved(item_id)
    })
    .await
}

/// Adds a catalog product to the signed-in user's server-side cart.
pub async fn merge_into_cart(
    state: &AppState,
    user: &AuthUser,
    payload: MergeCartRequest,
) -> AppResult<ApiResponse<Ack>> {
    let quantity = payload.quantity.unwrap_or(1);
    if quantity <= 0 {
        return Err(AppError::Validation(
            "Quantity must be greater than 0.".to_string(),
        ));
    }

    let backend = state.backend()?;
    let body = json!({
        "items": [{ "product_id": payload.product_id, "quantity": quantity }]
    });
    backend
        .invoke(MERGE_CART_FUNCTION, Method::POST, Some(&body), Some(&user.access_token))
        .await?;

    audit::record(
        Some(user.user_id),
        "cart_merge",
        Some("cart_items"),
        Some(json!({ "product_id": payload.product_id, "quantity": quantity })),
    );

    Ok(ApiResponse::success("Added to cart.", Ack::ok(), Some(Meta::empty())))
}
