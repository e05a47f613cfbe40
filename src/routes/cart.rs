use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::cart::{CartView, MergeCartRequest, SetQuantityRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{Ack, ApiResponse},
    services::cart_service,
    state::AppState,
};

/// Anonymous cart sessions, mounted at `/api/carts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route("/{cart_id}", get(get_cart).delete(delete_cart))
        .route(
            "/{cart_id}/items/{item_id}",
            put(set_quantity).delete(remove_item),
        )
        .route("/{cart_id}/items/{item_id}/save", post(save_for_later))
        .route("/{cart_id}/saved/{item_id}/restore", post(restore_saved))
        .route("/{cart_id}/saved/{item_id}", delete(remove_saved))
}

/// The signed-in user's backend cart, mounted at `/api/cart`.
pub fn account_router() -> Router<AppState> {
    Router::new().route("/merge", post(merge_cart))
}

#[utoipa::path(
    post,
    path = "/api/carts",
    responses(
        (status = 200, description = "New cart session with the sample bag", body = ApiResponse<CartView>),
        (status = 503, description = "Cart is not in mock mode"),
    ),
    tag = "Cart"
)]
pub async fn create_cart(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::create_cart(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/carts/{cart_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart session ID")
    ),
    responses(
        (status = 200, description = "Bag, saved items and totals", body = ApiResponse<CartView>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::get_cart(&state, cart_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart session ID")
    ),
    responses(
        (status = 200, description = "Cart session closed", body = ApiResponse<Ack>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Cart"
)]
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Ack>>> {
    let resp = cart_service::delete_cart(&state, cart_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/carts/{cart_id}/items/{item_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart session ID"),
        ("item_id" = String, Path, description = "Line item ID")
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity set; zero or less removes the line", body = ApiResponse<CartView>),
        (status = 404, description = "Cart or item not found"),
    ),
    tag = "Cart"
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(Uuid, String)>,
    Json(payload): Json<SetQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::set_quantity(&state, cart_id, &item_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}/items/{item_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart session ID"),
        ("item_id" = String, Path, description = "Line item ID")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartView>),
        (status = 404, description = "Cart or item not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(Uuid, String)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_item(&state, cart_id, &item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/items/{item_id}/save",
    params(
        ("cart_id" = Uuid, Path, description = "Cart session ID"),
        ("item_id" = String, Path, description = "Line item ID")
    ),
    responses(
        (status = 200, description = "Moved to saved for later", body = ApiResponse<CartView>),
        (status = 404, description = "Cart or item not found"),
    ),
    tag = "Cart"
)]
pub async fn save_for_later(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(Uuid, String)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::move_to_saved(&state, cart_id, &item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/saved/{item_id}/restore",
    params(
        ("cart_id" = Uuid, Path, description = "Cart session ID"),
        ("item_id" = String, Path, description = "Saved item ID")
    ),
    responses(
        (status = 200, description = "Moved back to the bag with quantity 1", body = ApiResponse<CartView>),
        (status = 404, description = "Cart or saved item not found"),
    ),
    tag = "Cart"
)]
pub async fn restore_saved(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(Uuid, String)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::restore(&state, cart_id, &item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}/saved/{item_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart session ID"),
        ("item_id" = String, Path, description = "Saved item ID")
    ),
    responses(
        (status = 200, description = "Saved item dropped", body = ApiResponse<CartView>),
        (status = 404, description = "Cart or saved item not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_saved(
    State(state): State<AppState>,
    Path((cart_id, item_id)): Path<(Uuid, String)>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_saved(&state, cart_id, &item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/merge",
    request_body = MergeCartRequest,
    responses(
        (status = 200, description = "Product added to the account cart", body = ApiResponse<Ack>),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Quantity must be positive"),
        (status = 502, description = "Backend rejected the merge"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn merge_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<MergeCartRequest>,
) -> AppResult<Json<ApiResponse<Ack>>> {
    let resp = cart_service::merge_into_cart(&state, &user, payload).await?;
    Ok(Json(resp))
}
