use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    domain::checkout::CheckoutForm,
    dto::checkout::{AddressList, CheckoutPrefill, CheckoutSummary},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_checkout))
        .route("/addresses", get(list_addresses))
        .route("/prefill", get(prefill))
}

#[utoipa::path(
    get,
    path = "/api/checkout/addresses",
    responses(
        (status = 200, description = "Saved delivery addresses", body = ApiResponse<AddressList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn list_addresses(user: AuthUser) -> AppResult<Json<ApiResponse<AddressList>>> {
    let resp = checkout_service::list_addresses(&user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/checkout/prefill",
    responses(
        (status = 200, description = "Phone and email from the signed-in account", body = ApiResponse<CheckoutPrefill>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn prefill(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CheckoutPrefill>>> {
    let resp = checkout_service::prefill(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutForm,
    responses(
        (status = 200, description = "Mock checkout accepted", body = ApiResponse<CheckoutSummary>),
        (status = 401, description = "Unauthorized or signed out during checkout"),
        (status = 422, description = "First failing form rule"),
        (status = 503, description = "Real checkout mode is not enabled"),
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn submit_checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(form): Json<CheckoutForm>,
) -> AppResult<Json<ApiResponse<CheckoutSummary>>> {
    let resp = checkout_service::submit(&state, &user, form).await?;
    Ok(Json(resp))
}
