use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::catalog::CustomerOrderList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_orders))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "The signed-in user's orders, newest first", body = ApiResponse<CustomerOrderList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CustomerOrderList>>> {
    let resp = catalog_service::list_customer_orders(&state, &user).await?;
    Ok(Json(resp))
}
