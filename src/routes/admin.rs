use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, put},
};
use serde_json::Value;

use crate::{
    domain::dashboard::{CouponDraft, DashboardSummary, OfferDraft, ProductDraft},
    dto::admin::{
        AssignOfferRequest, CouponList, ManagedProductDraft, ManagedProductList, OfferList,
        OrderList, ProductList, UpdateOrderStatusRequest,
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::{AdminCoupon, AdminOffer, AdminOrder, AdminProduct},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/orders", get(list_orders))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", delete(remove_product))
        .route("/products/{id}/toggle", patch(toggle_product))
        .route("/products/{id}/offer", put(assign_offer))
        .route("/offers", get(list_offers).post(create_offer))
        .route("/offers/{id}", delete(remove_offer))
        .route("/offers/{id}/toggle", patch(toggle_offer))
        .route("/coupons", get(list_coupons).post(create_coupon))
        .route("/coupons/{id}", delete(remove_coupon))
        .route("/coupons/{id}/toggle", patch(toggle_coupon))
        .route(
            "/catalog",
            get(list_catalog_products).post(create_catalog_product),
        )
        .route("/catalog/{id}", delete(archive_catalog_product))
}

#[utoipa::path(
    get,
    path = "/api/admin/summary",
    responses(
        (status = 200, description = "Order count, paid revenue, product count and live coupons", body = ApiResponse<DashboardSummary>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn summary(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let resp = admin_service::summary(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders matching the status and search filters", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_orders(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<AdminOrder>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Order not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<AdminOrder>>> {
    let resp = admin_service::update_order_status(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    responses(
        (status = 200, description = "Console products", body = ApiResponse<ProductList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::list_products(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<AdminProduct>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Required field missing or not numeric"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(draft): Json<ProductDraft>,
) -> AppResult<Json<ApiResponse<AdminProduct>>> {
    let resp = admin_service::create_product(&state, &admin, draft).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/toggle",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Active flag flipped", body = ApiResponse<AdminProduct>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminProduct>>> {
    let resp = admin_service::toggle_product(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}/offer",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = AssignOfferRequest,
    responses(
        (status = 200, description = "Offer reference set or cleared", body = ApiResponse<AdminProduct>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn assign_offer(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<AssignOfferRequest>,
) -> AppResult<Json<ApiResponse<AdminProduct>>> {
    let resp = admin_service::assign_offer(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product removed and unlinked from offers", body = ApiResponse<AdminProduct>),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn remove_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminProduct>>> {
    let resp = admin_service::remove_product(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/offers",
    responses(
        (status = 200, description = "Console offers", body = ApiResponse<OfferList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_offers(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<ApiResponse<OfferList>>> {
    let resp = admin_service::list_offers(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/offers",
    request_body = OfferDraft,
    responses(
        (status = 200, description = "Offer created", body = ApiResponse<AdminOffer>),
        (status = 422, description = "Required field missing or malformed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_offer(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(draft): Json<OfferDraft>,
) -> AppResult<Json<ApiResponse<AdminOffer>>> {
    let resp = admin_service::create_offer(&state, &admin, draft).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/offers/{id}/toggle",
    params(
        ("id" = i64, Path, description = "Offer ID")
    ),
    responses(
        (status = 200, description = "Active flag flipped", body = ApiResponse<AdminOffer>),
        (status = 404, description = "Offer not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_offer(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminOffer>>> {
    let resp = admin_service::toggle_offer(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/offers/{id}",
    params(
        ("id" = i64, Path, description = "Offer ID")
    ),
    responses(
        (status = 200, description = "Offer removed and cleared from products", body = ApiResponse<AdminOffer>),
        (status = 404, description = "Offer not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn remove_offer(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminOffer>>> {
    let resp = admin_service::remove_offer(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/coupons",
    responses(
        (status = 200, description = "Console coupons", body = ApiResponse<CouponList>),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_coupons(
    State(state): State<AppState>,
    admin: AdminUser,
) -> AppResult<Json<ApiResponse<CouponList>>> {
    let resp = admin_service::list_coupons(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/coupons",
    request_body = CouponDraft,
    responses(
        (status = 200, description = "Coupon created", body = ApiResponse<AdminCoupon>),
        (status = 422, description = "Required field missing or malformed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_coupon(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(draft): Json<CouponDraft>,
) -> AppResult<Json<ApiResponse<AdminCoupon>>> {
    let resp = admin_service::create_coupon(&state, &admin, draft).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/coupons/{id}/toggle",
    params(
        ("id" = i64, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "Active flag flipped", body = ApiResponse<AdminCoupon>),
        (status = 404, description = "Coupon not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_coupon(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminCoupon>>> {
    let resp = admin_service::toggle_coupon(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/coupons/{id}",
    params(
        ("id" = i64, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "Coupon removed", body = ApiResponse<AdminCoupon>),
        (status = 404, description = "Coupon not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn remove_coupon(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<AdminCoupon>>> {
    let resp = admin_service::remove_coupon(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/catalog",
    responses(
        (status = 200, description = "Products as the backend admin function lists them", body = ApiResponse<ManagedProductList>),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "Backend function failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_catalog_products(
    admin: AdminUser,
) -> AppResult<Json<ApiResponse<ManagedProductList>>> {
    let resp = admin_service::list_managed_products(&admin)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/catalog",
    request_body = ManagedProductDraft,
    responses(
        (status = 200, description = "Product created in the backend catalog", body = ApiResponse<serde_json::Value>),
        (status = 422, description = "Name, slug or price missing"),
        (status = 502, description = "Backend function failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_catalog_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(draft): Json<ManagedProductDraft>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp = admin_service::create_managed_product(&state, &admin, draft).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/catalog/{id}",
    params(
        ("id" = i64, Path, description = "Backend product ID")
    ),
    responses(
        (status = 200, description = "Product archived", body = ApiResponse<serde_json::Value>),
        (status = 502, description = "Backend function failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn archive_catalog_product(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let resp = admin_service::archive_managed_product(&state, &admin, id).await?;
    Ok(Json(resp))
}
