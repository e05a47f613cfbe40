use reqwest::Method;
use serde_json::{Value, json};

use crate::{
    audit,
    domain::{
        catalog::{parse_managed_product_row, parse_rows},
        dashboard::{CouponDraft, Dashboard, DashboardSummary, OfferDraft, ProductDraft, parse_finite},
    },
    dto::admin::{
        AssignOfferRequest, CouponList, ManagedProductDraft, ManagedProductList, OfferList,
        OrderList, ProductList, UpdateOrderStatusRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{ADMIN_PROBE_FUNCTION, AdminUser},
    models::{AdminCoupon, AdminOffer, AdminOrder, AdminProduct},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
};

/// Runs `f` against this admin's console, seeding it on first use.
async fn with_dashboard<R>(
    state: &AppState,
    admin: &AdminUser,
    f: impl FnOnce(&mut Dashboard) -> R,
) -> R {
    state
        .dashboards
        .update_or_insert_with(admin.0.user_id, Dashboard::seeded, f)
        .await
}

fn record(admin: &AdminUser, action: &str, resource: &str, metadata: Value) {
    audit::record(Some(admin.0.user_id), action, Some(resource), Some(metadata));
}

pub async fn summary(state: &AppState, admin: &AdminUser) -> AppResult<ApiResponse<DashboardSummary>> {
    let summary = with_dashboard(state, admin, |d| d.summary()).await;
    Ok(ApiResponse::success("OK", summary, Some(Meta::empty())))
}

// ---- orders ----

pub async fn list_orders(
    state: &AppState,
    admin: &AdminUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let items = with_dashboard(state, admin, |d| {
        d.filter_orders(query.status, query.q.as_deref())
    })
    .await;
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", OrderList { items }, Some(meta)))
}

pub async fn update_order_status(
    state: &AppState,
    admin: &AdminUser,
    order_id: i64,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<AdminOrder>> {
    let order = with_dashboard(state, admin, |d| d.update_order_status(order_id, payload.status))
        .await
        .ok_or(AppError::NotFound)?;

    record(
        admin,
        "order_status_update",
        "orders",
        json!({ "order_id": order_id, "status": order.status }),
    );

    let message = format!("Order #{} marked as {}.", order.id, order.status.as_str());
    Ok(ApiResponse::success(message, order, None))
}

// ---- products ----

pub async fn list_products(state: &AppState, admin: &AdminUser) -> AppResult<ApiResponse<ProductList>> {
    let items = with_dashboard(state, admin, |d| d.products.clone()).await;
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", ProductList { items }, Some(meta)))
}

pub async fn create_product(
    state: &AppState,
    admin: &AdminUser,
    draft: ProductDraft,
) -> AppResult<ApiResponse<AdminProduct>> {
    let product = with_dashboard(state, admin, |d| d.create_product(draft)).await?;
    record(admin, "product_create", "products", json!({ "product_id": product.id }));

    let message = format!("Product {} created.", product.name);
    Ok(ApiResponse::success(message, product, None))
}

pub async fn toggle_product(
    state: &AppState,
    admin: &AdminUser,
    product_id: i64,
) -> AppResult<ApiResponse<AdminProduct>> {
    let product = with_dashboard(state, admin, |d| d.toggle_product_active(product_id))
        .await
        .ok_or(AppError::NotFound)?;
    record(
        admin,
        "product_toggle",
        "products",
        json!({ "product_id": product_id, "active": product.active }),
    );
    Ok(ApiResponse::success("OK", product, None))
}

pub async fn assign_offer(
    state: &AppState,
    admin: &AdminUser,
    product_id: i64,
    payload: AssignOfferRequest,
) -> AppResult<ApiResponse<AdminProduct>> {
    let product = with_dashboard(state, admin, |d| d.assign_offer(product_id, payload.offer_id))
        .await
        .ok_or(AppError::NotFound)?;
    record(
        admin,
        "product_offer_assign",
        "products",
        json!({ "product_id": product_id, "offer_id": payload.offer_id }),
    );
    Ok(ApiResponse::success("OK", product, None))
}

pub async fn remove_product(
    state: &AppState,
    admin: &AdminUser,
    product_id: i64,
) -> AppResult<ApiResponse<AdminProduct>> {
    let product = with_dashboard(state, admin, |d| d.remove_product(product_id))
        .await
        .ok_or(AppError::NotFound)?;
    record(admin, "product_remove", "products", json!({ "product_id": product_id }));

    let message = format!("Product #{product_id} removed.");
    Ok(ApiResponse::success(message, product, Some(Meta::empty())))
}

// ---- offers ----

pub async fn list_offers(state: &AppState, admin: &AdminUser) -> AppResult<ApiResponse<OfferList>> {
    let items = with_dashboard(state, admin, |d| d.offers.clone()).await;
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", OfferList { items }, Some(meta)))
}

pub async fn create_offer(
    state: &AppState,
    admin: &AdminUser,
    draft: OfferDraft,
) -> AppResult<ApiResponse<AdminOffer>> {
    let offer = with_dashboard(state, admin, |d| d.create_offer(draft)).await?;
    record(admin, "offer_create", "offers", json!({ "offer_id": offer.id }));

    let message = format!("Offer {} created.", offer.title);
    Ok(ApiResponse::success(message, offer, None))
}

pub async fn toggle_offer(
    state: &AppState,
    admin: &AdminUser,
    offer_id: i64,
) -> AppResult<ApiResponse<AdminOffer>> {
    let offer = with_dashboard(state, admin, |d| d.toggle_offer_active(offer_id))
        .await
        .ok_or(AppError::NotFound)?;
    record(
        admin,
        "offer_toggle",
        "offers",
        json!({ "offer_id": offer_id, "active": offer.active }),
    );
    Ok(ApiResponse::success("OK", offer, None))
}

pub async fn remove_offer(
    state: &AppState,
    admin: &AdminUser,
    offer_id: i64,
) -> AppResult<ApiResponse<AdminOffer>> {
    let offer = with_dashboard(state, admin, |d| d.remove_offer(offer_id))
        .await
        .ok_or(AppError::NotFound)?;
    record(admin, "offer_remove", "offers", json!({ "offer_id": offer_id }));
    Ok(ApiResponse::success("OK", offer, Some(Meta::empty())))
}

// ---- coupons ----

pub async fn list_coupons(state: &AppState, admin: &AdminUser) -> AppResult<ApiResponse<CouponList>> {
    let items = with_dashboard(state, admin, |d| d.coupons.clone()).await;
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", CouponList { items }, Some(meta)))
}

pub async fn create_coupon(
    state: &AppState,
    admin: &AdminUser,
    draft: CouponDraft,
) -> AppResult<ApiResponse<AdminCoupon>> {
    let coupon = with_dashboard(state, admin, |d| d.create_coupon(draft)).await?;
    record(admin, "coupon_create", "coupons", json!({ "coupon_id": coupon.id }));

    let message = format!("Coupon {} created.", coupon.code);
    Ok(ApiResponse::success(message, coupon, None))
}

pub async fn toggle_coupon(
    state: &AppState,
    admin: &AdminUser,
    coupon_id: i64,
) -> AppResult<ApiResponse<AdminCoupon>> {
    let coupon = with_dashboard(state, admin, |d| d.toggle_coupon_active(coupon_id))
        .await
        .ok_or(AppError::NotFound)?;
    record(
        admin,
        "coupon_toggle",
        "coupons",
        json!({ "coupon_id": coupon_id, "active": coupon.active }),
    );
    Ok(ApiResponse::success("OK", coupon, None))
}

pub async fn remove_coupon(
    state: &AppState,
    admin: &AdminUser,
    coupon_id: i64,
) -> AppResult<ApiResponse<AdminCoupon>> {
    let coupon = with_dashboard(state, admin, |d| d.remove_coupon(coupon_id))
        .await
        .ok_or(AppError::NotFound)?;
    record(admin, "coupon_remove", "coupons", json!({ "coupon_id": coupon_id }));
    Ok(ApiResponse::success("OK", coupon, Some(Meta::empty())))
}

// ---- remote catalog ----

pub fn list_managed_products(admin: &AdminUser) -> AppResult<ApiResponse<ManagedProductList>> {
    // The admin check already fetched the listing for this request.
    let rows = match admin.probe_body().get("products") {
        Some(Value::Array(rows)) => rows.clone(),
        _ => Vec::new(),
    };
    let items = parse_rows(ADMIN_PROBE_FUNCTION, rows, parse_managed_product_row);

    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", ManagedProductList { items }, Some(meta)))
}

pub async fn create_managed_product(
    state: &AppState,
    admin: &AdminUser,
    draft: ManagedProductDraft,
) -> AppResult<ApiResponse<Value>> {
    let name = draft.name.trim();
    let slug = draft.slug.trim();
    let price = match parse_finite(&draft.price) {
        Some(price) if !name.is_empty() && !slug.is_empty() => price,
        _ => {
            return Err(AppError::Validation(
                "Name, slug, and valid price are required.".to_string(),
            ));
        }
    };

    let images: Vec<&str> = draft
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .into_iter()
        .collect();

    let backend = state.backend()?;
    let body = json!({
        "action": "create",
        "product": { "name": name, "slug": slug, "price": price, "images": images },
    });
    let result = backend
        .invoke(ADMIN_PROBE_FUNCTION, Method::POST, Some(&body), Some(&admin.0.access_token))
        .await?;

    record(admin, "catalog_product_create", "products", json!({ "slug": slug }));
    Ok(ApiResponse::success("Product created.", result, None))
}

pub async fn archive_managed_product(
    state: &AppState,
    admin: &AdminUser,
    product_id: i64,
) -> AppResult<ApiResponse<Value>> {
    let backend = state.backend()?;
    let body = json!({ "action": "delete", "product": { "id": product_id } });
    let result = backend
        .invoke(ADMIN_PROBE_FUNCTION, Method::POST, Some(&body), Some(&admin.0.access_token))
        .await?;

    record(admin, "catalog_product_archive", "products", json!({ "product_id": product_id }));
    Ok(ApiResponse::success(
        format!("Product {product_id} archived."),
        result,
        Some(Meta::empty()),
    ))
}
