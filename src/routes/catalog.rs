use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{CatalogList, CategoryList, ProductDetail},
    error::AppResult,
    response::ApiResponse,
    routes::params::CatalogQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{slug}", get(get_product))
        .route("/categories", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/catalog/products",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Active products as display cards, with category counts", body = ApiResponse<CatalogList>),
        (status = 502, description = "Backend query failed"),
        (status = 503, description = "Backend not configured"),
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<CatalogList>>> {
    let resp = catalog_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/products/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse<ProductDetail>),
        (status = 404, description = "No active product with that slug"),
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = catalog_service::get_product(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/categories",
    responses(
        (status = 200, description = "Active categories by name with product counts", body = ApiResponse<CategoryList>),
        (status = 503, description = "Backend not configured"),
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_categories(&state).await?;
    Ok(Json(resp))
}
