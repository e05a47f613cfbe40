use crate::{
    backend::BackendClient,
    domain::catalog::{
        NO_OFFER, parse_category_row, parse_order_row, parse_product_row, parse_rows,
        project_catalog,
    },
    dto::catalog::{CatalogList, CategoryList, CustomerOrderList, ProductDetail},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CatalogProduct, CategoryRef},
    response::{ApiResponse, Meta},
    routes::params::{CatalogQuery, CatalogSort},
    state::AppState,
};

const PRODUCT_COLUMNS: &str = "id,name,slug,description,price,original_price,offer_type,\
discount_percent,buy_qty,get_qty,active,product_images(image_url),\
product_categories(categories(id,name,slug))";

const ORDER_COLUMNS: &str =
    "id,status,payment_status,grand_total,created_at,order_items(id,product_name,qty,final_price)";

/// Query-surface parameters for the active product listing.
pub fn product_params(query: &CatalogQuery) -> Vec<(&'static str, String)> {
    let sort = query.sort.unwrap_or_default();
    let mut params = vec![
        ("select", PRODUCT_COLUMNS.to_string()),
        ("active", "eq.true".to_string()),
        ("order", sort.order_clause().to_string()),
    ];
    if query.offers_only() {
        params.push(("offer_type", format!("neq.{NO_OFFER}")));
    }
    if let Some(search) = query.search() {
        params.push(("name", format!("ilike.*{search}*")));
    }
    params
}

async fn fetch_products(
    backend: &BackendClient,
    params: &[(&str, String)],
) -> AppResult<Vec<CatalogProduct>> {
    let rows = backend.select("products", params, None).await?;
    Ok(parse_rows("products", rows, parse_product_row))
}

async fn fetch_categories(backend: &BackendClient) -> AppResult<Vec<CategoryRef>> {
    let params = [
        ("select", "id,name,slug,active".to_string()),
        ("active", "eq.true".to_string()),
        ("order", "name.asc".to_string()),
    ];
    let rows = backend.select("categories", &params, None).await?;
    Ok(parse_rows("categories", rows, parse_category_row))
}

pub async fn list_products(
    state: &AppState,
    query: CatalogQuery,
) -> AppResult<ApiResponse<CatalogList>> {
    let backend = state.backend()?;

    let params = product_params(&query);
    let (products, categories) =
        tokio::try_join!(fetch_products(backend, &params), fetch_categories(backend))?;

    let (products, categories) = project_catalog(products, categories, query.category());
    let items: Vec<_> = products.iter().map(CatalogProduct::to_card).collect();

    let meta = Meta::new(items.len());
    Ok(ApiResponse::success(
        "OK",
        CatalogList { items, categories },
        Some(meta),
    ))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let backend = state.backend()?;

    let params = product_params(&CatalogQuery {
        sort: Some(CatalogSort::Newest),
        ..Default::default()
    });
    let (products, categories) =
        tokio::try_join!(fetch_products(backend, &params), fetch_categories(backend))?;

    let (_, items) = project_catalog(products, categories, None);
    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", CategoryList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, slug: &str) -> AppResult<ApiResponse<ProductDetail>> {
    let backend = state.backend()?;

    let params = [
        ("select", PRODUCT_COLUMNS.to_string()),
        ("slug", format!("eq.{slug}")),
        ("active", "eq.true".to_string()),
        ("limit", "1".to_string()),
    ];
    let product = fetch_products(backend, &params)
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)?;

    let card = product.to_card();
    Ok(ApiResponse::success("OK", ProductDetail { product, card }, None))
}

/// The signed-in user's orders, newest first. Runs with the user's token so
/// row-level policies apply.
pub async fn list_customer_orders(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CustomerOrderList>> {
    let backend = state.backend()?;

    let params = [
        ("select", ORDER_COLUMNS.to_string()),
        ("user_id", format!("eq.{}", user.user_id)),
        ("order", "created_at.desc".to_string()),
    ];
    let rows = backend
        .select("orders", &params, Some(&user.access_token))
        .await?;
    let items = parse_rows("orders", rows, parse_order_row);

    let meta = Meta::new(items.len());
    Ok(ApiResponse::success("OK", CustomerOrderList { items }, Some(meta)))
}
