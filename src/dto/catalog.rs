use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::catalog::CatalogCard,
    models::{CatalogCategory, CatalogProduct, CustomerOrder},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogList {
    pub items: Vec<CatalogCard>,
    pub categories: Vec<CatalogCategory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<CatalogCategory>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: CatalogProduct,
    pub card: CatalogCard,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerOrderList {
    pub items: Vec<CustomerOrder>,
}
