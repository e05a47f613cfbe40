use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    AdminCoupon, AdminOffer, AdminOrder, AdminProduct, ManagedProduct, OrderStatus,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignOfferRequest {
    #[serde(default)]
    pub offer_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<AdminOrder>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<AdminProduct>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfferList {
    pub items: Vec<AdminOffer>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponList {
    pub items: Vec<AdminCoupon>,
}

/// Form for creating a product through the remote admin function.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ManagedProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ManagedProductList {
    pub items: Vec<ManagedProduct>,
}
