use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub image_url: Option<String>,
}

impl CartLineItem {
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Paid,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Packed => "PACKED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferType {
    #[default]
    Percent,
    Fixed,
    BuyXGetY,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponType {
    #[default]
    Percent,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdminOrder {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub item_count: u32,
    pub total: i64,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdminProduct {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub category: String,
    pub stock: f64,
    pub active: bool,
    pub image_url: String,
    /// Weak reference to an [`AdminOffer`]; cleared when the offer goes away.
    pub offer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdminOffer {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub value: f64,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub active: bool,
    #[schema(value_type = Vec<i64>)]
    pub product_ids: BTreeSet<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdminCoupon {
    pub id: i64,
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub value: f64,
    pub min_order: f64,
    pub usage_limit: f64,
    pub used_count: i64,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedAddress {
    pub id: String,
    pub label: String,
    pub is_default: bool,
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub landmark: Option<String>,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub offer_type: String,
    pub discount_percent: Option<f64>,
    pub buy_qty: Option<i64>,
    pub get_qty: Option<i64>,
    pub images: Vec<String>,
    pub categories: Vec<CategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogCategory {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub product_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerOrder {
    pub id: i64,
    pub status: String,
    pub payment_status: String,
    pub grand_total: f64,
    pub grand_total_label: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CustomerOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerOrderItem {
    pub id: i64,
    pub product_name: String,
    pub qty: i64,
    pub final_price: f64,
}

/// A product as the privileged admin function lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManagedProduct {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub active: bool,
    pub images: Vec<String>,
}
