//! The admin console's in-memory collections: orders, products, offers and
//! coupons.
//!
//! Mutations only touch this struct. Product/offer links are weak ids and
//! are scrubbed on delete; nothing else about them is enforced.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ValidationError;
use crate::{
    models::{
        AdminCoupon, AdminOffer, AdminOrder, AdminProduct, CouponType, OfferType, OrderStatus,
        PaymentStatus,
    },
    money::format_inr_i64,
    seed,
};

const PRODUCT_ID_FLOOR: i64 = 1000;
const OFFER_ID_FLOOR: i64 = 0;
const COUPON_ID_FLOOR: i64 = 0;

const DEFAULT_CATEGORY: &str = "Uncategorized";
const DEFAULT_PRODUCT_IMAGE: &str = "/sfanelogo.jpg";

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OfferDraft {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub offer_type: OfferType,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub start_at: String,
    #[serde(default)]
    pub end_at: String,
    #[serde(default)]
    pub product_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CouponDraft {
    #[serde(default)]
    pub code: String,
    #[serde(rename = "type", default)]
    pub coupon_type: CouponType,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub min_order: String,
    #[serde(default)]
    pub usage_limit: String,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub orders: usize,
    pub revenue: i64,
    pub revenue_label: String,
    pub products: usize,
    pub coupons_live: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub orders: Vec<AdminOrder>,
    pub products: Vec<AdminProduct>,
    pub offers: Vec<AdminOffer>,
    pub coupons: Vec<AdminCoupon>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Dashboard {
    pub fn seeded() -> Self {
        Self {
            orders: seed::initial_orders(),
            products: seed::initial_products(),
            offers: seed::initial_offers(),
            coupons: seed::initial_coupons(),
        }
    }

    pub fn empty() -> Self {
        Self {
            orders: Vec::new(),
            products: Vec::new(),
            offers: Vec::new(),
            coupons: Vec::new(),
        }
    }

    // ---- orders ----

    /// Any status may follow any other.
    pub fn update_order_status(&mut self, order_id: i64, status: OrderStatus) -> Option<AdminOrder> {
        let order = self.orders.iter_mut().find(|o| o.id == order_id)?;
        order.status = status;
        Some(order.clone())
    }

    pub fn filter_orders(&self, status: Option<OrderStatus>, query: Option<&str>) -> Vec<AdminOrder> {
        let query = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
        self.orders
            .iter()
            .filter(|order| status.is_none_or(|s| order.status == s))
            .filter(|order| {
                query.is_empty()
                    || order.customer_name.to_lowercase().contains(&query)
                    || order.id.to_string().contains(&query)
                    || order.phone.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn revenue(&self) -> i64 {
        self.orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Paid)
            .map(|o| o.total)
            .sum()
    }

    pub fn summary(&self) -> DashboardSummary {
        let revenue = self.revenue();
        DashboardSummary {
            orders: self.orders.len(),
            revenue,
            revenue_label: format_inr_i64(revenue),
            products: self.products.len(),
            coupons_live: self.coupons.iter().filter(|c| c.active).count(),
        }
    }

    // ---- products ----

    pub fn create_product(&mut self, draft: ProductDraft) -> Result<AdminProduct, ValidationError> {
        let required = || ValidationError::new("Product name, slug, price, and stock are required.");
        let name = non_blank(&draft.name).ok_or_else(required)?;
        let slug = non_blank(&draft.slug).ok_or_else(required)?;
        let price = parse_finite(&draft.price).ok_or_else(required)?;
        let stock = parse_finite(&draft.stock).ok_or_else(required)?;

        let product = AdminProduct {
            id: next_id(self.products.iter().map(|p| p.id), PRODUCT_ID_FLOOR),
            name,
            slug,
            price,
            category: non_blank(&draft.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            stock,
            active: true,
            image_url: non_blank(&draft.image_url)
                .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string()),
            offer_id: None,
        };
        self.products.insert(0, product.clone());
        Ok(product)
    }

    pub fn toggle_product_active(&mut self, product_id: i64) -> Option<AdminProduct> {
        let product = self.products.iter_mut().find(|p| p.id == product_id)?;
        product.active = !product.active;
        Some(product.clone())
    }

    /// Points a product at a single offer, or clears it. No check is made
    /// that the offer exists or lists the product.
    pub fn assign_offer(&mut self, product_id: i64, offer_id: Option<i64>) -> Option<AdminProduct> {
        let product = self.products.iter_mut().find(|p| p.id == product_id)?;
        product.offer_id = offer_id;
        Some(product.clone())
    }

    pub fn remove_product(&mut self, product_id: i64) -> Option<AdminProduct> {
        let pos = self.products.iter().position(|p| p.id == product_id)?;
        let removed = self.products.remove(pos);
        for offer in &mut self.offers {
            offer.product_ids.remove(&product_id);
        }
        Some(removed)
    }

    // ---- offers ----

    pub fn create_offer(&mut self, draft: OfferDraft) -> Result<AdminOffer, ValidationError> {
        let required = || ValidationError::new("Offer title, value, start and end date are required.");
        let title = non_blank(&draft.title).ok_or_else(required)?;
        let value = parse_finite(&draft.value).ok_or_else(required)?;
        let start_at = non_blank(&draft.start_at).ok_or_else(required)?;
        let end_at = non_blank(&draft.end_at).ok_or_else(required)?;

        let offer = AdminOffer {
            id: next_id(self.offers.iter().map(|o| o.id), OFFER_ID_FLOOR),
            title,
            offer_type: draft.offer_type,
            value,
            start_at: parse_local_datetime(&start_at)?,
            end_at: parse_local_datetime(&end_at)?,
            active: true,
            product_ids: draft.product_ids.into_iter().collect::<BTreeSet<_>>(),
        };
        self.offers.insert(0, offer.clone());
        Ok(offer)
    }

    pub fn toggle_offer_active(&mut self, offer_id: i64) -> Option<AdminOffer> {
        let offer = self.offers.iter_mut().find(|o| o.id == offer_id)?;
        offer.active = !offer.active;
        Some(offer.clone())
    }

    pub fn remove_offer(&mut self, offer_id: i64) -> Option<AdminOffer> {
        let pos = self.offers.iter().position(|o| o.id == offer_id)?;
        let removed = self.offers.remove(pos);
        for product in &mut self.products {
            if product.offer_id == Some(offer_id) {
                product.offer_id = None;
            }
        }
        Some(removed)
    }

    // ---- coupons ----

    pub fn create_coupon(&mut self, draft: CouponDraft) -> Result<AdminCoupon, ValidationError> {
        let required =
            || ValidationError::new("Coupon code, value, min order, and usage limit are required.");
        let code = non_blank(&draft.code).ok_or_else(required)?;
        let value = parse_finite(&draft.value).ok_or_else(required)?;
        let min_order = parse_finite(&draft.min_order).ok_or_else(required)?;
        let usage_limit = parse_finite(&draft.usage_limit).ok_or_else(required)?;

        let start_at = optional_datetime(draft.start_at.as_deref())?;
        let end_at = optional_datetime(draft.end_at.as_deref())?;

        let coupon = AdminCoupon {
            id: next_id(self.coupons.iter().map(|c| c.id), COUPON_ID_FLOOR),
            code: code.to_uppercase(),
            coupon_type: draft.coupon_type,
            value,
            min_order,
            usage_limit,
            used_count: 0,
            start_at,
            end_at,
            active: true,
        };
        self.coupons.insert(0, coupon.clone());
        Ok(coupon)
    }

    pub fn toggle_coupon_active(&mut self, coupon_id: i64) -> Option<AdminCoupon> {
        let coupon = self.coupons.iter_mut().find(|c| c.id == coupon_id)?;
        coupon.active = !coupon.active;
        Some(coupon.clone())
    }

    pub fn remove_coupon(&mut self, coupon_id: i64) -> Option<AdminCoupon> {
        let pos = self.coupons.iter().position(|c| c.id == coupon_id)?;
        Some(self.coupons.remove(pos))
    }
}

fn next_id(ids: impl Iterator<Item = i64>, floor: i64) -> i64 {
    ids.fold(floor, i64::max) + 1
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A present, finite number. Blank input is treated as missing.
pub fn parse_finite(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_local_datetime(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| ValidationError::new(format!("Invalid date \"{value}\", expected YYYY-MM-DDTHH:MM.")))
}

fn optional_datetime(value: Option<&str>) -> Result<Option<NaiveDateTime>, ValidationError> {
    match value.and_then(non_blank) {
        Some(value) => parse_local_datetime(&value).map(Some),
        None => Ok(None),
    }
}
