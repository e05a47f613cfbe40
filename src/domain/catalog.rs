//! Read-side shaping of backend catalog rows.
//!
//! Backend rows are loosely typed: numeric columns may arrive as JSON
//! numbers or strings, joins may be null. [`parse_product_row`] and friends
//! are the only way a row becomes a typed record; a row that fails to parse
//! is dropped with a warning rather than coerced to a default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    models::{
        CatalogCategory, CatalogProduct, CategoryRef, CustomerOrder, CustomerOrderItem,
        ManagedProduct,
    },
    money::format_inr,
};

pub const NO_OFFER: &str = "NONE";
pub const FALLBACK_IMAGE: &str = "/Allbags.png";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("row does not match the expected shape: {0}")]
    Shape(String),

    #[error("field `{0}` is required")]
    Missing(&'static str),

    #[error("field `{field}` is not numeric: {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

/// A numeric column as the query surface returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<RawNumber>,
    #[serde(default)]
    pub original_price: Option<RawNumber>,
    #[serde(default)]
    pub offer_type: Option<String>,
    #[serde(default)]
    pub discount_percent: Option<RawNumber>,
    #[serde(default)]
    pub buy_qty: Option<i64>,
    #[serde(default)]
    pub get_qty: Option<i64>,
    #[serde(default)]
    pub product_images: Option<Vec<ImageRow>>,
    #[serde(default)]
    pub product_categories: Option<Vec<ProductCategoryRow>>,
}

#[derive(Debug, Deserialize)]
pub struct ImageRow {
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductCategoryRow {
    #[serde(default)]
    pub categories: Option<CategoryRef>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct ManagedProductRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub price: Option<RawNumber>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub product_images: Option<Vec<ImageRow>>,
}

#[derive(Debug, Deserialize)]
pub struct OrderRow {
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub grand_total: Option<RawNumber>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub order_items: Option<Vec<OrderItemRow>>,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRow {
    pub id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
    #[serde(default)]
    pub final_price: Option<RawNumber>,
}

/// Display-ready product tile.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogCard {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub price_label: String,
    pub original_price: Option<f64>,
    pub original_price_label: Option<String>,
    pub has_discount: bool,
    pub image_url: String,
    pub badge: Option<String>,
}

fn coerce(field: &'static str, raw: Option<RawNumber>) -> Result<Option<f64>, RowError> {
    match raw {
        None => Ok(None),
        Some(RawNumber::Number(n)) if n.is_finite() => Ok(Some(n)),
        Some(RawNumber::Number(n)) => Err(RowError::NotNumeric {
            field,
            value: n.to_string(),
        }),
        Some(RawNumber::Text(text)) => {
            let parsed = text.trim().parse::<f64>().ok().filter(|n| n.is_finite());
            match parsed {
                Some(n) => Ok(Some(n)),
                None => Err(RowError::NotNumeric { field, value: text }),
            }
        }
    }
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, RowError> {
    serde_json::from_value(value).map_err(|e| RowError::Shape(e.to_string()))
}

fn image_urls(images: Option<Vec<ImageRow>>) -> Vec<String> {
    images
        .unwrap_or_default()
        .into_iter()
        .filter_map(|img| img.image_url)
        .filter(|url| !url.is_empty())
        .collect()
}

pub fn parse_product_row(value: Value) -> Result<CatalogProduct, RowError> {
    let row: ProductRow = from_value(value)?;

    let price = coerce("price", row.price)?.ok_or(RowError::Missing("price"))?;
    let original_price = coerce("original_price", row.original_price)?;
    let discount_percent = coerce("discount_percent", row.discount_percent)?;

    let images = image_urls(row.product_images);

    let categories = row
        .product_categories
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| entry.categories)
        .collect();

    Ok(CatalogProduct {
        id: row.id,
        name: row.name,
        slug: row.slug,
        description: row.description,
        price,
        original_price,
        offer_type: row
            .offer_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| NO_OFFER.to_string()),
        discount_percent,
        buy_qty: row.buy_qty,
        get_qty: row.get_qty,
        images,
        categories,
    })
}

pub fn parse_category_row(value: Value) -> Result<CategoryRef, RowError> {
    let row: CategoryRow = from_value(value)?;
    Ok(CategoryRef {
        id: row.id,
        name: row.name,
        slug: row.slug,
    })
}

pub fn parse_managed_product_row(value: Value) -> Result<ManagedProduct, RowError> {
    let row: ManagedProductRow = from_value(value)?;
    let price = coerce("price", row.price)?.ok_or(RowError::Missing("price"))?;
    Ok(ManagedProduct {
        id: row.id,
        name: row.name,
        slug: row.slug,
        price,
        active: row.active,
        images: image_urls(row.product_images),
    })
}

/// Order amounts that are null count as zero; amounts that are present but
/// not numeric reject the whole row.
pub fn parse_order_row(value: Value) -> Result<CustomerOrder, RowError> {
    let row: OrderRow = from_value(value)?;
    let grand_total = coerce("grand_total", row.grand_total)?.unwrap_or(0.0);

    let items = row
        .order_items
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            Ok(CustomerOrderItem {
                id: item.id,
                product_name: item.product_name.unwrap_or_else(|| "Item".to_string()),
                qty: item.qty.unwrap_or(0),
                final_price: coerce("final_price", item.final_price)?.unwrap_or(0.0),
            })
        })
        .collect::<Result<Vec<_>, RowError>>()?;

    Ok(CustomerOrder {
        id: row.id,
        status: row.status.unwrap_or_else(|| "CREATED".to_string()),
        payment_status: row.payment_status.unwrap_or_else(|| "pending".to_string()),
        grand_total,
        grand_total_label: format_inr(grand_total),
        created_at: row.created_at,
        items,
    })
}

/// Parses every row, dropping (and logging) the ones that do not fit.
pub fn parse_rows<T>(
    source: &str,
    rows: Vec<Value>,
    parse: impl Fn(Value) -> Result<T, RowError>,
) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match parse(row) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(source, index, error = %err, "dropping malformed backend row");
                None
            }
        })
        .collect()
}

impl CatalogProduct {
    pub fn has_offer(&self) -> bool {
        self.offer_type != NO_OFFER
    }

    pub fn badge(&self) -> Option<String> {
        if !self.has_offer() {
            return None;
        }
        match self.discount_percent {
            Some(percent) if percent != 0.0 => Some(format!("{percent}% off")),
            _ => Some("Offer".to_string()),
        }
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn in_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c.slug == slug)
    }

    pub fn to_card(&self) -> CatalogCard {
        CatalogCard {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            price: self.price,
            price_label: format_inr(self.price),
            original_price: self.original_price,
            original_price_label: self.original_price.map(format_inr),
            has_discount: self.original_price.is_some_and(|o| o > self.price),
            image_url: self.primary_image().unwrap_or(FALLBACK_IMAGE).to_string(),
            badge: self.badge(),
        }
    }
}

/// Applies the optional category filter and counts, per category, how many
/// of the remaining products belong to it.
pub fn project_catalog(
    products: Vec<CatalogProduct>,
    categories: Vec<CategoryRef>,
    category_slug: Option<&str>,
) -> (Vec<CatalogProduct>, Vec<CatalogCategory>) {
    let products: Vec<CatalogProduct> = match category_slug.filter(|s| !s.is_empty()) {
        Some(slug) => products.into_iter().filter(|p| p.in_category(slug)).collect(),
        None => products,
    };

    let categories = categories
        .into_iter()
        .map(|category| {
            let product_count = products
                .iter()
                .filter(|p| p.categories.iter().any(|c| c.id == category.id))
                .count();
            CatalogCategory {
                id: category.id,
                name: category.name,
                slug: category.slug,
                product_count,
            }
        })
        .collect();

    (products, categories)
}
