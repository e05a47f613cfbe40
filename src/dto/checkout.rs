use serde::Serialize;
use utoipa::ToSchema;

use crate::{domain::cart::CartTotals, models::{CartLineItem, SavedAddress}};

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressList {
    pub items: Vec<SavedAddress>,
    pub default_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutPrefill {
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutSummary {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}
