use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::cart::{CartState, CartTotals},
    models::CartLineItem,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MergeCartRequest {
    pub product_id: i64,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub cart_id: Uuid,
    pub items: Vec<CartLineItem>,
    pub saved: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl CartView {
    pub fn new(cart_id: Uuid, cart: &CartState) -> Self {
        Self {
            cart_id,
            items: cart.items.clone(),
            saved: cart.saved.clone(),
            totals: cart.totals(),
        }
    }
}
