use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::CartLineItem,
    money::format_inr_i64,
    seed,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    pub saved: Vec<CartLineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartTotals {
    pub subtotal: i64,
    pub shipping: i64,
    pub total: i64,
    pub subtotal_label: String,
    pub shipping_label: String,
    pub total_label: String,
}

impl CartState {
    pub fn new(items: Vec<CartLineItem>) -> Self {
        Self {
            items,
            saved: Vec::new(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::initial_cart())
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    pub fn is_saved(&self, item_id: &str) -> bool {
        self.saved.iter().any(|item| item.id == item_id)
    }

    /// A quantity of zero or less removes the line. Returns `false` when the
    /// item is not in the bag.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> bool {
        let Some(pos) = self.items.iter().position(|item| item.id == item_id) else {
            return false;
        };
        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        true
    }

    pub fn move_to_saved(&mut self, item_id: &str) -> bool {
        let Some(pos) = self.items.iter().position(|item| item.id == item_id) else {
            return false;
        };
        let item = self.items.remove(pos);
        self.saved.retain(|saved| saved.id != item.id);
        self.saved.push(item);
        true
    }

    /// Moves a saved item back into the bag with quantity 1. If the bag
    /// already holds that id the bag line wins.
    pub fn restore(&mut self, item_id: &str) -> bool {
        let Some(pos) = self.saved.iter().position(|item| item.id == item_id) else {
            return false;
        };
        let mut item = self.saved.remove(pos);
        if !self.contains(&item.id) {
            item.quantity = 1;
            self.items.push(item);
        }
        true
    }

    pub fn remove_saved(&mut self, item_id: &str) -> bool {
        let before = self.saved.len();
        self.saved.retain(|item| item.id != item_id);
        self.saved.len() != before
    }

    pub fn totals(&self) -> CartTotals {
        totals(&self.items)
    }
}

pub fn subtotal(items: &[CartLineItem]) -> i64 {
    items.iter().map(CartLineItem::line_total).sum()
}

pub fn totals(items: &[CartLineItem]) -> CartTotals {
    let subtotal = subtotal(items);
    let shipping = 0;
    let total = subtotal + shipping;
    CartTotals {
        subtotal,
        shipping,
        total,
        subtotal_label: format_inr_i64(subtotal),
        shipping_label: if shipping == 0 {
            "Free".to_string()
        } else {
            format_inr_i64(shipping)
        },
        total_label: format_inr_i64(total),
    }
}
