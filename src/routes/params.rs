use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::OrderStatus;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Only orders in this status.
    pub status: Option<OrderStatus>,
    /// Case-insensitive match on customer name, phone or order id.
    pub q: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl CatalogSort {
    pub fn order_clause(self) -> &'static str {
        match self {
            CatalogSort::Newest => "created_at.desc",
            CatalogSort::PriceAsc => "price.asc",
            CatalogSort::PriceDesc => "price.desc",
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Category slug.
    pub category: Option<String>,
    pub q: Option<String>,
    /// `offers` keeps only products with an active offer type.
    pub filter: Option<String>,
    pub sort: Option<CatalogSort>,
}

impl CatalogQuery {
    pub fn offers_only(&self) -> bool {
        self.filter.as_deref().map(str::trim) == Some("offers")
    }

    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}
