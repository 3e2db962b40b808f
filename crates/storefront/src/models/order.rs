//! Order-history and sales-summary read models.

use maple_market_core::{Price, ProductId};
use serde::Deserialize;

use super::Product;

/// A past order as returned by `GET /orders/history`.
///
/// Orders with a missing id are malformed records; the order-history
/// workflow filters them out before display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<maple_market_core::OrderId>,
    #[serde(default)]
    pub order_items: Vec<OrderLine>,
}

/// One stored line of an order.
///
/// The backend may store a line whose product reference no longer
/// resolves, and older records omit the quantity; the accessors apply
/// the display defaults (quantity 1, price zero, placeholder name).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub qty: Option<u32>,
}

impl OrderLine {
    /// Product id, when the reference still resolves.
    #[must_use]
    pub fn product_id(&self) -> Option<ProductId> {
        self.product.as_ref().map(|p| p.id)
    }

    /// Display name, with a placeholder for unresolvable products.
    #[must_use]
    pub fn name(&self) -> &str {
        self.product
            .as_ref()
            .map_or("Unnamed product", |p| p.name.as_str())
    }

    /// Unit price; zero when the product reference is gone.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.product.as_ref().map_or(Price::ZERO, |p| p.price)
    }

    /// Quantity, defaulting to 1 when the record omits it.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.qty.unwrap_or(1)
    }

    /// `unit price x quantity` for this stored line.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price().times(self.quantity())
    }
}

/// One aggregated row of `GET /orders/sales/summary`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub total_qty: u64,
    pub total_amount: Price,
}
