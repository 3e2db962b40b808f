//! Order endpoints: history and checkout submission.

use maple_market_core::ProductId;
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use crate::cart::CartLine;
use crate::models::Order;

use super::{Ack, ApiError, BackendClient, Envelope};

/// One cart line as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub qty: u32,
}

impl From<&CartLine> for CheckoutLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id,
            qty: line.quantity,
        }
    }
}

/// Fetch the current user's past orders.
#[instrument(skip(client))]
pub async fn history(client: &BackendClient) -> Result<Envelope<Vec<Order>>, ApiError> {
    client
        .execute(Method::GET, "orders/history", &[], None)
        .await
}

/// Submit the full cart line list in one call. No partial checkout,
/// no retry.
#[instrument(skip(client, lines), fields(line_count = lines.len()))]
pub async fn checkout(client: &BackendClient, lines: &[CheckoutLine]) -> Result<Ack, ApiError> {
    client
        .execute(
            Method::POST,
            "orders/checkout",
            &[],
            Some(serde_json::to_value(lines)?),
        )
        .await
}
