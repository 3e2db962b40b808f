//! Favorites endpoints.
//!
//! The list returns full product snapshots; the catalog workflow derives
//! both its id set and its display list from one response.

use maple_market_core::ProductId;
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use crate::models::Product;

use super::{Ack, ApiError, BackendClient, Envelope};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteRequest {
    product_id: ProductId,
}

/// Fetch the current user's favorite product snapshots.
#[instrument(skip(client))]
pub async fn list(client: &BackendClient) -> Result<Envelope<Vec<Product>>, ApiError> {
    client.execute(Method::GET, "favorites", &[], None).await
}

/// Add a product to the favorites.
#[instrument(skip(client))]
pub async fn add(client: &BackendClient, id: ProductId) -> Result<Ack, ApiError> {
    client
        .execute(
            Method::POST,
            "favorites",
            &[],
            Some(serde_json::to_value(FavoriteRequest { product_id: id })?),
        )
        .await
}

/// Remove a product from the favorites.
#[instrument(skip(client))]
pub async fn remove(client: &BackendClient, id: ProductId) -> Result<Ack, ApiError> {
    client
        .execute_lenient(Method::DELETE, &format!("favorites/{id}"))
        .await
}
