//! Catalog endpoints.
//!
//! Listing is public (the cookie rides along if present); create, update,
//! and delete require an admin session. Mutations are fire-and-confirm:
//! callers re-fetch the catalog page afterwards instead of patching any
//! local list.

use maple_market_core::{Price, ProductId};
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use crate::models::{Product, ProductPage};

use super::{Ack, ApiError, BackendClient, Envelope};

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// Fetch one catalog page. A blank keyword means no filter.
#[instrument(skip(client))]
pub async fn fetch_page(
    client: &BackendClient,
    page: u32,
    size: u32,
    keyword: &str,
) -> Result<Envelope<ProductPage>, ApiError> {
    let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
    let keyword = keyword.trim();
    if !keyword.is_empty() {
        query.push(("keyword", keyword.to_owned()));
    }
    client.execute(Method::GET, "products", &query, None).await
}

/// Create a product (admin session required).
#[instrument(skip(client, product), fields(name = %product.name))]
pub async fn create(
    client: &BackendClient,
    product: &NewProduct,
) -> Result<Envelope<Product>, ApiError> {
    client
        .execute(
            Method::POST,
            "products",
            &[],
            Some(serde_json::to_value(product)?),
        )
        .await
}

/// Update a product (admin session required).
#[instrument(skip(client, product), fields(name = %product.name))]
pub async fn update(
    client: &BackendClient,
    id: ProductId,
    product: &NewProduct,
) -> Result<Envelope<Product>, ApiError> {
    client
        .execute(
            Method::PUT,
            &format!("products/{id}"),
            &[],
            Some(serde_json::to_value(product)?),
        )
        .await
}

/// Delete a product (admin session required).
///
/// The backend may answer 200 with no body here, hence the lenient parse.
#[instrument(skip(client))]
pub async fn delete(client: &BackendClient, id: ProductId) -> Result<Ack, ApiError> {
    client
        .execute_lenient(Method::DELETE, &format!("products/{id}"))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_new_product_serializes_camel_case() {
        let product = NewProduct {
            name: "Apple".to_owned(),
            price: Price::new(Decimal::from(30)).expect("non-negative"),
            image_base64: Some("data:image/png;base64,aGVsbG8=".to_owned()),
        };
        let value = serde_json::to_value(&product).expect("serialize");
        assert_eq!(value["name"], "Apple");
        assert_eq!(value["imageBase64"], "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_new_product_omits_missing_image() {
        let product = NewProduct {
            name: "Apple".to_owned(),
            price: Price::ZERO,
            image_base64: None,
        };
        let value = serde_json::to_value(&product).expect("serialize");
        assert!(value.get("imageBase64").is_none());
    }
}
