//! Product read models.
//!
//! The catalog is owned by the backend; the client treats products as
//! immutable snapshots. Admin create/delete are fire-and-confirm round
//! trips and the canonical list is always re-fetched afterwards, so no
//! type here is ever mutated locally.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use maple_market_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A product snapshot as returned by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image payload: either a bare base64 string or a full data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl Product {
    /// Normalize the image payload to a data URL, if any.
    ///
    /// The backend stores either a full `data:` URL or a bare base64
    /// string; bare strings are assumed to be PNG.
    #[must_use]
    pub fn image_data_url(&self) -> Option<String> {
        let raw = self.image_base64.as_deref()?;
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with("data:") {
            Some(raw.to_owned())
        } else {
            Some(format!("data:image/png;base64,{raw}"))
        }
    }
}

/// Encode raw image bytes as the data URL the backend expects.
#[must_use]
pub fn encode_image_data(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

/// One page of the paginated catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    /// 0-based page index.
    pub page: u32,
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    pub total_pages: u32,
    /// Whether this is the last page.
    #[serde(default)]
    pub last: bool,
}
