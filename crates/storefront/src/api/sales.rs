//! Sales-summary endpoint (admin only).

use reqwest::Method;
use tracing::instrument;

use crate::models::SalesRow;

use super::{ApiError, BackendClient, Envelope};

/// Fetch the per-product sales rows.
///
/// The backend enforces the admin role; the sales workflow additionally
/// refuses to call this without one, so a rejection here means the
/// session expired or the role was revoked since the page was entered.
#[instrument(skip(client))]
pub async fn summary(client: &BackendClient) -> Result<Envelope<Vec<SalesRow>>, ApiError> {
    client
        .execute(Method::GET, "orders/sales/summary", &[], None)
        .await
}
