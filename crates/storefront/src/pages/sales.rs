//! Sales-summary workflow (admin dashboard).
//!
//! Read-only. The admin requirement is re-validated here at the point of
//! data fetch, independently of the router's gating: route gating alone
//! can be bypassed by navigating directly.

use crate::api::StorefrontApi;
use crate::models::SalesRow;
use crate::session::Session;

use super::FetchState;

/// Shown when the view is entered without authentication + admin role.
pub const ADMIN_REQUIRED: &str =
    "Please sign in with an administrator account to view sales figures.";

/// State for the `/checksales` view. Drives both the quantity bar chart
/// and the revenue detail table.
#[derive(Debug, Default)]
pub struct SalesPage {
    state: FetchState<Vec<SalesRow>>,
}

impl SalesPage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FetchState::Idle,
        }
    }

    /// Fetch the summary rows (on entering the view).
    ///
    /// Without both authentication and the admin role no network call is
    /// made at all; the gate failure, an empty result, and a fetch error
    /// are three distinct, distinguishable states.
    pub async fn enter<A: StorefrontApi>(&mut self, api: &A, session: &Session) {
        if self.state.is_loading() {
            return;
        }
        if !session.is_authenticated() || !session.is_admin() {
            self.state = FetchState::Failed(ADMIN_REQUIRED.to_owned());
            return;
        }
        self.state = FetchState::Loading;

        self.state = match api.sales_summary().await {
            Ok(envelope) if envelope.is_success() => {
                FetchState::Ready(envelope.data.unwrap_or_default())
            }
            Ok(envelope) => FetchState::Failed(
                envelope.message_or("Could not load the sales summary.").to_owned(),
            ),
            Err(error) => FetchState::Failed(error.user_message()),
        };
    }

    #[must_use]
    pub fn rows(&self) -> &[SalesRow] {
        self.state.ready().map_or(&[], Vec::as_slice)
    }

    /// Loaded successfully but nothing sold yet - distinct from a failed
    /// fetch, which reports through [`FetchState::error`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.ready().is_some_and(Vec::is_empty)
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<Vec<SalesRow>> {
        &self.state
    }
}

/// Bar lengths for the quantity chart: each row's quantity scaled so the
/// best seller spans `max_width` columns. Rows with zero quantity get a
/// zero-length bar.
#[must_use]
pub fn bar_widths(rows: &[SalesRow], max_width: usize) -> Vec<usize> {
    let peak = rows.iter().map(|r| r.total_qty).max().unwrap_or(0);
    if peak == 0 {
        return vec![0; rows.len()];
    }
    rows.iter()
        .map(|row| {
            let width = u64::try_from(max_width).unwrap_or(u64::MAX);
            let scaled = row.total_qty.saturating_mul(width) / peak;
            usize::try_from(scaled).unwrap_or(max_width)
        })
        .collect()
}
