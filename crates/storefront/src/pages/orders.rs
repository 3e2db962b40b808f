//! Order-history workflow: fetch, filter malformed records, and the
//! display-only merge of same-product lines.

use maple_market_core::{OrderId, Price, ProductId};

use crate::api::StorefrontApi;
use crate::models::{Order, OrderLine};
use crate::session::Session;

use super::FetchState;

/// Shown when the history view is entered while signed out.
pub const SIGN_IN_REQUIRED: &str = "Please sign in to view your order history.";

/// One displayed line after merging.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineView {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl OrderLineView {
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// One displayed order card.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: OrderId,
    /// Computed over the original pre-merge lines; merging is a display
    /// transform and never changes the total.
    pub total: Price,
    pub lines: Vec<OrderLineView>,
}

/// State for the `/orders/history` view.
#[derive(Debug, Default)]
pub struct OrderHistoryPage {
    state: FetchState<Vec<OrderView>>,
}

impl OrderHistoryPage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FetchState::Idle,
        }
    }

    /// Fetch and aggregate the order history (on entering the view).
    pub async fn enter<A: StorefrontApi>(&mut self, api: &A, session: &Session) {
        if self.state.is_loading() {
            return;
        }
        if !session.is_authenticated() {
            self.state = FetchState::Failed(SIGN_IN_REQUIRED.to_owned());
            return;
        }
        self.state = FetchState::Loading;

        self.state = match api.order_history().await {
            Ok(envelope) if envelope.is_success() => {
                let orders = envelope.data.unwrap_or_default();
                FetchState::Ready(orders.iter().filter_map(build_view).collect())
            }
            Ok(envelope) => FetchState::Failed(
                envelope.message_or("Could not load order history.").to_owned(),
            ),
            Err(error) => FetchState::Failed(error.user_message()),
        };
    }

    #[must_use]
    pub fn orders(&self) -> &[OrderView] {
        self.state.ready().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<Vec<OrderView>> {
        &self.state
    }
}

/// Build the display card for one order; `None` drops a malformed record
/// with no id.
fn build_view(order: &Order) -> Option<OrderView> {
    let id = order.id?;
    Some(OrderView {
        id,
        total: order.order_items.iter().map(OrderLine::subtotal).sum(),
        lines: merge_lines(&order.order_items),
    })
}

/// Merge lines sharing a product id by summing their quantities,
/// preserving first-seen order. Lines with no resolvable product id are
/// kept separate and never merged with each other.
fn merge_lines(items: &[OrderLine]) -> Vec<OrderLineView> {
    let mut views: Vec<OrderLineView> = Vec::with_capacity(items.len());
    for item in items {
        let view = OrderLineView {
            product_id: item.product_id(),
            name: item.name().to_owned(),
            unit_price: item.unit_price(),
            quantity: item.quantity(),
        };
        match view.product_id {
            Some(pid) => {
                if let Some(existing) =
                    views.iter_mut().find(|v| v.product_id == Some(pid))
                {
                    existing.quantity += view.quantity;
                } else {
                    views.push(view);
                }
            }
            None => views.push(view),
        }
    }
    views
}
