//! Page-level workflows.
//!
//! Each page independently fetches its own data on entry and re-derives
//! local view state; no page talks to another page directly. Every
//! workflow is an explicit idle/loading/ready/failed state machine, and
//! mutations commit only in the success transition - never optimistically
//! before the backend confirms.

pub mod account;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod sales;

pub use account::{ForgotPasswordForm, LoginForm, ProfilePage, RegisterForm};
pub use catalog::CatalogPage;
pub use checkout::CheckoutPage;
pub use orders::{OrderHistoryPage, OrderLineView, OrderView};
pub use sales::SalesPage;

/// Lifecycle of a page's single outstanding fetch.
///
/// A workflow refuses to start a second call while one is outstanding
/// (`Loading`), which is what disables the triggering control in the
/// view. There is no cancellation: a result arriving after the user
/// moved on is simply applied to state nobody renders anymore.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// One call outstanding.
    Loading,
    /// Last fetch succeeded.
    Ready(T),
    /// Last fetch failed or a precondition blocked it; the string is the
    /// user-facing message shown inline.
    Failed(String),
}

impl<T> FetchState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
