//! Checkout submission workflow for the `/cart` view.

use crate::api::{CheckoutLine, StorefrontApi};
use crate::cart::Cart;
use crate::session::Session;

/// Shown when checkout is attempted while signed out.
pub const SIGN_IN_REQUIRED: &str = "Please sign in before checking out.";
/// Shown when checkout is attempted with an empty cart.
pub const EMPTY_CART: &str = "Your cart is empty; nothing to check out.";

const DEFAULT_SUCCESS: &str = "Checkout complete.";
const DEFAULT_FAILURE: &str = "Checkout failed. Please try again.";

/// State for the cart view's checkout control.
#[derive(Debug, Default)]
pub struct CheckoutPage {
    message: Option<String>,
    submitting: bool,
}

impl CheckoutPage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: None,
            submitting: false,
        }
    }

    /// The inline message from the last attempt, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submit the full cart in one call. Returns `true` on success.
    ///
    /// Rejected locally - without any network call - when the user is
    /// signed out or the cart is empty, each with its own message. On
    /// success the cart is cleared; on failure it is left intact. No
    /// partial checkout, no retry.
    pub async fn submit<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &Session,
        cart: &mut Cart,
    ) -> bool {
        if self.submitting {
            return false;
        }
        if !session.is_authenticated() {
            self.message = Some(SIGN_IN_REQUIRED.to_owned());
            return false;
        }
        if cart.is_empty() {
            self.message = Some(EMPTY_CART.to_owned());
            return false;
        }

        self.submitting = true;
        let lines: Vec<CheckoutLine> = cart.lines().iter().map(CheckoutLine::from).collect();
        let succeeded = match api.checkout(lines).await {
            Ok(envelope) if envelope.is_success() => {
                cart.clear();
                self.message = Some(envelope.message_or(DEFAULT_SUCCESS).to_owned());
                true
            }
            Ok(envelope) => {
                self.message = Some(envelope.message_or(DEFAULT_FAILURE).to_owned());
                false
            }
            Err(error) => {
                self.message = Some(error.user_message());
                false
            }
        };
        self.submitting = false;
        succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Ack, ApiError, MockStorefrontApi};
    use crate::models::{Product, User};
    use maple_market_core::{Price, ProductId, Role, RoleSet};
    use rust_decimal::Decimal;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            price: Price::new(Decimal::from(price)).expect("non-negative"),
            image_base64: None,
        }
    }

    fn member() -> Session {
        let mut session = Session::unauthenticated();
        let mut user = User::from_probe("alice");
        user.roles = [Role::User].into_iter().collect::<RoleSet>();
        session.establish(user);
        session
    }

    #[tokio::test]
    async fn test_signed_out_checkout_makes_no_network_call() {
        // A mock with no expectations panics on any call.
        let api = MockStorefrontApi::new();
        let mut cart = Cart::new();
        cart.add(product(7, 30));
        let mut page = CheckoutPage::new();

        let ok = page.submit(&api, &Session::unauthenticated(), &mut cart).await;

        assert!(!ok);
        assert_eq!(page.message(), Some(SIGN_IN_REQUIRED));
        assert_eq!(cart.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_makes_no_network_call() {
        let api = MockStorefrontApi::new();
        let mut cart = Cart::new();
        let mut page = CheckoutPage::new();

        let ok = page.submit(&api, &member(), &mut cart).await;

        assert!(!ok);
        assert_eq!(page.message(), Some(EMPTY_CART));
    }

    #[tokio::test]
    async fn test_success_submits_all_lines_and_clears_cart() {
        let mut api = MockStorefrontApi::new();
        api.expect_checkout()
            .withf(|lines| {
                lines.len() == 2 && lines.iter().all(|l| l.qty == 1)
            })
            .times(1)
            .return_once(|_| Ok(Ack::success(None)));

        let mut cart = Cart::new();
        cart.add(product(7, 30));
        cart.add(product(7, 30));
        let mut page = CheckoutPage::new();

        let ok = page.submit(&api, &member(), &mut cart).await;

        assert!(ok);
        assert!(cart.is_empty());
        assert_eq!(page.message(), Some(DEFAULT_SUCCESS));
    }

    #[tokio::test]
    async fn test_failure_leaves_cart_intact_with_backend_message() {
        let mut api = MockStorefrontApi::new();
        api.expect_checkout().times(1).return_once(|_| {
            Err(ApiError::Rejected {
                status: 409,
                message: "insufficient stock".to_owned(),
            })
        });

        let mut cart = Cart::new();
        cart.add(product(7, 30));
        let mut page = CheckoutPage::new();

        let ok = page.submit(&api, &member(), &mut cart).await;

        assert!(!ok);
        assert_eq!(cart.len(), 1);
        assert_eq!(page.message(), Some("insufficient stock"));
    }
}
