//! Application root: owns the backend client, the session, the cart,
//! and the router, and wires the page workflows to them.

use tracing::instrument;

use crate::api::StorefrontApi;
use crate::cart::{Cart, CartLine};
use crate::models::Product;
use crate::pages::{CheckoutPage, LoginForm, ProfilePage};
use crate::router::{Route, Router};
use crate::session::Session;

/// The composition root. Pages borrow the client and the shared state
/// from here; mutations to the session and the cart all flow through it.
#[derive(Debug)]
pub struct App<A> {
    api: A,
    session: Session,
    cart: Cart,
    router: Router,
}

impl<A: StorefrontApi> App<A> {
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self {
            api,
            session: Session::unauthenticated(),
            cart: Cart::new(),
            router: Router::new(),
        }
    }

    /// Probe the backend for an existing cookie session.
    ///
    /// Runs once at startup. Any failure leaves the session
    /// unauthenticated; it never blocks the app from starting.
    #[instrument(skip(self))]
    pub async fn bootstrap(&mut self) {
        let outcome = self.api.is_logged_in().await;
        self.session.apply_probe(outcome);
    }

    /// Submit the sign-in form against the shared session.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message.
    pub async fn sign_in(&mut self, form: &mut LoginForm) -> Result<String, String> {
        form.submit(&self.api, &mut self.session).await
    }

    /// Sign out. The local session is always cleared, even when the
    /// backend call fails; a failure message is returned for display.
    pub async fn sign_out(&mut self) -> Option<String> {
        let outcome = self.api.logout().await;
        self.session.reset();
        match outcome {
            Ok(envelope) if envelope.is_success() => None,
            Ok(envelope) => Some(envelope.message_or("Sign-out failed.").to_owned()),
            Err(error) => Some(error.user_message()),
        }
    }

    /// Submit the profile form against the shared session.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message.
    pub async fn update_profile(&mut self, page: &mut ProfilePage) -> Result<String, String> {
        page.submit(&self.api, &mut self.session).await
    }

    /// Submit the checkout against the shared cart. Returns `true` on
    /// success, after which the cart is empty.
    pub async fn checkout(&mut self, page: &mut CheckoutPage) -> bool {
        page.submit(&self.api, &self.session, &mut self.cart).await
    }

    pub fn add_to_cart(&mut self, product: Product) {
        self.cart.add(product);
    }

    pub fn remove_cart_line(&mut self, index: usize) -> Option<CartLine> {
        self.cart.remove_at(index)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Navigate to `path` through the router's guards.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when a guard denies the navigation.
    pub fn navigate(&mut self, path: &str) -> Result<Route, String> {
        self.router.navigate(path, &self.session)
    }

    #[must_use]
    pub const fn current_route(&self) -> Route {
        self.router.current()
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }
}
