//! Client-side route table and navigation gating.
//!
//! Navigation guards are a convenience, not a security boundary: the
//! sales workflow re-checks the admin role itself, and the backend is
//! the final authority on every call.

use crate::session::Session;

/// Shown when a guard blocks a navigation attempt.
pub const ADMIN_ONLY: &str = "Administrator role required.";

/// The views the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The paginated, searchable catalog.
    Home,
    Cart,
    Login,
    Register,
    ForgotPassword,
    Profile,
    OrderHistory,
    /// The admin sales dashboard.
    Sales,
    NotFound,
}

impl Route {
    /// Resolve a path to a route. Unknown paths map to [`Route::NotFound`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        match normalized {
            "/" | "/products" => Self::Home,
            "/cart" => Self::Cart,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/forgot-password" => Self::ForgotPassword,
            "/profile" => Self::Profile,
            "/orders/history" => Self::OrderHistory,
            "/checksales" => Self::Sales,
            _ => Self::NotFound,
        }
    }

    /// The canonical path for this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Cart => "/cart",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::ForgotPassword => "/forgot-password",
            Self::Profile => "/profile",
            Self::OrderHistory => "/orders/history",
            Self::Sales => "/checksales",
            Self::NotFound => "/404",
        }
    }
}

/// Tracks the currently-displayed route and applies navigation guards.
#[derive(Debug)]
pub struct Router {
    current: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Route::Home,
        }
    }

    #[must_use]
    pub const fn current(&self) -> Route {
        self.current
    }

    /// Navigate to `path`, applying the guards for the current session.
    ///
    /// The profile view redirects to the sign-in view while signed out.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when a guard denies the navigation;
    /// the current route is left unchanged.
    pub fn navigate(&mut self, path: &str, session: &Session) -> Result<Route, String> {
        let target = match Route::parse(path) {
            Route::Sales if !session.is_admin() => return Err(ADMIN_ONLY.to_owned()),
            Route::Profile if !session.is_authenticated() => Route::Login,
            route => route,
        };
        self.current = target;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use rstest::rstest;

    fn admin_session() -> Session {
        let mut session = Session::unauthenticated();
        let admin: User =
            serde_json::from_str(r#"{"id": 1, "username": "admin", "roles": ["ROLE_ADMIN"]}"#)
                .expect("deserialize profile");
        session.establish(admin);
        session
    }

    #[rstest]
    #[case("/", Route::Home)]
    #[case("/products", Route::Home)]
    #[case("/cart", Route::Cart)]
    #[case("/login", Route::Login)]
    #[case("/register", Route::Register)]
    #[case("/forgot-password", Route::ForgotPassword)]
    #[case("/profile", Route::Profile)]
    #[case("/orders/history", Route::OrderHistory)]
    #[case("/checksales", Route::Sales)]
    #[case("/no-such-page", Route::NotFound)]
    fn test_parse_resolves_paths(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::parse(path), expected);
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(Route::parse("/cart/"), Route::Cart);
    }

    #[test]
    fn test_sales_navigation_denied_without_admin_role() {
        let mut router = Router::new();
        let session = Session::unauthenticated();

        let result = router.navigate("/checksales", &session);

        assert_eq!(result, Err(ADMIN_ONLY.to_owned()));
        assert_eq!(router.current(), Route::Home);
    }

    #[test]
    fn test_sales_navigation_allowed_for_admin() {
        let mut router = Router::new();
        let result = router.navigate("/checksales", &admin_session());
        assert_eq!(result, Ok(Route::Sales));
        assert_eq!(router.current(), Route::Sales);
    }

    #[test]
    fn test_profile_redirects_to_login_while_signed_out() {
        let mut router = Router::new();
        let session = Session::unauthenticated();

        let result = router.navigate("/profile", &session);

        assert_eq!(result, Ok(Route::Login));
        assert_eq!(router.current(), Route::Login);
    }

    #[test]
    fn test_unknown_path_lands_on_not_found() {
        let mut router = Router::new();
        let session = Session::unauthenticated();
        assert_eq!(router.navigate("/bogus", &session), Ok(Route::NotFound));
    }
}
