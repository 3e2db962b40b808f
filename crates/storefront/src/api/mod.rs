//! Backend API client.
//!
//! One function per backend endpoint, grouped by concern (`auth`,
//! `products`, `orders`, `sales`, `users`, `favorites`). Every call:
//!
//! - goes to a fixed backend origin with the session cookie jar attached
//! - parses the uniform `{status, message, data}` envelope
//! - treats a non-2xx transport status as a failure regardless of the
//!   envelope content, carrying the server's `message` when one parses
//!
//! No retries, no caching, no batching. The [`StorefrontApi`] port trait
//! is what the page workflows program against; [`BackendClient`] is the
//! production implementation.

pub mod auth;
pub mod favorites;
pub mod orders;
pub mod products;
pub mod sales;
pub mod users;

pub use auth::{ForgotPasswordRequest, LoginRequest, RegisterRequest, captcha_url};
pub use orders::CheckoutLine;
pub use products::NewProduct;
pub use users::ProfileUpdate;

use std::sync::Arc;

use async_trait::async_trait;
use maple_market_core::{ProductId, UserId};
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::StorefrontConfig;
use crate::models::{LoginProbe, Order, Product, ProductPage, SalesRow, User};

/// Errors from a backend call, one variant per failure class.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: no server reachable, connection dropped,
    /// or the transport's own timeout fired.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status; `message` is the
    /// server-supplied text when the body parsed, else a generic line.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body was not the expected envelope.
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be constructed from the configured origin.
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Resolve to the plain string shown inline near the triggering
    /// control. Server-supplied messages pass through verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the server. Please try again later.".to_owned(),
            Self::Rejected { message, .. } => message.clone(),
            Self::Parse(_) | Self::Url(_) => {
                "The server returned an unexpected response.".to_owned()
            }
        }
    }
}

/// The uniform response envelope every backend endpoint wraps its
/// payload in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub status: i32,
    #[serde(default)]
    pub message: Option<String>,
    // An explicit default path keeps serde from inferring a `T: Default`
    // bound on the derived impl; payload types need not be Default.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// The backend signals application-level success with `status: 200`
    /// inside the envelope, independent of the transport status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The envelope message, or a fallback when the backend sent none.
    #[must_use]
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(fallback)
    }

    /// A successful envelope carrying `data` (test fixtures and the
    /// lenient no-body path).
    #[must_use]
    pub const fn success(data: Option<T>) -> Self {
        Self {
            status: 200,
            message: None,
            data,
        }
    }

    /// A rejected envelope with a backend message.
    #[must_use]
    pub fn failure(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Envelope for calls whose payload the client ignores.
pub type Ack = Envelope<serde_json::Value>;

/// The backend calls the page workflows make.
///
/// `BackendClient` implements this against the real backend; tests mock
/// it to drive workflows without a server, including asserting that a
/// locally-rejected action made no call at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /auth/isLoggedIn` - session probe.
    async fn is_logged_in(&self) -> Result<Envelope<LoginProbe>, ApiError>;

    /// `POST /auth/login` - credentials + captcha to session + profile.
    async fn login(&self, request: LoginRequest) -> Result<Envelope<User>, ApiError>;

    /// `GET /auth/logout` - invalidate the backend session.
    async fn logout(&self) -> Result<Ack, ApiError>;

    /// `POST /auth/register` - create an account.
    async fn register(&self, request: RegisterRequest) -> Result<Envelope<User>, ApiError>;

    /// `POST /auth/forgot-password` - reset a password via identity fields.
    async fn forgot_password(&self, request: ForgotPasswordRequest) -> Result<Ack, ApiError>;

    /// `GET /products` - one page of the catalog, optionally filtered.
    async fn fetch_products(
        &self,
        page: u32,
        size: u32,
        keyword: &str,
    ) -> Result<Envelope<ProductPage>, ApiError>;

    /// `POST /products` - create a product (admin).
    async fn create_product(&self, product: NewProduct) -> Result<Envelope<Product>, ApiError>;

    /// `PUT /products/{id}` - update a product (admin).
    async fn update_product(
        &self,
        id: ProductId,
        product: NewProduct,
    ) -> Result<Envelope<Product>, ApiError>;

    /// `DELETE /products/{id}` - delete a product (admin).
    async fn delete_product(&self, id: ProductId) -> Result<Ack, ApiError>;

    /// `GET /orders/history` - the current user's past orders.
    async fn order_history(&self) -> Result<Envelope<Vec<Order>>, ApiError>;

    /// `POST /orders/checkout` - submit the full cart line list.
    async fn checkout(&self, lines: Vec<CheckoutLine>) -> Result<Ack, ApiError>;

    /// `GET /orders/sales/summary` - aggregated sales rows (admin).
    async fn sales_summary(&self) -> Result<Envelope<Vec<SalesRow>>, ApiError>;

    /// `PUT /users/{id}` - update the profile.
    async fn update_user(&self, id: UserId, update: ProfileUpdate)
    -> Result<Envelope<User>, ApiError>;

    /// `DELETE /users/{id}` - delete an account (admin).
    async fn delete_user(&self, id: UserId) -> Result<Ack, ApiError>;

    /// `GET /favorites` - the favorite product snapshots.
    async fn favorites(&self) -> Result<Envelope<Vec<Product>>, ApiError>;

    /// `POST /favorites` - add a product to the favorites.
    async fn add_favorite(&self, id: ProductId) -> Result<Ack, ApiError>;

    /// `DELETE /favorites/{id}` - remove a product from the favorites.
    async fn remove_favorite(&self, id: ProductId) -> Result<Ack, ApiError>;
}

/// HTTP client for the backend.
///
/// Carries a cookie store so the backend's session cookie flows with
/// every call, which is the only session artifact this layer holds.
#[derive(Debug, Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

#[derive(Debug)]
struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a client for the configured backend origin.
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &StorefrontConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: crate::config::ensure_trailing_slash(config.api_base_url.clone()),
            }),
        })
    }

    /// The backend origin this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and parse the envelope.
    ///
    /// Non-2xx transport status wins over envelope content: the body is
    /// only consulted for a server-supplied message in that case.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.endpoint(path)?;
        let mut request = self.inner.client.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Ack>(&text)
                .ok()
                .and_then(|env| env.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Request failed with HTTP {status}"));
            tracing::warn!(%status, %method, path, "backend rejected request");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%method, path, "backend call succeeded");
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`Self::execute`], but tolerates an empty or non-JSON body on
    /// success (some delete endpoints answer 200 with no payload).
    pub(crate) async fn execute_lenient(
        &self,
        method: Method,
        path: &str,
    ) -> Result<Ack, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.request(method.clone(), url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Ack>(&text)
                .ok()
                .and_then(|env| env.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Request failed with HTTP {status}"));
            tracing::warn!(%status, %method, path, "backend rejected request");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Ack::success(None)))
    }
}

#[async_trait]
impl StorefrontApi for BackendClient {
    async fn is_logged_in(&self) -> Result<Envelope<LoginProbe>, ApiError> {
        auth::is_logged_in(self).await
    }

    async fn login(&self, request: LoginRequest) -> Result<Envelope<User>, ApiError> {
        auth::login(self, &request).await
    }

    async fn logout(&self) -> Result<Ack, ApiError> {
        auth::logout(self).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<Envelope<User>, ApiError> {
        auth::register(self, &request).await
    }

    async fn forgot_password(&self, request: ForgotPasswordRequest) -> Result<Ack, ApiError> {
        auth::forgot_password(self, &request).await
    }

    async fn fetch_products(
        &self,
        page: u32,
        size: u32,
        keyword: &str,
    ) -> Result<Envelope<ProductPage>, ApiError> {
        products::fetch_page(self, page, size, keyword).await
    }

    async fn create_product(&self, product: NewProduct) -> Result<Envelope<Product>, ApiError> {
        products::create(self, &product).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        product: NewProduct,
    ) -> Result<Envelope<Product>, ApiError> {
        products::update(self, id, &product).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<Ack, ApiError> {
        products::delete(self, id).await
    }

    async fn order_history(&self) -> Result<Envelope<Vec<Order>>, ApiError> {
        orders::history(self).await
    }

    async fn checkout(&self, lines: Vec<CheckoutLine>) -> Result<Ack, ApiError> {
        orders::checkout(self, &lines).await
    }

    async fn sales_summary(&self) -> Result<Envelope<Vec<SalesRow>>, ApiError> {
        sales::summary(self).await
    }

    async fn update_user(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<Envelope<User>, ApiError> {
        users::update(self, id, &update).await
    }

    async fn delete_user(&self, id: UserId) -> Result<Ack, ApiError> {
        users::delete(self, id).await
    }

    async fn favorites(&self) -> Result<Envelope<Vec<Product>>, ApiError> {
        favorites::list(self).await
    }

    async fn add_favorite(&self, id: ProductId) -> Result<Ack, ApiError> {
        favorites::add(self, id).await
    }

    async fn remove_favorite(&self, id: ProductId) -> Result<Ack, ApiError> {
        favorites::remove(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_and_message_fallback() {
        let env: Envelope<i32> = Envelope::success(Some(5));
        assert!(env.is_success());
        assert_eq!(env.message_or("fallback"), "fallback");

        let env: Envelope<i32> = Envelope::failure(400, "bad captcha");
        assert!(!env.is_success());
        assert_eq!(env.message_or("fallback"), "bad captcha");
    }

    #[test]
    fn test_envelope_empty_message_uses_fallback() {
        let env: Envelope<i32> = Envelope {
            status: 200,
            message: Some(String::new()),
            data: None,
        };
        assert_eq!(env.message_or("done"), "done");
    }

    #[test]
    fn test_envelope_deserializes_backend_shape() {
        let env: Envelope<serde_json::Value> = serde_json::from_str(
            r#"{"status": 200, "message": "ok", "data": {"isLoggedIn": true}}"#,
        )
        .expect("deserialize envelope");
        assert!(env.is_success());
        assert_eq!(env.message.as_deref(), Some("ok"));
        assert!(env.data.is_some());
    }

    #[test]
    fn test_envelope_data_may_be_absent_for_non_default_payloads() {
        // User implements no Default; an absent `data` must still parse.
        let env: Envelope<User> =
            serde_json::from_str(r#"{"status": 404, "message": "no such user"}"#)
                .expect("deserialize envelope");
        assert!(!env.is_success());
        assert_eq!(env.data, None);
    }

    #[test]
    fn test_rejected_error_surfaces_server_message_verbatim() {
        let err = ApiError::Rejected {
            status: 401,
            message: "Wrong captcha".to_owned(),
        };
        assert_eq!(err.user_message(), "Wrong captcha");
    }

    #[test]
    fn test_parse_error_resolves_to_generic_message() {
        let parse_err =
            serde_json::from_str::<Envelope<i32>>("not json").expect_err("must fail");
        let err = ApiError::from(parse_err);
        assert_eq!(
            err.user_message(),
            "The server returned an unexpected response."
        );
    }

    #[test]
    fn test_client_preserves_base_path_prefix() {
        let mut config = StorefrontConfig::default();
        config.api_base_url = Url::parse("http://localhost:8080/api").expect("parse");
        let client = BackendClient::new(&config).expect("build client");
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        let joined = client.base_url().join("products").expect("join");
        assert_eq!(joined.path(), "/api/products");
    }
}
