//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults match a backend running on
//! `localhost:8080`.
//!
//! - `STOREFRONT_API_BASE_URL` - backend origin (default: `http://localhost:8080`)
//! - `STOREFRONT_PAGE_SIZE` - catalog page size (default: 6)
//! - `STOREFRONT_LOG` - tracing filter directive (default: `info`)

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_PAGE_SIZE: u32 = 6;
const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Origin of the backend API (scheme, host, port).
    pub api_base_url: Url,
    /// Number of products requested per catalog page.
    pub page_size: u32,
    /// Tracing filter directive for the subscriber.
    pub log_filter: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = match std::env::var("STOREFRONT_API_BASE_URL") {
            Ok(raw) => Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_API_BASE_URL".to_owned(), e.to_string())
            })?,
            Err(_) => Url::parse(DEFAULT_API_BASE_URL)
                .map_err(|e| ConfigError::InvalidEnvVar("default base url".to_owned(), e.to_string()))?,
        };
        let api_base_url = ensure_trailing_slash(api_base_url);

        let page_size = match std::env::var("STOREFRONT_PAGE_SIZE") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PAGE_SIZE".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let log_filter =
            std::env::var("STOREFRONT_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            api_base_url,
            page_size,
            log_filter,
        })
    }
}

/// Ensure the base URL path ends with `/` so joining endpoint paths keeps
/// any path prefix (joining `products` onto `http://host/api` would
/// otherwise resolve to `/products`).
pub(crate) fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).unwrap_or_else(|_| {
                unreachable!("default base url is a valid URL literal")
            }),
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}
