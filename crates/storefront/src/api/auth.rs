//! Authentication endpoints.
//!
//! Login, logout, and the session probe all ride on the backend's
//! cookie session; register and forgot-password are anonymous. Passwords
//! cross this module as [`SecretString`] and are exposed only at the
//! serialization boundary.

use chrono::NaiveDate;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::ser::SerializeStruct;
use tracing::instrument;
use url::Url;

use crate::models::{LoginProbe, User};

use super::{Ack, ApiError, BackendClient, Envelope};

/// `POST /auth/login` body.
#[derive(Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
    /// Human-entered solution for the captcha image.
    pub captcha: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("captcha", &self.captcha)
            .finish()
    }
}

impl Serialize for LoginRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoginRequest", 3)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.serialize_field("captcha", &self.captcha)?;
        state.end()
    }
}

/// `POST /auth/register` body.
#[derive(Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("id_number", &self.id_number)
            .field("phone", &self.phone)
            .field("birthday", &self.birthday)
            .finish()
    }
}

impl Serialize for RegisterRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RegisterRequest", 6)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("idNumber", &self.id_number)?;
        state.serialize_field("phone", &self.phone)?;
        state.serialize_field("birthday", &self.birthday)?;
        state.end()
    }
}

/// `POST /auth/forgot-password` body.
#[derive(Clone)]
pub struct ForgotPasswordRequest {
    pub username: String,
    pub id_number: String,
    pub phone: String,
    pub new_password: SecretString,
}

impl std::fmt::Debug for ForgotPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgotPasswordRequest")
            .field("username", &self.username)
            .field("id_number", &self.id_number)
            .field("phone", &self.phone)
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for ForgotPasswordRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ForgotPasswordRequest", 4)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("idNumber", &self.id_number)?;
        state.serialize_field("phone", &self.phone)?;
        state.serialize_field("newPassword", self.new_password.expose_secret())?;
        state.end()
    }
}

/// Ask the backend whether the session cookie is still good.
#[instrument(skip(client))]
pub async fn is_logged_in(client: &BackendClient) -> Result<Envelope<LoginProbe>, ApiError> {
    client
        .execute(Method::GET, "auth/isLoggedIn", &[], None)
        .await
}

/// Exchange credentials and a captcha solution for a session + profile.
#[instrument(skip(client, request), fields(username = %request.username))]
pub async fn login(
    client: &BackendClient,
    request: &LoginRequest,
) -> Result<Envelope<User>, ApiError> {
    client
        .execute(
            Method::POST,
            "auth/login",
            &[],
            Some(serde_json::to_value(request)?),
        )
        .await
}

/// Invalidate the backend session.
#[instrument(skip(client))]
pub async fn logout(client: &BackendClient) -> Result<Ack, ApiError> {
    client.execute(Method::GET, "auth/logout", &[], None).await
}

/// Create a new account.
#[instrument(skip(client, request), fields(username = %request.username))]
pub async fn register(
    client: &BackendClient,
    request: &RegisterRequest,
) -> Result<Envelope<User>, ApiError> {
    client
        .execute(
            Method::POST,
            "auth/register",
            &[],
            Some(serde_json::to_value(request)?),
        )
        .await
}

/// Reset a password by proving identity fields.
#[instrument(skip(client, request), fields(username = %request.username))]
pub async fn forgot_password(
    client: &BackendClient,
    request: &ForgotPasswordRequest,
) -> Result<Ack, ApiError> {
    client
        .execute(
            Method::POST,
            "auth/forgot-password",
            &[],
            Some(serde_json::to_value(request)?),
        )
        .await
}

/// Build a cache-busted captcha image URL.
///
/// The backend regenerates the captcha per request; the random query
/// parameter defeats intermediary caching so a refresh always shows a
/// fresh image.
#[must_use]
pub fn captcha_url(base: &Url) -> Url {
    let mut url = base.join("captcha").unwrap_or_else(|_| base.clone());
    url.set_query(Some(&format!("{:x}", rand::random::<u64>())));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_serializes_all_fields() {
        let request = LoginRequest {
            username: "admin".to_owned(),
            password: SecretString::from("123456"),
            captcha: "9F3K".to_owned(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "username": "admin",
                "password": "123456",
                "captcha": "9F3K"
            })
        );
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let request = LoginRequest {
            username: "admin".to_owned(),
            password: SecretString::from("123456"),
            captcha: "9F3K".to_owned(),
        };
        let rendered = format!("{request:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("123456"));
    }

    #[test]
    fn test_register_request_uses_backend_field_names() {
        let request = RegisterRequest {
            username: "alice".to_owned(),
            password: SecretString::from("hunter2"),
            name: "Alice".to_owned(),
            id_number: "A123456789".to_owned(),
            phone: "0912345678".to_owned(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 31),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["idNumber"], "A123456789");
        assert_eq!(value["birthday"], "1990-01-31");
    }

    #[test]
    fn test_forgot_password_request_uses_backend_field_names() {
        let request = ForgotPasswordRequest {
            username: "alice".to_owned(),
            id_number: "A123456789".to_owned(),
            phone: "0912345678".to_owned(),
            new_password: SecretString::from("s3cret"),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["newPassword"], "s3cret");
    }

    #[test]
    fn test_captcha_url_is_cache_busted() {
        let base = Url::parse("http://localhost:8080").expect("parse base");
        let first = captcha_url(&base);
        let second = captcha_url(&base);
        assert_eq!(first.path(), "/captcha");
        assert!(first.query().is_some_and(|q| !q.is_empty()));
        // Two refreshes must not collide on the busting parameter.
        assert_ne!(first.query(), second.query());
    }
}
