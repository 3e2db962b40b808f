//! Account workflows: sign-in, registration, password reset, and
//! profile editing.
//!
//! Password-confirmation mismatches are locally-detected precondition
//! failures: they produce their own message and never reach the network.

use chrono::NaiveDate;
use maple_market_core::UserId;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::api::{
    ForgotPasswordRequest, LoginRequest, ProfileUpdate, RegisterRequest, StorefrontApi,
    captcha_url,
};
use crate::session::Session;

/// Shown when a password and its confirmation differ.
pub const PASSWORD_MISMATCH: &str = "The two passwords do not match.";
/// Shown when profile editing is attempted while signed out.
pub const SIGN_IN_REQUIRED: &str = "Please sign in to edit your profile.";
/// Shown when the session knows the username but not the user id (the
/// probe-only state after bootstrap).
pub const INCOMPLETE_SESSION: &str =
    "Profile details are unavailable for this session. Please sign in again.";

/// State for the `/login` view.
///
/// The submit control is disabled while a call is in flight, so at most
/// one login call is outstanding at a time.
#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    password: SecretString,
    pub captcha: String,
    captcha_image: Url,
    error: Option<String>,
    in_flight: bool,
}

impl LoginForm {
    #[must_use]
    pub fn new(base: &Url) -> Self {
        Self {
            username: String::new(),
            password: SecretString::from(""),
            captcha: String::new(),
            captcha_image: captcha_url(base),
            error: None,
            in_flight: false,
        }
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::from(password.into());
    }

    /// The cache-busted captcha image URL currently shown.
    #[must_use]
    pub const fn captcha_image(&self) -> &Url {
        &self.captcha_image
    }

    /// Regenerate the captcha URL so the next render fetches a fresh image.
    pub fn refresh_captcha(&mut self, base: &Url) {
        self.captcha_image = captcha_url(base);
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submit the credentials and captcha solution.
    ///
    /// On success the whole session is replaced with the returned
    /// profile; on any failure - rejected credentials, wrong captcha,
    /// transport error - the session is reset to unauthenticated and the
    /// backend's message is surfaced verbatim.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message.
    pub async fn submit<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &mut Session,
    ) -> Result<String, String> {
        if self.in_flight {
            return Err("A sign-in is already in progress.".to_owned());
        }
        self.in_flight = true;

        let request = LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            captcha: self.captcha.clone(),
        };
        let outcome = match api.login(request).await {
            Ok(envelope) if envelope.is_success() && envelope.data.is_some() => {
                if let Some(user) = envelope.data.clone() {
                    session.establish(user);
                }
                Ok(envelope.message_or("Signed in.").to_owned())
            }
            Ok(envelope) => {
                session.reset();
                Err(envelope.message_or("Sign-in failed.").to_owned())
            }
            Err(error) => {
                session.reset();
                Err(error.user_message())
            }
        };

        self.in_flight = false;
        self.error = outcome.as_ref().err().cloned();
        outcome
    }
}

/// State for the `/register` view.
#[derive(Debug)]
pub struct RegisterForm {
    pub username: String,
    password: SecretString,
    confirm_password: SecretString,
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
    message: Option<String>,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: SecretString::from(""),
            confirm_password: SecretString::from(""),
            name: String::new(),
            id_number: String::new(),
            phone: String::new(),
            birthday: None,
            message: None,
        }
    }
}

impl RegisterForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::from(password.into());
    }

    pub fn set_confirm_password(&mut self, password: impl Into<String>) {
        self.confirm_password = SecretString::from(password.into());
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submit the registration after the local confirmation check.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message; a password mismatch is
    /// rejected locally without any network call.
    pub async fn submit<A: StorefrontApi>(&mut self, api: &A) -> Result<String, String> {
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            self.message = Some(PASSWORD_MISMATCH.to_owned());
            return Err(PASSWORD_MISMATCH.to_owned());
        }

        let request = RegisterRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            id_number: self.id_number.clone(),
            phone: self.phone.clone(),
            birthday: self.birthday,
        };
        let outcome = match api.register(request).await {
            Ok(envelope) if envelope.is_success() => Ok(envelope
                .message_or("Registration complete. Please sign in.")
                .to_owned()),
            Ok(envelope) => Err(envelope.message_or("Registration failed.").to_owned()),
            Err(error) => Err(error.user_message()),
        };

        self.message = Some(match &outcome {
            Ok(message) | Err(message) => message.clone(),
        });
        outcome
    }
}

/// State for the `/forgot-password` view.
#[derive(Debug)]
pub struct ForgotPasswordForm {
    pub username: String,
    pub id_number: String,
    pub phone: String,
    new_password: SecretString,
    confirm_new_password: SecretString,
    message: Option<String>,
}

impl Default for ForgotPasswordForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            id_number: String::new(),
            phone: String::new(),
            new_password: SecretString::from(""),
            confirm_new_password: SecretString::from(""),
            message: None,
        }
    }
}

impl ForgotPasswordForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_new_password(&mut self, password: impl Into<String>) {
        self.new_password = SecretString::from(password.into());
    }

    pub fn set_confirm_new_password(&mut self, password: impl Into<String>) {
        self.confirm_new_password = SecretString::from(password.into());
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submit the reset after the local confirmation check.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message; a mismatch between the
    /// new passwords is rejected locally without any network call.
    pub async fn submit<A: StorefrontApi>(&mut self, api: &A) -> Result<String, String> {
        if self.new_password.expose_secret() != self.confirm_new_password.expose_secret() {
            self.message = Some(PASSWORD_MISMATCH.to_owned());
            return Err(PASSWORD_MISMATCH.to_owned());
        }

        let request = ForgotPasswordRequest {
            username: self.username.clone(),
            id_number: self.id_number.clone(),
            phone: self.phone.clone(),
            new_password: self.new_password.clone(),
        };
        let outcome = match api.forgot_password(request).await {
            Ok(envelope) if envelope.is_success() => Ok(envelope
                .message_or("Password updated. Sign in with the new password.")
                .to_owned()),
            Ok(envelope) => Err(envelope.message_or("Password reset failed.").to_owned()),
            Err(error) => Err(error.user_message()),
        };

        self.message = Some(match &outcome {
            Ok(message) | Err(message) => message.clone(),
        });
        outcome
    }
}

/// State for the `/profile` view.
#[derive(Debug, Default)]
pub struct ProfilePage {
    pub name: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
    message: Option<String>,
}

impl ProfilePage {
    /// Prefill the form from the current session profile.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        let user = session.user();
        Self {
            name: user.and_then(|u| u.name.clone()).unwrap_or_default(),
            phone: user.and_then(|u| u.phone.clone()).unwrap_or_default(),
            birthday: user.and_then(|u| u.birthday),
            message: None,
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submit the edited fields; on success the session profile is
    /// replaced wholesale with the backend's answer.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message. A session without a user
    /// id (the probe-only state) is rejected locally.
    pub async fn submit<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &mut Session,
    ) -> Result<String, String> {
        if !session.is_authenticated() {
            self.message = Some(SIGN_IN_REQUIRED.to_owned());
            return Err(SIGN_IN_REQUIRED.to_owned());
        }
        let Some(id) = session.user().and_then(|u| u.id) else {
            self.message = Some(INCOMPLETE_SESSION.to_owned());
            return Err(INCOMPLETE_SESSION.to_owned());
        };

        let update = ProfileUpdate {
            name: self.name.clone(),
            phone: self.phone.clone(),
            birthday: self.birthday,
        };
        let outcome = match api.update_user(id, update).await {
            Ok(envelope) if envelope.is_success() && envelope.data.is_some() => {
                if let Some(user) = envelope.data.clone() {
                    session.replace_user(user);
                }
                Ok(envelope.message_or("Profile updated.").to_owned())
            }
            Ok(envelope) => Err(envelope.message_or("Profile update failed.").to_owned()),
            Err(error) => Err(error.user_message()),
        };

        self.message = Some(match &outcome {
            Ok(message) | Err(message) => message.clone(),
        });
        outcome
    }

    /// Delete an account (admin only).
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message.
    pub async fn delete_account<A: StorefrontApi>(
        &mut self,
        api: &A,
        session: &Session,
        id: UserId,
    ) -> Result<String, String> {
        if !session.is_admin() {
            return Err("Administrator role required.".to_owned());
        }
        match api.delete_user(id).await {
            Ok(envelope) if envelope.is_success() => {
                Ok(envelope.message_or("Account deleted.").to_owned())
            }
            Ok(envelope) => Err(envelope.message_or("Could not delete the account.").to_owned()),
            Err(error) => Err(error.user_message()),
        }
    }
}
