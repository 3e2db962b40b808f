//! Client-held session state.
//!
//! The session is the client's belief about whether a user is signed in
//! and who they are. The backend owns session durability via its cookie;
//! this type is replaced wholesale on login, cleared on logout, and
//! degrades to "not authenticated" on any probe failure. It is never
//! persisted by this layer.

use crate::api::{ApiError, Envelope};
use crate::models::{LoginProbe, User};

/// Authentication state owned by the composition root and passed down
/// into every page by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
    user: Option<User>,
}

impl Session {
    /// The safe default: nobody signed in.
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the admin marker is present on the current profile.
    ///
    /// False for a probe-only session: the probe reports no roles, so
    /// admin surfaces stay hidden until a login supplies the full
    /// profile (a known gap replicated deliberately).
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.roles.is_admin())
    }

    /// Whether the member marker is present on the current profile.
    #[must_use]
    pub fn is_member(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.roles.is_member())
    }

    /// Apply the startup probe outcome.
    ///
    /// Success with a positive answer authenticates the session with a
    /// username-only profile; everything else - negative answer, rejected
    /// call, transport failure - resets to unauthenticated. This
    /// transition never propagates an error past the boot sequence.
    pub fn apply_probe(&mut self, outcome: Result<Envelope<LoginProbe>, ApiError>) {
        match outcome {
            Ok(envelope) if envelope.is_success() => match envelope.data {
                Some(probe) if probe.is_logged_in => {
                    self.authenticated = true;
                    self.user = Some(User::from_probe(probe.username.unwrap_or_default()));
                }
                _ => self.reset(),
            },
            Ok(_) => self.reset(),
            Err(error) => {
                // An unauthenticated visitor commonly gets a 4xx here.
                tracing::debug!(error = %error, "session probe failed; staying signed out");
                self.reset();
            }
        }
    }

    /// Replace the whole session with a freshly returned profile.
    pub fn establish(&mut self, user: User) {
        self.authenticated = true;
        self.user = Some(user);
    }

    /// Replace the stored profile without touching authentication
    /// (profile update: the backend answers with the full new profile).
    pub fn replace_user(&mut self, user: User) {
        if self.authenticated {
            self.user = Some(user);
        }
    }

    /// Back to the safe default.
    pub fn reset(&mut self) {
        self.authenticated = false;
        self.user = None;
    }
}
