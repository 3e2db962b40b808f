//! User account endpoints.

use chrono::NaiveDate;
use maple_market_core::UserId;
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use crate::models::User;

use super::{Ack, ApiError, BackendClient, Envelope};

/// Body for `PUT /users/{id}`.
///
/// The backend replaces the profile fields wholesale, never patching,
/// and answers with the full updated profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
}

/// Update a user's profile (own session required).
#[instrument(skip(client, update))]
pub async fn update(
    client: &BackendClient,
    id: UserId,
    update: &ProfileUpdate,
) -> Result<Envelope<User>, ApiError> {
    client
        .execute(
            Method::PUT,
            &format!("users/{id}"),
            &[],
            Some(serde_json::to_value(update)?),
        )
        .await
}

/// Delete a user account (admin session required).
#[instrument(skip(client))]
pub async fn delete(client: &BackendClient, id: UserId) -> Result<Ack, ApiError> {
    client
        .execute_lenient(Method::DELETE, &format!("users/{id}"))
        .await
}
