//! Issued access token entity.

use serde::{Deserialize, Serialize};

/// An issued access token.
///
/// Minted by `DataHandler::create_or_update_access_token`. The token
/// string itself is opaque to this crate; how it is generated, hashed,
/// or stored is entirely the persistence layer's business.
///
/// The token references its owning [`AuthInfo`](crate::types::AuthInfo)
/// by ID, not by value, so the grant can evolve independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// ID of the authorization grant this token belongs to.
    pub auth_id: String,

    /// The opaque token string handed to the client.
    pub token: String,

    /// Lifetime in seconds. Non-positive means the token never expires.
    pub expires_in: i64,

    /// Creation instant, epoch milliseconds.
    pub created_on: i64,
}

impl AccessToken {
    /// Creates a token record.
    #[must_use]
    pub fn new(
        auth_id: impl Into<String>,
        token: impl Into<String>,
        expires_in: i64,
        created_on: i64,
    ) -> Self {
        Self {
            auth_id: auth_id.into(),
            token: token.into(),
            expires_in,
            created_on,
        }
    }

    /// Returns the expiry instant in epoch milliseconds.
    ///
    /// Meaningful only when `expires_in` is positive.
    #[must_use]
    pub fn expires_at_millis(&self) -> i64 {
        self.created_on + self.expires_in * 1000
    }

    /// Returns `true` if this token is expired at `now_millis`.
    ///
    /// The boundary instant counts as expired: a token is live strictly
    /// before `created_on + expires_in * 1000`. Tokens with a non-positive
    /// lifetime never expire.
    #[must_use]
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expires_in > 0 && self.expires_at_millis() <= now_millis
    }
}

/// Current wall-clock instant as epoch milliseconds.
#[must_use]
pub(crate) fn now_millis() -> i64 {
    let now = time::OffsetDateTime::now_utc();
    (now.unix_timestamp_nanos() / 1_000_000) as i64
}
