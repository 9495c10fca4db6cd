//! OAuth 2.0 grant type names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The grant types this crate ships handlers for.
///
/// The grant-handler registry itself is string-keyed, so deployments can
/// register handlers for extension grant types; this enum only names the
/// built-in ones. `Implicit` never reaches the token endpoint; it exists
/// as the issue label the authorization endpoint passes to
/// `create_or_update_access_token` for a `token` response type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Authorization Code flow.
    AuthorizationCode,
    /// Resource Owner Password Credentials flow.
    Password,
    /// Client Credentials flow (no resource owner involved).
    ClientCredentials,
    /// Refresh Token flow.
    RefreshToken,
    /// Implicit flow, issued from the authorization endpoint.
    Implicit,
}

impl GrantType {
    /// Returns the OAuth 2.0 grant_type parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::Password => "password",
            Self::ClientCredentials => "client_credentials",
            Self::RefreshToken => "refresh_token",
            Self::Implicit => "implicit",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorization_code" => Ok(Self::AuthorizationCode),
            "password" => Ok(Self::Password),
            "client_credentials" => Ok(Self::ClientCredentials),
            "refresh_token" => Ok(Self::RefreshToken),
            "implicit" => Ok(Self::Implicit),
            _ => Err(()),
        }
    }
}
