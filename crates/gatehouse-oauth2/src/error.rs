//! OAuth 2.0 protocol error taxonomy.
//!
//! This module defines the closed set of protocol errors the core can
//! produce. Every variant carries a fixed HTTP status code and a fixed
//! OAuth error string (RFC 6749 Sections 4.1.2.1 and 5.2, plus the
//! RFC 6750 bearer-token errors), together with an optional
//! human-readable description.
//!
//! # Wire shape
//!
//! Errors serialize as `{"error": "<type>"}` with an `error_description`
//! member appended only when the description is non-empty:
//!
//! ```json
//! {
//!   "error": "invalid_request",
//!   "error_description": "'grant_type' not found"
//! }
//! ```

use serde::Serialize;

/// Protocol errors produced while processing an OAuth 2.0 request.
///
/// Expected, data-dependent failures only. Wiring mistakes (for example
/// calling a fetcher's `fetch` without a prior successful `matches`) are
/// contract violations and panic instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// The request is missing a required parameter or is otherwise malformed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// Client authentication failed.
    #[error("Invalid client: {message}")]
    InvalidClient {
        /// Description of why the client is invalid.
        message: String,
    },

    /// The client is not authorized to use this authorization method.
    #[error("Unauthorized client: {message}")]
    UnauthorizedClient {
        /// Description of why the client is unauthorized.
        message: String,
    },

    /// The redirect_uri does not match the value registered for the client.
    #[error("Redirect URI mismatch: {message}")]
    RedirectUriMismatch {
        /// Description of the mismatch.
        message: String,
    },

    /// The resource owner or the authorization server denied the request.
    #[error("Access denied: {message}")]
    AccessDenied {
        /// Description of why access was denied.
        message: String,
    },

    /// The authorization server does not support the requested response type.
    #[error("Unsupported response type: {message}")]
    UnsupportedResponseType {
        /// Description of the unsupported response type.
        message: String,
    },

    /// The authorization grant or refresh token is invalid, expired, or
    /// was issued to another client.
    #[error("Invalid grant: {message}")]
    InvalidGrant {
        /// Description of why the grant is invalid.
        message: String,
    },

    /// The authorization grant type is not supported by this server.
    #[error("Unsupported grant type: {message}")]
    UnsupportedGrantType {
        /// Description of the unsupported grant type.
        message: String,
    },

    /// The requested scope is invalid, unknown, or malformed.
    #[error("Invalid scope: {message}")]
    InvalidScope {
        /// Description of why the scope is invalid.
        message: String,
    },

    /// The access token presented with the request is invalid.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of why the token is invalid.
        message: String,
    },

    /// The access token presented with the request has expired.
    ///
    /// Shares the `invalid_token` error string with [`OAuthError::InvalidToken`]
    /// but carries the fixed description `"The access token expired"`.
    #[error("The access token expired")]
    ExpiredToken,

    /// The token's granted scope does not cover the requested resource.
    #[error("Insufficient scope: {message}")]
    InsufficientScope {
        /// Description of the missing scope.
        message: String,
    },

    /// A persistence call that should have succeeded returned nothing.
    #[error("Unknown error: {message}")]
    UnknownError {
        /// Description of the unexpected condition.
        message: String,
    },
}

/// Fixed description reported for [`OAuthError::ExpiredToken`].
const EXPIRED_TOKEN_DESCRIPTION: &str = "The access token expired";

impl OAuthError {
    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    /// Creates a new `UnauthorizedClient` error.
    #[must_use]
    pub fn unauthorized_client(message: impl Into<String>) -> Self {
        Self::UnauthorizedClient {
            message: message.into(),
        }
    }

    /// Creates a new `RedirectUriMismatch` error.
    #[must_use]
    pub fn redirect_uri_mismatch(message: impl Into<String>) -> Self {
        Self::RedirectUriMismatch {
            message: message.into(),
        }
    }

    /// Creates a new `AccessDenied` error.
    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Creates a new `UnsupportedResponseType` error.
    #[must_use]
    pub fn unsupported_response_type(message: impl Into<String>) -> Self {
        Self::UnsupportedResponseType {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidGrant` error.
    #[must_use]
    pub fn invalid_grant(message: impl Into<String>) -> Self {
        Self::InvalidGrant {
            message: message.into(),
        }
    }

    /// Creates a new `UnsupportedGrantType` error.
    #[must_use]
    pub fn unsupported_grant_type(message: impl Into<String>) -> Self {
        Self::UnsupportedGrantType {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidScope` error.
    #[must_use]
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a new `InsufficientScope` error.
    #[must_use]
    pub fn insufficient_scope(message: impl Into<String>) -> Self {
        Self::InsufficientScope {
            message: message.into(),
        }
    }

    /// Creates a new `UnknownError` error.
    #[must_use]
    pub fn unknown_error(message: impl Into<String>) -> Self {
        Self::UnknownError {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code to respond with for this error.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. }
            | Self::UnsupportedResponseType { .. }
            | Self::UnsupportedGrantType { .. } => 400,
            Self::InvalidClient { .. }
            | Self::UnauthorizedClient { .. }
            | Self::RedirectUriMismatch { .. }
            | Self::AccessDenied { .. }
            | Self::InvalidGrant { .. }
            | Self::InvalidScope { .. }
            | Self::InvalidToken { .. }
            | Self::ExpiredToken
            | Self::InsufficientScope { .. } => 401,
            Self::UnknownError { .. } => 500,
        }
    }

    /// Returns the OAuth 2.0 error string for this error.
    ///
    /// This is the value of the `error` member of the serialized body.
    /// `ExpiredToken` deliberately reports `invalid_token`.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidClient { .. } => "invalid_client",
            Self::UnauthorizedClient { .. } => "unauthorized_client",
            Self::RedirectUriMismatch { .. } => "redirect_uri_mismatch",
            Self::AccessDenied { .. } => "access_denied",
            Self::UnsupportedResponseType { .. } => "unsupported_response_type",
            Self::InvalidGrant { .. } => "invalid_grant",
            Self::UnsupportedGrantType { .. } => "unsupported_grant_type",
            Self::InvalidScope { .. } => "invalid_scope",
            Self::InvalidToken { .. } | Self::ExpiredToken => "invalid_token",
            Self::InsufficientScope { .. } => "insufficient_scope",
            Self::UnknownError { .. } => "unknown_error",
        }
    }

    /// Returns the human-readable description, which may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::InvalidRequest { message }
            | Self::InvalidClient { message }
            | Self::UnauthorizedClient { message }
            | Self::RedirectUriMismatch { message }
            | Self::AccessDenied { message }
            | Self::UnsupportedResponseType { message }
            | Self::InvalidGrant { message }
            | Self::UnsupportedGrantType { message }
            | Self::InvalidScope { message }
            | Self::InvalidToken { message }
            | Self::InsufficientScope { message }
            | Self::UnknownError { message } => message,
            Self::ExpiredToken => EXPIRED_TOKEN_DESCRIPTION,
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.http_status() >= 500
    }

    /// Builds the serializable response body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        let description = self.description();
        ErrorBody {
            error: self.error_code(),
            error_description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        }
    }

    /// Renders this error as its JSON response body.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_body())
            .expect("a flat error body always serializes")
    }
}

/// JSON body of an OAuth error response.
///
/// `error` always comes first; `error_description` is omitted when the
/// underlying description is empty. Clients rely on this exact shape.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// The OAuth 2.0 error string.
    pub error: &'static str,

    /// Human-readable detail, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}
