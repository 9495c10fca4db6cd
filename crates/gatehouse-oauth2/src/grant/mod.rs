//! Grant-type state machines for the token endpoint.
//!
//! One [`GrantHandler`] per grant type, each running the exact validation
//! sequence RFC 6749 prescribes for its flow and short-circuiting on the
//! first failure. The [`GrantHandlerProvider`] maps the `grant_type`
//! request parameter to a handler; the registry is string-keyed so
//! deployments can add handlers for extension grant types.
//!
//! Shared steps (credential extraction, required parameters, token
//! issuance) live in [`helpers`] as free functions the handlers compose.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::OAuthResult;
use crate::data::DataHandler;
use crate::fetcher::ClientCredentialFetcherProvider;
use crate::request::Request;
use crate::types::GrantType;

pub mod authorization_code;
pub mod client_credentials;
pub mod helpers;
pub mod password;
pub mod refresh_token;

pub use authorization_code::AuthorizationCodeGrantHandler;
pub use client_credentials::ClientCredentialsGrantHandler;
pub use password::PasswordGrantHandler;
pub use refresh_token::RefreshTokenGrantHandler;

/// A grant-type state machine.
///
/// Implementations validate the request for one grant type and, when every
/// check passes, issue an access token through the [`DataHandler`]. Each
/// validation step short-circuits on the first failure; the order of the
/// steps is a visible contract, since it decides which error a half-valid
/// request gets.
#[async_trait]
pub trait GrantHandler: Send + Sync {
    /// Runs the grant flow against one token request.
    async fn handle(
        &self,
        request: &dyn Request,
        data_handler: &dyn DataHandler,
    ) -> OAuthResult<GrantHandlerResult>;
}

/// Successful outcome of a grant flow.
///
/// Serializes directly to the token-endpoint JSON body. `token_type` is
/// always `"Bearer"`; the optional members are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantHandlerResult {
    /// Token type, always "Bearer".
    pub token_type: String,

    /// The issued access token.
    pub access_token: String,

    /// Access token lifetime in seconds, omitted for non-expiring tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Refresh token, when the flow issues one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Granted scopes, when the grant carries any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl GrantHandlerResult {
    /// Creates a result for the issued token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token_type: "Bearer".to_string(),
            access_token: access_token.into(),
            expires_in: None,
            refresh_token: None,
            scope: None,
        }
    }

    /// Sets the token lifetime.
    #[must_use]
    pub fn with_expires_in(mut self, expires_in: i64) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Sets the granted scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Renders this result as the token-endpoint JSON body.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("a flat token body always serializes")
    }
}

/// Registry mapping a `grant_type` string to its [`GrantHandler`].
pub struct GrantHandlerProvider {
    handlers: HashMap<String, Box<dyn GrantHandler>>,
}

impl GrantHandlerProvider {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Creates a registry with the four built-in grant handlers.
    ///
    /// Deployments that support a subset of the grant types should build
    /// their own registry with only the handlers they want.
    #[must_use]
    pub fn with_default_handlers(credential_fetchers: Arc<ClientCredentialFetcherProvider>) -> Self {
        let mut provider = Self::new();
        provider.register(
            GrantType::AuthorizationCode.as_str(),
            Box::new(AuthorizationCodeGrantHandler::new(Arc::clone(&credential_fetchers))),
        );
        provider.register(
            GrantType::Password.as_str(),
            Box::new(PasswordGrantHandler::new(Arc::clone(&credential_fetchers))),
        );
        provider.register(
            GrantType::ClientCredentials.as_str(),
            Box::new(ClientCredentialsGrantHandler::new(Arc::clone(&credential_fetchers))),
        );
        provider.register(
            GrantType::RefreshToken.as_str(),
            Box::new(RefreshTokenGrantHandler::new(credential_fetchers)),
        );
        provider
    }

    /// Registers a handler for a grant type, replacing any previous one.
    pub fn register(&mut self, grant_type: impl Into<String>, handler: Box<dyn GrantHandler>) {
        self.handlers.insert(grant_type.into(), handler);
    }

    /// Returns the handler for a grant type, if one is registered.
    #[must_use]
    pub fn handler(&self, grant_type: &str) -> Option<&dyn GrantHandler> {
        self.handlers.get(grant_type).map(Box::as_ref)
    }

    /// Returns the registered grant type names, in no particular order.
    pub fn grant_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl Default for GrantHandlerProvider {
    fn default() -> Self {
        Self::new()
    }
}
