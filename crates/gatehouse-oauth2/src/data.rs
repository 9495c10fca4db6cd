//! Persistence and validation seam.
//!
//! The core delegates every lookup, validation, and mint operation to a
//! caller-supplied [`DataHandler`]. A fresh handler is created per inbound
//! request by a [`DataHandlerFactory`], so no mutable state is shared
//! between in-flight requests inside the core.
//!
//! Absence is always an explicit value: a missing entity is `None`, a
//! failed validation is `false`. A `DataHandler` never panics to signal
//! "not found"; the endpoints and grant handlers promote absence to the
//! applicable [`OAuthError`](crate::OAuthError) variant.
//!
//! # Which operations each flow uses
//!
//! Authorization Code Grant:
//! `validate_client_by_id`, `validate_client_for_authorization`,
//! `validate_redirect_uri`, `validate_scope`, `create_or_update_auth_info`
//! (authorization phase), then `validate_client`, `get_auth_info_by_code`,
//! `validate_redirect_uri`, `create_or_update_access_token` (token phase).
//!
//! Implicit Grant:
//! `validate_client_by_id`, `validate_client_for_authorization`,
//! `validate_redirect_uri`, `validate_scope`, `create_or_update_auth_info`,
//! `create_or_update_access_token`.
//!
//! Resource Owner Password Credentials Grant:
//! `validate_client`, `get_user_id`, `validate_scope`,
//! `create_or_update_auth_info`, `create_or_update_access_token`.
//!
//! Client Credentials Grant:
//! `validate_client`, `get_client_user_id`, `validate_scope`,
//! `create_or_update_auth_info`, `create_or_update_access_token`.
//!
//! Refresh Token Grant:
//! `validate_client`, `get_auth_info_by_refresh_token`,
//! `create_or_update_access_token`.
//!
//! Protected resource access:
//! `get_access_token`, `get_auth_info_by_id`, `validate_client_by_id`,
//! `validate_user_by_id`.

use async_trait::async_trait;

use crate::request::Request;
use crate::types::{AccessToken, AuthInfo};

/// Per-request persistence and validation facade.
///
/// Implementations own clients, users, authorization grants, codes, and
/// tokens; the core only holds the returned entities transiently within
/// one request's call chain. Consistency guarantees (for example
/// at-most-one redemption of an authorization code) belong to the
/// implementation.
#[async_trait]
pub trait DataHandler: Send + Sync {
    /// Validates the client credential for a token request.
    ///
    /// Checks that the client exists, that the secret matches, and that
    /// the client may use the given grant type.
    async fn validate_client(
        &self,
        client_id: &str,
        client_secret: &str,
        grant_type: &str,
    ) -> bool;

    /// Validates that the client exists and is in good standing.
    ///
    /// Used where no secret is available: the authorization phase and
    /// protected-resource access.
    async fn validate_client_by_id(&self, client_id: &str) -> bool;

    /// Validates that the client may request the given response type.
    async fn validate_client_for_authorization(
        &self,
        client_id: &str,
        response_type: &str,
    ) -> bool;

    /// Validates a redirect URI against the client's registered URIs.
    async fn validate_redirect_uri(&self, client_id: &str, redirect_uri: &str) -> bool;

    /// Validates a requested scope string for the client.
    ///
    /// `scope` is the raw space-delimited request value; `None` means the
    /// request carried no scope parameter.
    async fn validate_scope(&self, client_id: &str, scope: Option<&str>) -> bool;

    /// Resolves a resource owner's ID from username and password.
    ///
    /// Used by the password grant only. `None` (or an empty string) means
    /// the credentials are wrong and the grant is rejected.
    async fn get_user_id(&self, username: &str, password: &str) -> Option<String>;

    /// Creates or updates the authorization grant for this client and user.
    async fn create_or_update_auth_info(
        &self,
        client_id: &str,
        user_id: &str,
        scope: Option<&str>,
    ) -> Option<AuthInfo>;

    /// Mints or refreshes the access token for an authorization grant.
    ///
    /// `grant_type` names the flow the token is being issued for
    /// (including `"implicit"` for the authorization endpoint's token
    /// response type). Under normal operation this never fails; a `None`
    /// is reported to the client as an unknown error.
    async fn create_or_update_access_token(
        &self,
        auth_info: &AuthInfo,
        grant_type: &str,
    ) -> Option<AccessToken>;

    /// Looks up the authorization grant an authorization code was issued for.
    async fn get_auth_info_by_code(&self, code: &str) -> Option<AuthInfo>;

    /// Looks up the authorization grant a refresh token was issued for.
    ///
    /// Refresh-token expiry, if any, is enforced here by returning `None`.
    async fn get_auth_info_by_refresh_token(&self, refresh_token: &str) -> Option<AuthInfo>;

    /// Resolves the pseudo user ID representing the client itself.
    ///
    /// Used by the client credentials grant, where no resource owner is
    /// involved and the provider trusts the client directly.
    async fn get_client_user_id(&self, client_id: &str, client_secret: &str) -> Option<String>;

    /// Validates that the user exists and is in good standing.
    async fn validate_user_by_id(&self, user_id: &str) -> bool;

    /// Looks up an issued access token by its opaque string.
    ///
    /// Revoked tokens must yield `None`.
    async fn get_access_token(&self, token: &str) -> Option<AccessToken>;

    /// Looks up an authorization grant by its ID.
    async fn get_auth_info_by_id(&self, auth_info_id: &str) -> Option<AuthInfo>;
}

/// Factory creating one [`DataHandler`] per inbound request.
///
/// The request is passed so implementations can scope the handler to the
/// request (tenant selection, deadline propagation, tracing context).
pub trait DataHandlerFactory: Send + Sync {
    /// Creates a `DataHandler` for this request.
    fn create(&self, request: &dyn Request) -> Box<dyn DataHandler>;
}
