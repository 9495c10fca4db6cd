//! # gatehouse-oauth2
//!
//! Framework-agnostic OAuth 2.0 authorization-server core.
//!
//! This crate provides:
//! - RFC 6749 grant-type state machines (authorization code, password,
//!   client credentials, refresh token)
//! - The four endpoint orchestrators: authorization, token,
//!   protected resource, and tokeninfo
//! - Pluggable credential extraction from wire-level requests
//! - A closed OAuth error taxonomy mapped to HTTP status codes
//!
//! ## Overview
//!
//! The crate owns protocol correctness (exact validation order, exact
//! error codes, exact response shapes per grant and response type) and
//! nothing else. Transport, persistence, and the consent UI stay with the
//! caller, reached through two seams: the read-only [`Request`] view of an
//! inbound request, and the per-request [`DataHandler`] persistence
//! facade created by a [`DataHandlerFactory`].
//!
//! All shared configuration (fetcher lists, handler registries, response
//! type allow-lists) is assembled once at process start and read-only
//! afterwards; per-request state never outlives one `handle_request`
//! call, so no locking happens inside the core.
//!
//! ## Modules
//!
//! - [`error`] - the `OAuthError` taxonomy and `OAuthResult`
//! - [`request`] - the inbound request seam
//! - [`data`] - the `DataHandler` persistence seam
//! - [`types`] - domain entities (`AuthInfo`, `AccessToken`, ...)
//! - [`fetcher`] - credential extraction strategies and providers
//! - [`grant`] - grant handlers, shared helpers, and the registry
//! - [`endpoint`] - the four request-flow orchestrators
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gatehouse_oauth2::prelude::*;
//!
//! let credential_fetchers = Arc::new(ClientCredentialFetcherProvider::default());
//! let token_endpoint = TokenEndpoint::new(
//!     Arc::new(MyDataHandlerFactory::new(pool)),
//!     Arc::new(GrantHandlerProvider::with_default_handlers(Arc::clone(&credential_fetchers))),
//!     credential_fetchers,
//! );
//!
//! let response = token_endpoint.handle_request(&my_request).await;
//! // respond with response.status / response.body
//! ```

pub mod data;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod grant;
pub mod request;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use data::{DataHandler, DataHandlerFactory};
pub use endpoint::{
    AuthorizationEndpoint, AuthorizationEndpointResponse, ProtectedResourceEndpoint,
    ProtectedResourceEndpointResponse, TokenEndpoint, TokenEndpointResponse, TokeninfoEndpoint,
    TokeninfoEndpointResponse,
};
pub use error::{ErrorBody, OAuthError};
pub use fetcher::{
    AccessTokenFetcher, AccessTokenFetcherProvider, AuthHeaderAccessTokenFetcher,
    AuthHeaderClientCredentialFetcher, ClientCredentialFetcher, ClientCredentialFetcherProvider,
    FetchResult, RequestParameterAccessTokenFetcher, RequestParameterClientCredentialFetcher,
};
pub use grant::{
    AuthorizationCodeGrantHandler, ClientCredentialsGrantHandler, GrantHandler,
    GrantHandlerProvider, GrantHandlerResult, PasswordGrantHandler, RefreshTokenGrantHandler,
};
pub use request::Request;
pub use types::{AccessToken, AuthInfo, ClientCredential, GrantType};

/// Type alias for protocol-level results.
pub type OAuthResult<T> = Result<T, OAuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use gatehouse_oauth2::prelude::*;
/// ```
pub mod prelude {
    pub use crate::OAuthResult;
    pub use crate::data::{DataHandler, DataHandlerFactory};
    pub use crate::endpoint::{
        AuthorizationEndpoint, AuthorizationEndpointResponse, ProtectedResourceEndpoint,
        ProtectedResourceEndpointResponse, TokenEndpoint, TokenEndpointResponse, TokeninfoEndpoint,
        TokeninfoEndpointResponse,
    };
    pub use crate::error::{ErrorBody, OAuthError};
    pub use crate::fetcher::{
        AccessTokenFetcher, AccessTokenFetcherProvider, AuthHeaderAccessTokenFetcher,
        AuthHeaderClientCredentialFetcher, ClientCredentialFetcher,
        ClientCredentialFetcherProvider, FetchResult, RequestParameterAccessTokenFetcher,
        RequestParameterClientCredentialFetcher,
    };
    pub use crate::grant::{
        AuthorizationCodeGrantHandler, ClientCredentialsGrantHandler, GrantHandler,
        GrantHandlerProvider, GrantHandlerResult, PasswordGrantHandler, RefreshTokenGrantHandler,
    };
    pub use crate::request::Request;
    pub use crate::types::{AccessToken, AuthInfo, ClientCredential, GrantType};
}
