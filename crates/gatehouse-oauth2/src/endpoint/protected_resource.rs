//! Protected-resource endpoint (RFC 6750).

use std::sync::Arc;

use crate::OAuthResult;
use crate::data::DataHandlerFactory;
use crate::error::OAuthError;
use crate::fetcher::AccessTokenFetcherProvider;
use crate::request::Request;
use crate::types::access_token::now_millis;

/// Identity attached to a validated protected-resource request.
///
/// API endpoints behind this check receive the resource owner, the
/// client, and the authorized scopes of the presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedResourceEndpointResponse {
    /// The resource owner's ID.
    pub user_id: String,

    /// The client the token was issued to.
    pub client_id: String,

    /// Scopes the resource owner authorized, if any.
    pub scope: Option<String>,
}

/// Validates bearer access to a protected resource.
///
/// The token is extracted by the first matching
/// [`AccessTokenFetcher`](crate::fetcher::AccessTokenFetcher), then checked
/// for existence, expiry, and the continued validity of the grant, the
/// client, and the user behind it. Every post-lookup failure is reported
/// as `invalid_token`; a resource server has no business distinguishing
/// a vanished user from a vanished client.
pub struct ProtectedResourceEndpoint {
    access_token_fetchers: Arc<AccessTokenFetcherProvider>,
    data_handler_factory: Arc<dyn DataHandlerFactory>,
}

impl ProtectedResourceEndpoint {
    /// Creates the endpoint.
    #[must_use]
    pub fn new(
        access_token_fetchers: Arc<AccessTokenFetcherProvider>,
        data_handler_factory: Arc<dyn DataHandlerFactory>,
    ) -> Self {
        Self {
            access_token_fetchers,
            data_handler_factory,
        }
    }

    /// Judges whether the request may access protected resources.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when no fetcher finds an access token
    /// - `ExpiredToken` when the token's lifetime has elapsed
    /// - `InvalidToken` for every other failed check
    pub async fn handle_request(
        &self,
        request: &dyn Request,
    ) -> OAuthResult<ProtectedResourceEndpointResponse> {
        let Some(fetcher) = self.access_token_fetchers.fetcher_for(request) else {
            return Err(OAuthError::invalid_request("Access token not found"));
        };
        let fetch_result = fetcher.fetch(request);

        let data_handler = self.data_handler_factory.create(request);
        let Some(access_token) = data_handler.get_access_token(&fetch_result.token).await else {
            return Err(OAuthError::invalid_token("Invalid access token"));
        };
        if access_token.is_expired(now_millis()) {
            tracing::debug!(auth_id = %access_token.auth_id, "access token expired");
            return Err(OAuthError::ExpiredToken);
        }

        let Some(auth_info) = data_handler.get_auth_info_by_id(&access_token.auth_id).await
        else {
            return Err(OAuthError::invalid_token("Invalid access token"));
        };
        if !data_handler.validate_client_by_id(&auth_info.client_id).await {
            tracing::debug!(client_id = %auth_info.client_id, "client no longer valid");
            return Err(OAuthError::invalid_token("Invalid client"));
        }
        if !data_handler.validate_user_by_id(&auth_info.user_id).await {
            tracing::debug!(user_id = %auth_info.user_id, "user no longer valid");
            return Err(OAuthError::invalid_token("Invalid user"));
        }

        Ok(ProtectedResourceEndpointResponse {
            user_id: auth_info.user_id,
            client_id: auth_info.client_id,
            scope: auth_info.scope,
        })
    }
}
