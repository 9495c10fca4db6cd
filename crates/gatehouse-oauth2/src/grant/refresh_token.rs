//! Refresh Token grant (RFC 6749 Section 6).

use std::sync::Arc;

use async_trait::async_trait;

use crate::OAuthResult;
use crate::data::DataHandler;
use crate::error::OAuthError;
use crate::fetcher::ClientCredentialFetcherProvider;
use crate::grant::helpers;
use crate::grant::{GrantHandler, GrantHandlerResult};
use crate::request::Request;
use crate::types::GrantType;

/// Exchanges a refresh token for a fresh access token.
///
/// Refresh-token expiry is the persistence layer's concern: an expired or
/// revoked token simply fails the lookup and surfaces as `invalid_grant`.
pub struct RefreshTokenGrantHandler {
    credential_fetchers: Arc<ClientCredentialFetcherProvider>,
}

impl RefreshTokenGrantHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(credential_fetchers: Arc<ClientCredentialFetcherProvider>) -> Self {
        Self {
            credential_fetchers,
        }
    }
}

#[async_trait]
impl GrantHandler for RefreshTokenGrantHandler {
    async fn handle(
        &self,
        request: &dyn Request,
        data_handler: &dyn DataHandler,
    ) -> OAuthResult<GrantHandlerResult> {
        let credential = helpers::client_credential(&self.credential_fetchers, request)?;
        let refresh_token = helpers::require_parameter(request, "refresh_token")?;

        let Some(auth_info) = data_handler
            .get_auth_info_by_refresh_token(&refresh_token)
            .await
        else {
            return Err(OAuthError::invalid_grant(""));
        };
        if auth_info.client_id != credential.client_id {
            return Err(OAuthError::invalid_client(""));
        }

        helpers::issue_access_token(data_handler, &auth_info, GrantType::RefreshToken).await
    }
}
