//! Authorization Code grant (RFC 6749 Section 4.1).

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

/// Redeems an authorization code for an access token.
///
/// Validation order: client credential, `code` parameter, `redirect_uri`
/// parameter, code lookup, client binding, redirect URI check, issue.
pub struct AuthorizationCodeGrantHandler {
    credential_fetchers: Arc<ClientCredentialFetcherProvider>,
}

impl AuthorizationCodeGrantHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(credential_fetchers: Arc<ClientCredentialFetcherProvider>) -> Self {
        Self {
            credential_fetchers,
        }
    }
}

#[async_trait]
impl GrantHandler for AuthorizationCodeGrantHandler {
    async fn handle(
        &self,
        request: &dyn Request,
        data_handler: &dyn DataHandler,
    ) -> OAuthResult<GrantHandlerResult> {
        let credential = helpers::client_credential(&self.credential_fetchers, request)?;
        let code = helpers::require_parameter(request, "code")?;
        let redirect_uri = helpers::require_parameter(request, "redirect_uri")?;

        let Some(auth_info) = data_handler.get_auth_info_by_code(&code).await else {
            return Err(OAuthError::invalid_grant(""));
        };
        if auth_info.client_id != credential.client_id {
            return Err(OAuthError::invalid_client(""));
        }
        if !data_handler
            .validate_redirect_uri(&credential.client_id, &redirect_uri)
            .await
        {
            return Err(OAuthError::redirect_uri_mismatch(""));
        }

        helpers::issue_access_token(data_handler, &auth_info, GrantType::AuthorizationCode).await
    }
}
