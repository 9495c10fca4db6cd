//! Resource Owner Password Credentials grant (RFC 6749 Section 4.3).

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

/// Exchanges a resource owner's username and password for an access token.
///
/// Validation order: client credential, `username` and `password`
/// parameters, user lookup, scope check, grant creation, client binding,
/// issue.
pub struct PasswordGrantHandler {
    credential_fetchers: Arc<ClientCredentialFetcherProvider>,
}

impl PasswordGrantHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(credential_fetchers: Arc<ClientCredentialFetcherProvider>) -> Self {
        Self {
            credential_fetchers,
        }
    }
}

#[async_trait]
impl GrantHandler for PasswordGrantHandler {
    async fn handle(
        &self,
        request: &dyn Request,
        data_handler: &dyn DataHandler,
    ) -> OAuthResult<GrantHandlerResult> {
        let credential = helpers::client_credential(&self.credential_fetchers, request)?;
        let username = helpers::require_parameter(request, "username")?;
        let password = helpers::require_parameter(request, "password")?;

        let user_id = data_handler
            .get_user_id(&username, &password)
            .await
            .filter(|user_id| !user_id.is_empty());
        let Some(user_id) = user_id else {
            return Err(OAuthError::invalid_grant(""));
        };

        let scope = request.parameter("scope");
        if !data_handler
            .validate_scope(&credential.client_id, scope)
            .await
        {
            return Err(OAuthError::invalid_scope(""));
        }

        let Some(auth_info) = data_handler
            .create_or_update_auth_info(&credential.client_id, &user_id, scope)
            .await
        else {
            return Err(OAuthError::invalid_grant(""));
        };
        if auth_info.client_id != credential.client_id {
            return Err(OAuthError::invalid_client(""));
        }

        helpers::issue_access_token(data_handler, &auth_info, GrantType::Password).await
    }
}
