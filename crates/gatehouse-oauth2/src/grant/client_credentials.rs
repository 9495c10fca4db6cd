//! Client Credentials grant (RFC 6749 Section 4.4).

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

/// Issues an access token to a client acting on its own behalf.
///
/// There is no resource owner in this flow; the persistence layer resolves
/// a pseudo user ID representing the client itself. The resulting token
/// never carries a refresh token, whatever the stored grant says.
pub struct ClientCredentialsGrantHandler {
    credential_fetchers: Arc<ClientCredentialFetcherProvider>,
}

impl ClientCredentialsGrantHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new(credential_fetchers: Arc<ClientCredentialFetcherProvider>) -> Self {
        Self {
            credential_fetchers,
        }
    }
}

#[async_trait]
impl GrantHandler for ClientCredentialsGrantHandler {
    async fn handle(
        &self,
        request: &dyn Request,
        data_handler: &dyn DataHandler,
    ) -> OAuthResult<GrantHandlerResult> {
        let credential = helpers::client_credential(&self.credential_fetchers, request)?;

        let user_id = data_handler
            .get_client_user_id(&credential.client_id, &credential.client_secret)
            .await
            .filter(|user_id| !user_id.is_empty());
        let Some(user_id) = user_id else {
            return Err(OAuthError::invalid_client(""));
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

        helpers::issue_access_token(data_handler, &auth_info, GrantType::ClientCredentials).await
    }
}
