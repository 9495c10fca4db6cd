//! Steps shared by the grant-type state machines.
//!
//! Free functions rather than a base type: each grant handler composes
//! the subset it needs, and custom handlers for extension grant types can
//! reuse them the same way.

use crate::OAuthResult;
use crate::data::DataHandler;
use crate::error::OAuthError;
use crate::fetcher::ClientCredentialFetcherProvider;
use crate::grant::GrantHandlerResult;
use crate::request::Request;
use crate::types::{AuthInfo, ClientCredential, GrantType};

/// Extracts the client credential from the request.
///
/// # Errors
///
/// Returns `InvalidRequest` when no registered fetcher matches the request.
pub fn client_credential(
    fetchers: &ClientCredentialFetcherProvider,
    request: &dyn Request,
) -> OAuthResult<ClientCredential> {
    fetchers
        .fetcher_for(request)
        .map(|fetcher| fetcher.fetch(request))
        .ok_or_else(|| OAuthError::invalid_request("Client credential not found"))
}

/// Returns the named parameter, which must be present and non-empty.
///
/// # Errors
///
/// Returns `InvalidRequest` with the message `'<name>' not found` when the
/// parameter is missing or empty.
pub fn require_parameter(request: &dyn Request, name: &str) -> OAuthResult<String> {
    match request.parameter(name) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(OAuthError::invalid_request(format!("'{name}' not found"))),
    }
}

/// Issues the access token for a validated grant and builds the result.
///
/// The result includes `expires_in` only for expiring tokens, the grant's
/// refresh token for every grant type except `client_credentials`, and the
/// grant's scope when it carries one.
///
/// # Errors
///
/// Returns `UnknownError` when the persistence layer yields no token:
/// by the time this runs every validation has passed, so an absent token
/// is an unexpected condition, not a protocol failure.
pub async fn issue_access_token(
    data_handler: &dyn DataHandler,
    auth_info: &AuthInfo,
    grant_type: GrantType,
) -> OAuthResult<GrantHandlerResult> {
    let Some(access_token) = data_handler
        .create_or_update_access_token(auth_info, grant_type.as_str())
        .await
    else {
        tracing::warn!(grant_type = %grant_type, auth_id = %auth_info.id, "access token issuance returned nothing");
        return Err(OAuthError::unknown_error("Issuing Access token failed"));
    };

    let mut result = GrantHandlerResult::new(access_token.token);
    if access_token.expires_in > 0 {
        result.expires_in = Some(access_token.expires_in);
    }
    if grant_type != GrantType::ClientCredentials {
        if let Some(refresh_token) = auth_info
            .refresh_token
            .as_deref()
            .filter(|token| !token.is_empty())
        {
            result.refresh_token = Some(refresh_token.to_string());
        }
    }
    if let Some(scope) = auth_info.scope.as_deref().filter(|scope| !scope.is_empty()) {
        result.scope = Some(scope.to_string());
    }
    Ok(result)
}
