//! Tokeninfo endpoint.
//!
//! Describes an issued access token to whoever presents it, in the shape
//! popularized by Google's `tokeninfo` debug endpoint.

use std::sync::Arc;

use serde::Serialize;

use crate::data::DataHandlerFactory;
use crate::error::OAuthError;
use crate::request::Request;

/// HTTP status and JSON body of a tokeninfo response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokeninfoEndpointResponse {
    /// HTTP status code; 200 when the token was found.
    pub status: u16,

    /// JSON response body.
    pub body: String,
}

/// Successful tokeninfo body.
///
/// `expires_in` is rendered as a string, not a number; long-standing
/// client code depends on that quirk.
#[derive(Debug, Serialize)]
struct TokeninfoBody<'a> {
    aud: &'a str,
    sub: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'a str>,
    expires_in: String,
}

/// Reports the audience, subject, scope, and remaining lifetime of an
/// access token passed as the `access_token` parameter.
pub struct TokeninfoEndpoint {
    data_handler_factory: Arc<dyn DataHandlerFactory>,
}

impl TokeninfoEndpoint {
    /// Creates the endpoint.
    #[must_use]
    pub fn new(data_handler_factory: Arc<dyn DataHandlerFactory>) -> Self {
        Self {
            data_handler_factory,
        }
    }

    /// Handles one tokeninfo request.
    pub async fn handle_request(&self, request: &dyn Request) -> TokeninfoEndpointResponse {
        let token = match request.parameter("access_token") {
            Some(value) if !value.is_empty() => value,
            _ => {
                return Self::error_response(&OAuthError::invalid_request(
                    "access_token not found",
                ));
            }
        };

        let data_handler = self.data_handler_factory.create(request);
        let Some(access_token) = data_handler.get_access_token(token).await else {
            return Self::error_response(&OAuthError::invalid_token(""));
        };
        let Some(auth_info) = data_handler.get_auth_info_by_id(&access_token.auth_id).await
        else {
            return Self::error_response(&OAuthError::invalid_token(""));
        };

        let body = TokeninfoBody {
            aud: &auth_info.client_id,
            sub: &auth_info.user_id,
            scope: auth_info.scope.as_deref(),
            expires_in: access_token.expires_in.to_string(),
        };
        TokeninfoEndpointResponse {
            status: 200,
            body: serde_json::to_string(&body).expect("a flat tokeninfo body always serializes"),
        }
    }

    fn error_response(error: &OAuthError) -> TokeninfoEndpointResponse {
        TokeninfoEndpointResponse {
            status: error.http_status(),
            body: error.to_json(),
        }
    }
}
