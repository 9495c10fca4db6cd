//! Authorization endpoint (RFC 6749 Section 3.1).
//!
//! Serving an authorization request is a three-phase conversation:
//!
//! 1. [`AuthorizationEndpoint::handle_request`] validates the inbound
//!    request before any consent UI is rendered. Success carries no
//!    payload: it means "safe to ask the resource owner".
//! 2. [`AuthorizationEndpoint::allow`] runs after the resource owner
//!    approves: it records the grant and builds the redirect parameters
//!    (an authorization code, an implicit token, or both).
//! 3. [`AuthorizationEndpoint::deny`] runs after the resource owner
//!    refuses and builds the `access_denied` redirect.
//!
//! Where the parameters land follows RFC 6749: a pure `code` response goes
//! in the redirect query string; any response involving an implicit token
//! goes in the fragment, keeping the token away from the wire and from
//! server logs on the client side.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::OAuthResult;
use crate::data::DataHandlerFactory;
use crate::error::OAuthError;
use crate::request::Request;
use crate::types::GrantType;

/// The `code` response type.
const RESPONSE_TYPE_CODE: &str = "code";

/// The `token` (implicit) response type.
const RESPONSE_TYPE_TOKEN: &str = "token";

/// Redirect parameters produced by `allow` or `deny`.
///
/// Exactly one of `query`/`fragment` is populated, per the response-type
/// placement rule. Parameter order is meaningful and preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationEndpointResponse {
    /// Where to send the resource owner's user agent.
    pub redirect_uri: String,

    /// Parameters for the redirect query string, for a pure `code` response.
    pub query: Option<IndexMap<String, String>>,

    /// Parameters for the redirect fragment, for any implicit response.
    pub fragment: Option<IndexMap<String, String>>,
}

impl AuthorizationEndpointResponse {
    fn with_query(redirect_uri: String, params: IndexMap<String, String>) -> Self {
        Self {
            redirect_uri,
            query: Some(params),
            fragment: None,
        }
    }

    fn with_fragment(redirect_uri: String, params: IndexMap<String, String>) -> Self {
        Self {
            redirect_uri,
            query: None,
            fragment: Some(params),
        }
    }

    /// Assembles the complete redirect URL.
    ///
    /// Query parameters are appended to any the redirect URI already has;
    /// fragment parameters are form-encoded into the fragment.
    ///
    /// # Errors
    ///
    /// Returns an error when the redirect URI does not parse as a URL.
    pub fn to_redirect_url(&self) -> Result<String, url::ParseError> {
        let mut url = url::Url::parse(&self.redirect_uri)?;
        if let Some(query) = &self.query {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        if let Some(fragment) = &self.fragment {
            let mut encoded = url::form_urlencoded::Serializer::new(String::new());
            for (name, value) in fragment {
                encoded.append_pair(name, value);
            }
            url.set_fragment(Some(&encoded.finish()));
        }
        Ok(url.to_string())
    }
}

/// The authorization endpoint.
///
/// Holds the server's allow-list of response types; a request may combine
/// several (for example `"code token"`), and every element must be
/// allowed.
pub struct AuthorizationEndpoint {
    data_handler_factory: Arc<dyn DataHandlerFactory>,
    allowed_response_types: Vec<String>,
}

impl AuthorizationEndpoint {
    /// Creates the endpoint with the response types this server allows.
    #[must_use]
    pub fn new(
        data_handler_factory: Arc<dyn DataHandlerFactory>,
        allowed_response_types: Vec<String>,
    ) -> Self {
        Self {
            data_handler_factory,
            allowed_response_types,
        }
    }

    /// Validates an authorization request before consent is rendered.
    ///
    /// Checks `response_type` against the allow-list, then the client, the
    /// redirect URI, and the requested scope, in that order. Success
    /// carries no payload.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for missing or disallowed parameters,
    /// `InvalidClient` for a client that fails validation, and
    /// `InvalidScope` for a scope the client may not request.
    pub async fn handle_request(&self, request: &dyn Request) -> OAuthResult<()> {
        let response_type = match request.parameter("response_type") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'response_type' not found")),
        };
        let response_types: Vec<&str> = response_type.split_whitespace().collect();
        for requested in &response_types {
            if !self
                .allowed_response_types
                .iter()
                .any(|allowed| allowed == requested)
            {
                return Err(OAuthError::invalid_request("'response_type' not allowed"));
            }
        }

        let data_handler = self.data_handler_factory.create(request);

        let client_id = match request.parameter("client_id") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'client_id' not found")),
        };
        if !data_handler.validate_client_by_id(client_id).await {
            return Err(OAuthError::invalid_client(""));
        }
        if !data_handler
            .validate_client_for_authorization(client_id, response_type)
            .await
        {
            return Err(OAuthError::invalid_client(
                "'response_type' not allowed for this 'client_id'",
            ));
        }

        let redirect_uri = match request.parameter("redirect_uri") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'redirect_uri' not found")),
        };
        if !data_handler
            .validate_redirect_uri(client_id, redirect_uri)
            .await
        {
            return Err(OAuthError::invalid_client("'redirect_uri' is invalid"));
        }

        let scope = request.parameter("scope");
        if !data_handler.validate_scope(client_id, scope).await {
            return Err(OAuthError::invalid_scope(""));
        }

        Ok(())
    }

    /// Completes the flow after the resource owner approved the request.
    ///
    /// Records the grant, issues an implicit token when the `token`
    /// response type was requested, and builds the redirect parameters:
    /// `state` first when present, then the token triple, then the code.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for missing parameters, `InvalidClient` when the
    /// grant cannot be recorded, and `UnknownError` when the persistence
    /// layer fails to deliver what the grant contract requires.
    pub async fn allow(&self, request: &dyn Request) -> OAuthResult<AuthorizationEndpointResponse> {
        let data_handler = self.data_handler_factory.create(request);

        let response_type = match request.parameter("response_type") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'response_type' not found")),
        };
        let response_types: Vec<&str> = response_type.split_whitespace().collect();
        let client_id = match request.parameter("client_id") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'client_id' not found")),
        };
        let user_id = match request.parameter("user_id") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'user_id' not found")),
        };
        let redirect_uri = match request.parameter("redirect_uri") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'redirect_uri' not found")),
        };
        let scope = request.parameter("scope");

        let Some(auth_info) = data_handler
            .create_or_update_auth_info(client_id, user_id, scope)
            .await
        else {
            return Err(OAuthError::invalid_client(""));
        };

        let mut access_token = None;
        if response_types.contains(&RESPONSE_TYPE_TOKEN) {
            match data_handler
                .create_or_update_access_token(&auth_info, GrantType::Implicit.as_str())
                .await
            {
                Some(token) => access_token = Some(token),
                None => {
                    return Err(OAuthError::unknown_error("Access token can't be created"));
                }
            }
        }

        let mut params = IndexMap::new();
        if let Some(state) = request.parameter("state").filter(|state| !state.is_empty()) {
            params.insert("state".to_string(), state.to_string());
        }
        if let Some(token) = &access_token {
            params.insert("access_token".to_string(), token.token.clone());
            params.insert("token_type".to_string(), "Bearer".to_string());
            if token.expires_in > 0 {
                params.insert("expires_in".to_string(), token.expires_in.to_string());
            }
        }
        if response_types.contains(&RESPONSE_TYPE_CODE) {
            let Some(code) = &auth_info.code else {
                return Err(OAuthError::unknown_error("Authorization code not issued"));
            };
            params.insert("code".to_string(), code.clone());
        }

        Ok(Self::place_params(
            &response_types,
            redirect_uri.to_string(),
            params,
        ))
    }

    /// Completes the flow after the resource owner denied the request.
    ///
    /// Builds an `access_denied` redirect, echoing `state` when present.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when `response_type` or `redirect_uri` is missing.
    pub async fn deny(&self, request: &dyn Request) -> OAuthResult<AuthorizationEndpointResponse> {
        let response_type = match request.parameter("response_type") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'response_type' not found")),
        };
        let response_types: Vec<&str> = response_type.split_whitespace().collect();
        let redirect_uri = match request.parameter("redirect_uri") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(OAuthError::invalid_request("'redirect_uri' not found")),
        };

        let mut params = IndexMap::new();
        params.insert("error".to_string(), "access_denied".to_string());
        if let Some(state) = request.parameter("state").filter(|state| !state.is_empty()) {
            params.insert("state".to_string(), state.to_string());
        }

        Ok(Self::place_params(
            &response_types,
            redirect_uri.to_string(),
            params,
        ))
    }

    /// A pure `code` response rides the query string; anything involving
    /// an implicit component rides the fragment.
    fn place_params(
        response_types: &[&str],
        redirect_uri: String,
        params: IndexMap<String, String>,
    ) -> AuthorizationEndpointResponse {
        if response_types == [RESPONSE_TYPE_CODE] {
            AuthorizationEndpointResponse::with_query(redirect_uri, params)
        } else {
            AuthorizationEndpointResponse::with_fragment(redirect_uri, params)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockDataHandler, MockDataHandlerFactory, MockRequest};
    use crate::types::{AccessToken, AuthInfo};

    const REDIRECT_URI: &str = "https://app.example.com/callback";

    fn endpoint(handler: MockDataHandler) -> AuthorizationEndpoint {
        AuthorizationEndpoint::new(
            Arc::new(MockDataHandlerFactory::new(handler)),
            vec!["code".to_string(), "token".to_string()],
        )
    }

    fn authorize_request(response_type: &str) -> MockRequest {
        MockRequest::new()
            .with_parameter("response_type", response_type)
            .with_parameter("client_id", "clientId1")
            .with_parameter("redirect_uri", REDIRECT_URI)
            .with_parameter("scope", "scope1")
    }

    fn allow_request(response_type: &str) -> MockRequest {
        authorize_request(response_type)
            .with_parameter("user_id", "userId1")
            .with_parameter("state", "state1")
    }

    fn granted_handler() -> MockDataHandler {
        MockDataHandler {
            created_auth_info: Some(
                AuthInfo::new("authId1", "userId1", "clientId1")
                    .with_scope("scope1")
                    .with_code("code1"),
            ),
            created_access_token: Some(AccessToken::new("authId1", "accessToken1", 3600, 0)),
            ..MockDataHandler::default()
        }
    }

    #[tokio::test]
    async fn test_handle_request_success() {
        assert!(endpoint(MockDataHandler::default())
            .handle_request(&authorize_request("code"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_handle_request_missing_response_type() {
        let request = MockRequest::new()
            .with_parameter("client_id", "clientId1")
            .with_parameter("redirect_uri", REDIRECT_URI);

        let err = endpoint(MockDataHandler::default())
            .handle_request(&request)
            .await
            .unwrap_err();
        assert_eq!(err.description(), "'response_type' not found");
    }

    #[tokio::test]
    async fn test_handle_request_disallowed_response_type() {
        let err = endpoint(MockDataHandler::default())
            .handle_request(&authorize_request("code id_token"))
            .await
            .unwrap_err();
        assert_eq!(err.description(), "'response_type' not allowed");
    }

    #[tokio::test]
    async fn test_handle_request_missing_client_id() {
        let request = MockRequest::new()
            .with_parameter("response_type", "code")
            .with_parameter("redirect_uri", REDIRECT_URI);

        let err = endpoint(MockDataHandler::default())
            .handle_request(&request)
            .await
            .unwrap_err();
        assert_eq!(err.description(), "'client_id' not found");
    }

    #[tokio::test]
    async fn test_handle_request_unknown_client() {
        let handler = MockDataHandler {
            client_valid_by_id: false,
            ..MockDataHandler::default()
        };

        let err = endpoint(handler)
            .handle_request(&authorize_request("code"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidClient { .. }));
        assert_eq!(err.description(), "");
    }

    #[tokio::test]
    async fn test_handle_request_response_type_not_allowed_for_client() {
        let handler = MockDataHandler {
            client_valid_for_authorization: false,
            ..MockDataHandler::default()
        };

        let err = endpoint(handler)
            .handle_request(&authorize_request("code"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidClient { .. }));
        assert_eq!(
            err.description(),
            "'response_type' not allowed for this 'client_id'"
        );
    }

    #[tokio::test]
    async fn test_handle_request_missing_redirect_uri() {
        let request = MockRequest::new()
            .with_parameter("response_type", "code")
            .with_parameter("client_id", "clientId1");

        let err = endpoint(MockDataHandler::default())
            .handle_request(&request)
            .await
            .unwrap_err();
        assert_eq!(err.description(), "'redirect_uri' not found");
    }

    #[tokio::test]
    async fn test_handle_request_invalid_redirect_uri() {
        let handler = MockDataHandler {
            redirect_uri_valid: false,
            ..MockDataHandler::default()
        };

        let err = endpoint(handler)
            .handle_request(&authorize_request("code"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidClient { .. }));
        assert_eq!(err.description(), "'redirect_uri' is invalid");
    }

    #[tokio::test]
    async fn test_handle_request_invalid_scope() {
        let handler = MockDataHandler {
            scope_valid: false,
            ..MockDataHandler::default()
        };

        let err = endpoint(handler)
            .handle_request(&authorize_request("code"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidScope { .. }));
    }

    #[tokio::test]
    async fn test_allow_code_goes_to_query() {
        let response = endpoint(granted_handler())
            .allow(&allow_request("code"))
            .await
            .unwrap();

        assert_eq!(response.redirect_uri, REDIRECT_URI);
        assert!(response.fragment.is_none());
        let query = response.query.unwrap();
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        // state always leads
        assert_eq!(pairs, vec![("state", "state1"), ("code", "code1")]);
    }

    #[tokio::test]
    async fn test_allow_token_goes_to_fragment() {
        let response = endpoint(granted_handler())
            .allow(&allow_request("token"))
            .await
            .unwrap();

        assert!(response.query.is_none());
        let fragment = response.fragment.unwrap();
        let pairs: Vec<(&str, &str)> = fragment
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("state", "state1"),
                ("access_token", "accessToken1"),
                ("token_type", "Bearer"),
                ("expires_in", "3600"),
            ]
        );
    }

    #[tokio::test]
    async fn test_allow_hybrid_goes_to_fragment() {
        for response_type in ["token code", "code token"] {
            let response = endpoint(granted_handler())
                .allow(&allow_request(response_type))
                .await
                .unwrap();

            assert!(response.query.is_none(), "{response_type}");
            let fragment = response.fragment.unwrap();
            assert_eq!(
                fragment.get("access_token").map(String::as_str),
                Some("accessToken1")
            );
            assert_eq!(fragment.get("code").map(String::as_str), Some("code1"));
        }
    }

    #[tokio::test]
    async fn test_allow_without_state() {
        let request = authorize_request("code").with_parameter("user_id", "userId1");

        let response = endpoint(granted_handler()).allow(&request).await.unwrap();
        let query = response.query.unwrap();
        assert!(!query.contains_key("state"));
        assert_eq!(query.get("code").map(String::as_str), Some("code1"));
    }

    #[tokio::test]
    async fn test_allow_non_expiring_token_has_no_expires_in() {
        let mut handler = granted_handler();
        handler.created_access_token = Some(AccessToken::new("authId1", "accessToken1", 0, 0));

        let response = endpoint(handler)
            .allow(&allow_request("token"))
            .await
            .unwrap();
        assert!(!response.fragment.unwrap().contains_key("expires_in"));
    }

    #[tokio::test]
    async fn test_allow_missing_user_id() {
        let err = endpoint(granted_handler())
            .allow(&authorize_request("code"))
            .await
            .unwrap_err();
        assert_eq!(err.description(), "'user_id' not found");
    }

    #[tokio::test]
    async fn test_allow_auth_info_not_created() {
        let err = endpoint(MockDataHandler::default())
            .allow(&allow_request("code"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::InvalidClient { .. }));
    }

    #[tokio::test]
    async fn test_allow_token_issue_failure() {
        let mut handler = granted_handler();
        handler.created_access_token = None;

        let err = endpoint(handler)
            .allow(&allow_request("token"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::UnknownError { .. }));
        assert_eq!(err.description(), "Access token can't be created");
    }

    #[tokio::test]
    async fn test_allow_code_missing_on_grant() {
        let mut handler = granted_handler();
        handler.created_auth_info = Some(AuthInfo::new("authId1", "userId1", "clientId1"));

        let err = endpoint(handler)
            .allow(&allow_request("code"))
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthError::UnknownError { .. }));
    }

    #[tokio::test]
    async fn test_deny_code_goes_to_query() {
        let request = MockRequest::new()
            .with_parameter("response_type", "code")
            .with_parameter("redirect_uri", REDIRECT_URI)
            .with_parameter("state", "state1");

        let response = endpoint(MockDataHandler::default())
            .deny(&request)
            .await
            .unwrap();
        let query = response.query.unwrap();
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("error", "access_denied"), ("state", "state1")]);
    }

    #[tokio::test]
    async fn test_deny_token_goes_to_fragment() {
        let request = MockRequest::new()
            .with_parameter("response_type", "token")
            .with_parameter("redirect_uri", REDIRECT_URI);

        let response = endpoint(MockDataHandler::default())
            .deny(&request)
            .await
            .unwrap();
        let fragment = response.fragment.unwrap();
        assert_eq!(
            fragment.get("error").map(String::as_str),
            Some("access_denied")
        );
        assert!(!fragment.contains_key("state"));
    }

    #[tokio::test]
    async fn test_deny_missing_redirect_uri() {
        let request = MockRequest::new().with_parameter("response_type", "code");

        let err = endpoint(MockDataHandler::default())
            .deny(&request)
            .await
            .unwrap_err();
        assert_eq!(err.description(), "'redirect_uri' not found");
    }

    #[tokio::test]
    async fn test_to_redirect_url_query() {
        let response = endpoint(granted_handler())
            .allow(&allow_request("code"))
            .await
            .unwrap();

        assert_eq!(
            response.to_redirect_url().unwrap(),
            "https://app.example.com/callback?state=state1&code=code1"
        );
    }

    #[tokio::test]
    async fn test_to_redirect_url_fragment() {
        let response = endpoint(granted_handler())
            .allow(&allow_request("token"))
            .await
            .unwrap();

        assert_eq!(
            response.to_redirect_url().unwrap(),
            "https://app.example.com/callback#state=state1&access_token=accessToken1&token_type=Bearer&expires_in=3600"
        );
    }

    #[test]
    fn test_to_redirect_url_invalid_uri() {
        let response = AuthorizationEndpointResponse::with_query(
            "not a url".to_string(),
            IndexMap::new(),
        );
        assert!(response.to_redirect_url().is_err());
    }
}
