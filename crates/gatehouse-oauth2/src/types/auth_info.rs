//! Authorization grant entity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One authorization grant.
///
/// Created (or refreshed) by `DataHandler::create_or_update_auth_info`, or
/// looked up by authorization code, refresh token, or ID. Its life cycle
/// differs per grant type: for the authorization code flow it exists from
/// the moment the resource owner approves; for the client credentials and
/// password flows it is created while handling the token request itself.
///
/// The `client_id` recorded here must match the client presenting the code
/// or refresh token on redemption. The grant handlers enforce that, not
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    /// Unique identifier of this grant; access tokens reference it.
    pub id: String,

    /// The resource owner who approved the grant (or the client's pseudo
    /// user for the client credentials flow).
    pub user_id: String,

    /// The client the grant was issued to.
    pub client_id: String,

    /// Granted scopes, space-delimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Refresh token bound to this grant, if the flow issues one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Authorization code awaiting redemption, for the code flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// The redirect URI the code was issued against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,

    /// Open-ended extension data, iterated in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub additional_info: IndexMap<String, String>,
}

impl AuthInfo {
    /// Creates a grant with the required identity fields and nothing else.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            client_id: client_id.into(),
            scope: None,
            refresh_token: None,
            code: None,
            redirect_uri: None,
            additional_info: IndexMap::new(),
        }
    }

    /// Sets the granted scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Sets the authorization code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Returns the extension value stored under `name`.
    #[must_use]
    pub fn additional_info(&self, name: &str) -> Option<&str> {
        self.additional_info.get(name).map(String::as_str)
    }

    /// Stores an extension value under `name`, replacing any previous value.
    pub fn set_additional_info(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.additional_info.insert(name.into(), value.into());
    }

    /// Removes the extension value stored under `name`.
    pub fn remove_additional_info(&mut self, name: &str) {
        // shift_remove keeps the remaining keys in insertion order
        self.additional_info.shift_remove(name);
    }

    /// Returns all extension names in insertion order.
    pub fn additional_info_names(&self) -> impl Iterator<Item = &str> {
        self.additional_info.keys().map(String::as_str)
    }
}
