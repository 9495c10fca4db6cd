//! Test doubles shared by the unit tests across this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::data::{DataHandler, DataHandlerFactory};
use crate::request::Request;
use crate::types::{AccessToken, AuthInfo};

/// In-memory [`Request`] built from literal parameters and headers.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockRequest {
    params: IndexMap<String, String>,
    headers: IndexMap<String, String>,
}

impl MockRequest {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub(crate) fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Request for MockRequest {
    fn parameter(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn parameter_map(&self) -> IndexMap<String, String> {
        self.params.clone()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Scriptable [`DataHandler`] recording every call it receives.
///
/// Validations default to `true` and lookups to `None`; tests override the
/// fields they care about. The call log is shared between clones so a
/// factory handing out clones still exposes one log to assert on.
#[derive(Debug, Clone)]
pub(crate) struct MockDataHandler {
    pub(crate) client_valid: bool,
    pub(crate) client_valid_by_id: bool,
    pub(crate) client_valid_for_authorization: bool,
    pub(crate) redirect_uri_valid: bool,
    pub(crate) scope_valid: bool,
    pub(crate) user_valid_by_id: bool,
    pub(crate) user_id: Option<String>,
    pub(crate) client_user_id: Option<String>,
    pub(crate) created_auth_info: Option<AuthInfo>,
    pub(crate) auth_info_by_code: Option<AuthInfo>,
    pub(crate) auth_info_by_refresh_token: Option<AuthInfo>,
    pub(crate) auth_info_by_id: Option<AuthInfo>,
    pub(crate) created_access_token: Option<AccessToken>,
    pub(crate) stored_access_token: Option<AccessToken>,
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockDataHandler {
    fn default() -> Self {
        Self {
            client_valid: true,
            client_valid_by_id: true,
            client_valid_for_authorization: true,
            redirect_uri_valid: true,
            scope_valid: true,
            user_valid_by_id: true,
            user_id: None,
            client_user_id: None,
            created_auth_info: None,
            auth_info_by_code: None,
            auth_info_by_refresh_token: None,
            auth_info_by_id: None,
            created_access_token: None,
            stored_access_token: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockDataHandler {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub(crate) fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataHandler for MockDataHandler {
    async fn validate_client(
        &self,
        _client_id: &str,
        _client_secret: &str,
        _grant_type: &str,
    ) -> bool {
        self.record("validate_client");
        self.client_valid
    }

    async fn validate_client_by_id(&self, _client_id: &str) -> bool {
        self.record("validate_client_by_id");
        self.client_valid_by_id
    }

    async fn validate_client_for_authorization(
        &self,
        _client_id: &str,
        _response_type: &str,
    ) -> bool {
        self.record("validate_client_for_authorization");
        self.client_valid_for_authorization
    }

    async fn validate_redirect_uri(&self, _client_id: &str, _redirect_uri: &str) -> bool {
        self.record("validate_redirect_uri");
        self.redirect_uri_valid
    }

    async fn validate_scope(&self, _client_id: &str, _scope: Option<&str>) -> bool {
        self.record("validate_scope");
        self.scope_valid
    }

    async fn get_user_id(&self, _username: &str, _password: &str) -> Option<String> {
        self.record("get_user_id");
        self.user_id.clone()
    }

    async fn create_or_update_auth_info(
        &self,
        _client_id: &str,
        _user_id: &str,
        _scope: Option<&str>,
    ) -> Option<AuthInfo> {
        self.record("create_or_update_auth_info");
        self.created_auth_info.clone()
    }

    async fn create_or_update_access_token(
        &self,
        _auth_info: &AuthInfo,
        grant_type: &str,
    ) -> Option<AccessToken> {
        self.record(format!("create_or_update_access_token:{grant_type}"));
        self.created_access_token.clone()
    }

    async fn get_auth_info_by_code(&self, _code: &str) -> Option<AuthInfo> {
        self.record("get_auth_info_by_code");
        self.auth_info_by_code.clone()
    }

    async fn get_auth_info_by_refresh_token(&self, _refresh_token: &str) -> Option<AuthInfo> {
        self.record("get_auth_info_by_refresh_token");
        self.auth_info_by_refresh_token.clone()
    }

    async fn get_client_user_id(&self, _client_id: &str, _client_secret: &str) -> Option<String> {
        self.record("get_client_user_id");
        self.client_user_id.clone()
    }

    async fn validate_user_by_id(&self, _user_id: &str) -> bool {
        self.record("validate_user_by_id");
        self.user_valid_by_id
    }

    async fn get_access_token(&self, _token: &str) -> Option<AccessToken> {
        self.record("get_access_token");
        self.stored_access_token.clone()
    }

    async fn get_auth_info_by_id(&self, _auth_info_id: &str) -> Option<AuthInfo> {
        self.record("get_auth_info_by_id");
        self.auth_info_by_id.clone()
    }
}

/// Factory handing out clones of one scripted handler.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockDataHandlerFactory {
    pub(crate) handler: MockDataHandler,
}

impl MockDataHandlerFactory {
    pub(crate) fn new(handler: MockDataHandler) -> Self {
        Self { handler }
    }
}

impl DataHandlerFactory for MockDataHandlerFactory {
    fn create(&self, _request: &dyn Request) -> Box<dyn DataHandler> {
        Box::new(self.handler.clone())
    }
}
