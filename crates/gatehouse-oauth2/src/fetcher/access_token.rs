//! Access token extraction from protected-resource requests.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::request::Request;

/// Scheme-and-remainder shape of a bearer Authorization header.
/// Scheme names are case-sensitive on purpose.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(OAuth|Bearer)(.*)$").expect("valid regex"));

/// Scheme plus the token itself: the first run of characters after the
/// scheme that contains neither whitespace nor a comma.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(OAuth|Bearer)\s+([^\s,]*)").expect("valid regex"));

/// The comma that must introduce trailing auth-scheme parameters.
static PARAMS_LEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*,\s*").expect("valid regex"));

/// Separator between trailing auth-scheme parameters.
static PARAMS_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*").expect("valid regex"));

/// An extracted access token plus any auxiliary auth-scheme parameters.
///
/// The auxiliary map carries whatever rode along with the token
/// (signature, timestamp, algorithm, ...) in the order it appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// The opaque access token string.
    pub token: String,

    /// Auxiliary parameters, in request order.
    pub params: IndexMap<String, String>,
}

impl FetchResult {
    /// Creates a fetch result.
    #[must_use]
    pub fn new(token: impl Into<String>, params: IndexMap<String, String>) -> Self {
        Self {
            token: token.into(),
            params,
        }
    }
}

/// Strategy for extracting an access token from a request.
pub trait AccessTokenFetcher: Send + Sync {
    /// Returns `true` if this fetcher can extract a token from the request.
    fn matches(&self, request: &dyn Request) -> bool;

    /// Extracts the token.
    ///
    /// # Panics
    ///
    /// Panics if called for a request `matches` would reject, or if the
    /// matched material is malformed beyond what `matches` checks. Both
    /// indicate a wiring bug in the caller.
    fn fetch(&self, request: &dyn Request) -> FetchResult;
}

/// Extracts a bearer token from the `Authorization` request header.
///
/// Recognizes the `Bearer` and legacy `OAuth` schemes, including trailing
/// comma-separated `key="value"` auth-scheme parameters:
///
/// ```text
/// Authorization: Bearer access_token_value, algorithm="hmac-sha256"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthHeaderAccessTokenFetcher;

impl AuthHeaderAccessTokenFetcher {
    /// Creates the fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AccessTokenFetcher for AuthHeaderAccessTokenFetcher {
    fn matches(&self, request: &dyn Request) -> bool {
        request
            .header("Authorization")
            .is_some_and(|header| HEADER_RE.is_match(header))
    }

    fn fetch(&self, request: &dyn Request) -> FetchResult {
        let header = request
            .header("Authorization")
            .expect("fetch() called when matches() was false");
        let captures = TOKEN_RE
            .captures(header)
            .expect("fetch() called when matches() was false");
        let token = captures[2].to_string();

        let mut params = IndexMap::new();
        let matched_len = captures.get(0).map_or(0, |m| m.end());
        if matched_len != header.len() {
            let rest = &header[matched_len..];
            let lead = PARAMS_LEAD_RE
                .find(rest)
                .unwrap_or_else(|| panic!("Invalid Authorization header format: {header}"));
            for param in PARAMS_SPLIT_RE.split(&rest[lead.end()..]) {
                let (key, value) = param
                    .split_once('=')
                    .unwrap_or_else(|| panic!("Invalid Authorization header format: {header}"));
                let value = value.strip_prefix('"').unwrap_or(value);
                let value = value.strip_suffix('"').unwrap_or(value);
                params.insert(key.to_string(), value.to_string());
            }
        }
        FetchResult::new(token, params)
    }
}

/// Extracts an access token from the `oauth_token` or `access_token`
/// request parameter.
///
/// `oauth_token` takes precedence when both are present. All other request
/// parameters become auxiliary parameters, in request order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestParameterAccessTokenFetcher;

impl RequestParameterAccessTokenFetcher {
    /// Creates the fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Parameter names recognized as carrying the token, highest priority first.
const TOKEN_PARAMETERS: [&str; 2] = ["oauth_token", "access_token"];

impl AccessTokenFetcher for RequestParameterAccessTokenFetcher {
    fn matches(&self, request: &dyn Request) -> bool {
        TOKEN_PARAMETERS
            .iter()
            .any(|name| request.parameter(name).is_some_and(|value| !value.is_empty()))
    }

    fn fetch(&self, request: &dyn Request) -> FetchResult {
        let token = TOKEN_PARAMETERS
            .iter()
            .find_map(|name| request.parameter(name).filter(|value| !value.is_empty()))
            .expect("fetch() called when matches() was false")
            .to_string();
        let params = request
            .parameter_map()
            .into_iter()
            .filter(|(key, _)| !TOKEN_PARAMETERS.contains(&key.as_str()))
            .collect();
        FetchResult::new(token, params)
    }
}

/// Ordered list of [`AccessTokenFetcher`] strategies; first match wins.
pub struct AccessTokenFetcherProvider {
    fetchers: Vec<Box<dyn AccessTokenFetcher>>,
}

impl AccessTokenFetcherProvider {
    /// Creates a provider with the given fetchers, tried in order.
    #[must_use]
    pub fn new(fetchers: Vec<Box<dyn AccessTokenFetcher>>) -> Self {
        Self { fetchers }
    }

    /// Returns the first fetcher whose `matches` accepts the request.
    #[must_use]
    pub fn fetcher_for(&self, request: &dyn Request) -> Option<&dyn AccessTokenFetcher> {
        self.fetchers
            .iter()
            .find(|fetcher| fetcher.matches(request))
            .map(Box::as_ref)
    }

    /// Appends a fetcher at the end of the lookup order.
    pub fn push(&mut self, fetcher: Box<dyn AccessTokenFetcher>) {
        self.fetchers.push(fetcher);
    }

    /// Returns the registered fetchers in lookup order.
    #[must_use]
    pub fn fetchers(&self) -> &[Box<dyn AccessTokenFetcher>] {
        &self.fetchers
    }
}

impl Default for AccessTokenFetcherProvider {
    /// Registers the header fetcher before the parameter fetcher, so a
    /// token in the `Authorization` header wins over one in the parameters.
    fn default() -> Self {
        Self::new(vec![
            Box::new(AuthHeaderAccessTokenFetcher::new()),
            Box::new(RequestParameterAccessTokenFetcher::new()),
        ])
    }
}
