//! Credential extraction strategies.
//!
//! Two independent strategy families pull credentials out of a wire-level
//! request:
//!
//! - [`AccessTokenFetcher`] extracts a bearer token from a
//!   protected-resource request (`Authorization: Bearer`/`OAuth` header,
//!   or `oauth_token`/`access_token` parameters).
//! - [`ClientCredentialFetcher`] extracts a client id/secret pair from a
//!   token request (`Authorization: Basic` header, or
//!   `client_id`/`client_secret` parameters).
//!
//! Each family has a provider holding an ordered fetcher list; the first
//! fetcher whose `matches` succeeds is used. The default providers put the
//! header fetcher before the parameter fetcher, so header credentials take
//! precedence.
//!
//! # The match/fetch contract
//!
//! `fetch` must only be called after `matches` returned `true` for the
//! same request. Violating that is a bug in the calling endpoint, not a
//! protocol error, and `fetch` panics rather than returning malformed
//! credentials.

pub mod access_token;
pub mod client_credential;

pub use access_token::{
    AccessTokenFetcher, AccessTokenFetcherProvider, AuthHeaderAccessTokenFetcher, FetchResult,
    RequestParameterAccessTokenFetcher,
};
pub use client_credential::{
    AuthHeaderClientCredentialFetcher, ClientCredentialFetcher, ClientCredentialFetcherProvider,
    RequestParameterClientCredentialFetcher,
};
