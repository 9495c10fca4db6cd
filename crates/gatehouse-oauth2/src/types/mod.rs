//! Domain types shared across the authorization-server core.
//!
//! - [`AuthInfo`] - one authorization grant
//! - [`AccessToken`] - an issued access token
//! - [`ClientCredential`] - a client id/secret pair extracted from a request
//! - [`GrantType`] - the built-in OAuth 2.0 grant types

pub mod access_token;
pub mod auth_info;
pub mod client_credential;
pub mod grant_type;

pub use access_token::AccessToken;
pub use auth_info::AuthInfo;
pub use client_credential::ClientCredential;
pub use grant_type::GrantType;
