//! Inbound request seam.
//!
//! The core never touches a transport directly. Whatever carries the
//! inbound HTTP request (an `axum` extractor, a test double, a queue
//! message) is adapted to the [`Request`] trait, which exposes the only
//! three views the protocol needs: a single parameter, the full ordered
//! parameter map, and a header.

use indexmap::IndexMap;

/// Read-only view of an inbound OAuth 2.0 request.
///
/// Parameters are the merged query/body parameters of the request;
/// the distinction does not matter to the protocol core. Implementations
/// must preserve the order in which parameters appeared, since auxiliary
/// parameter maps derived from them keep that order.
pub trait Request: Send + Sync {
    /// Returns the value of the named parameter, if present.
    fn parameter(&self, name: &str) -> Option<&str>;

    /// Returns all parameters in request order.
    fn parameter_map(&self) -> IndexMap<String, String>;

    /// Returns the value of the named header, if present.
    fn header(&self, name: &str) -> Option<&str>;
}
