//! Client credential value type.

use serde::{Deserialize, Serialize};

/// A client id/secret pair extracted from a token request.
///
/// Produced only by the
/// [`ClientCredentialFetcher`](crate::fetcher::ClientCredentialFetcher)
/// strategies; nothing in the core constructs one from stored data.
/// Public clients arrive with an empty secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCredential {
    /// The client identifier presented with the request.
    pub client_id: String,

    /// The client secret presented with the request, possibly empty.
    pub client_secret: String,
}

impl ClientCredential {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_both_parts() {
        let credential = ClientCredential::new("clientId1", "clientSecret1");
        assert_eq!(credential.client_id, "clientId1");
        assert_eq!(credential.client_secret, "clientSecret1");
    }
}
