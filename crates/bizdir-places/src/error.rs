use thiserror::Error;

/// Errors returned by [`crate::PlacesClient`].
///
/// None of the variants carry the request URL with its query string, so the
/// API key never ends up in a log line or an HTTP response.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a status other than `OK`/`ZERO_RESULTS`.
    #[error("Places API returned {status}: {message}")]
    Api { status: String, message: String },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
