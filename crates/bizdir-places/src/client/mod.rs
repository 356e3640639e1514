//! HTTP client for the Places web service.
//!
//! Wraps `reqwest` with Places-specific status handling and typed response
//! deserialization. Every endpoint checks the `"status"` field of the JSON
//! body; anything other than the statuses an endpoint accepts is surfaced as
//! [`PlacesError::Api`].

mod search;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;

pub use search::NearbyQuery;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

const NEARBY_SEARCH_PATH: &str = "nearbysearch/json";
const DETAILS_PATH: &str = "details/json";
const PHOTO_PATH: &str = "photo";

/// Client for the Places web service.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests. The API key is appended to each
/// request URL and never logged.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    nearby_url: Url,
    details_url: Url,
    photo_url: Url,
}

impl std::fmt::Debug for PlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClient")
            .field("api_key", &"[redacted]")
            .field("nearby_url", &self.nearby_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        let join = |path: &str| base.join(path).map_err(|e| invalid(e.to_string()));

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            nearby_url: join(NEARBY_SEARCH_PATH)?,
            details_url: join(DETAILS_PATH)?,
            photo_url: join(PHOTO_PATH)?,
        })
    }

    /// Public URL of a place photo, capped at `max_width` pixels.
    ///
    /// The URL embeds the API key, as the provider requires for photo
    /// requests; it is meant to be stored, not logged.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        let mut url = self.photo_url.clone();
        url.query_pairs_mut()
            .append_pair("maxwidth", &max_width.to_string())
            .append_pair("photoreference", photo_reference)
            .append_pair("key", &self.api_key);
        url.to_string()
    }

    /// Appends `params` and then the API key to an endpoint URL.
    fn build_url(&self, endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, requires a 2xx status, and parses the body as
    /// JSON.
    ///
    /// Errors name the endpoint path only; the query string (and with it the
    /// key) is stripped.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx status.
    /// - [`PlacesError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: Url) -> Result<serde_json::Value, PlacesError> {
        let endpoint = url.path().to_owned();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::Http(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint,
            source: e,
        })
    }

    /// Checks the top-level `"status"` field against the statuses the
    /// endpoint treats as success.
    fn check_status(body: &serde_json::Value, accepted: &[&str]) -> Result<(), PlacesError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("MISSING_STATUS");
        if accepted.contains(&status) {
            return Ok(());
        }

        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("no error message")
            .to_string();
        Err(PlacesError::Api {
            status: status.to_string(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
