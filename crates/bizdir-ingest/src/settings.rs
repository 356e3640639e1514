//! Per-run ingestion settings, derived from the process-wide [`AppConfig`].

use std::time::Duration;

use bizdir_core::{AppConfig, ConfigError, ConflictPolicy};
use bizdir_places::{PlacesClient, PlacesError};

const PLACES_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Knobs that shape one sweep of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub radius_meters: u32,
    /// Wait before redeeming each continuation token.
    pub page_delay: Duration,
    /// Follow continuation tokens; when off only the first page is fetched.
    pub pagination: bool,
    /// Look up website and phone for every hit.
    pub details: bool,
    pub conflict_policy: ConflictPolicy,
    pub photo_max_width: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            radius_meters: 15_000,
            page_delay: Duration::from_millis(bizdir_core::config::MIN_PAGE_DELAY_MS),
            pagination: true,
            details: true,
            conflict_policy: ConflictPolicy::Ignore,
            photo_max_width: 800,
        }
    }
}

/// Everything needed to run one ingestion against the live provider.
#[derive(Clone)]
pub struct IngestSettings {
    pub places_api_key: String,
    pub places_base_url: String,
    pub places_timeout_secs: u64,
    pub places_user_agent: String,
    pub options: RunOptions,
}

impl std::fmt::Debug for IngestSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestSettings")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("places_timeout_secs", &self.places_timeout_secs)
            .field("places_user_agent", &self.places_user_agent)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestSettings {
    /// Resolve run settings from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if no Places API key is
    /// configured. Nothing has been fetched or written at that point.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let places_api_key = config
            .places_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(PLACES_API_KEY_VAR.to_string()))?
            .to_string();

        Ok(Self {
            places_api_key,
            places_base_url: config.places_base_url.clone(),
            places_timeout_secs: config.places_timeout_secs,
            places_user_agent: config.places_user_agent.clone(),
            options: RunOptions {
                radius_meters: config.ingest_radius_meters,
                page_delay: Duration::from_millis(config.ingest_page_delay_ms),
                pagination: config.ingest_pagination,
                details: config.ingest_details,
                conflict_policy: config.ingest_conflict_policy,
                photo_max_width: config.ingest_photo_max_width,
            },
        })
    }

    /// # Errors
    ///
    /// Returns [`PlacesError`] if the HTTP client cannot be built or the base
    /// URL is invalid.
    pub fn build_client(&self) -> Result<PlacesClient, PlacesError> {
        PlacesClient::with_base_url(
            &self.places_api_key,
            self.places_timeout_secs,
            &self.places_user_agent,
            &self.places_base_url,
        )
    }
}
