use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What the store does when an incoming business collides with an existing
/// row on the `(name, address)` natural key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the first-seen row and discard the incoming one.
    #[default]
    Ignore,
    /// Overwrite the mutable columns of the existing row; `created_at` is kept.
    Update,
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictPolicy::Ignore => write!(f, "ignore"),
            ConflictPolicy::Update => write!(f, "update"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub api_keys: Vec<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Google Places credential. Optional at load time; every ingestion run
    /// checks for it before touching the provider or the store.
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub places_timeout_secs: u64,
    pub places_user_agent: String,
    pub ingest_radius_meters: u32,
    pub ingest_page_delay_ms: u64,
    pub ingest_pagination: bool,
    pub ingest_details: bool,
    pub ingest_conflict_policy: ConflictPolicy,
    pub ingest_photo_max_width: u32,
    pub grid_path: Option<PathBuf>,
    pub ingest_cron: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("api_keys", &format!("[{} redacted]", self.api_keys.len()))
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("places_timeout_secs", &self.places_timeout_secs)
            .field("places_user_agent", &self.places_user_agent)
            .field("ingest_radius_meters", &self.ingest_radius_meters)
            .field("ingest_page_delay_ms", &self.ingest_page_delay_ms)
            .field("ingest_pagination", &self.ingest_pagination)
            .field("ingest_details", &self.ingest_details)
            .field("ingest_conflict_policy", &self.ingest_conflict_policy)
            .field("ingest_photo_max_width", &self.ingest_photo_max_width)
            .field("grid_path", &self.grid_path)
            .field("ingest_cron", &self.ingest_cron)
            .finish()
    }
}
