use crate::app_config::{AppConfig, ConflictPolicy, Environment};
use crate::ConfigError;

/// Providers reject continuation tokens redeemed sooner than this.
pub const MIN_PAGE_DELAY_MS: u64 = 2000;

const MAX_RADIUS_METERS: u32 = 50_000;
const MAX_PHOTO_WIDTH: u32 = 1600;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got \"{raw}\""))
            }),
        }
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("BIZDIR_ENV", "development"))?;
    let bind_addr = parse_addr("BIZDIR_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BIZDIR_LOG_LEVEL", "info");
    let api_keys = parse_api_keys(&or_default("BIZDIR_API_KEYS", ""));

    let db_max_connections = parse_u32("BIZDIR_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("BIZDIR_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BIZDIR_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let places_api_key = optional("GOOGLE_MAPS_API_KEY");
    let places_base_url = or_default(
        "BIZDIR_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place/",
    );
    let places_timeout_secs = parse_u64("BIZDIR_PLACES_TIMEOUT_SECS", "30")?;
    let places_user_agent = or_default("BIZDIR_PLACES_USER_AGENT", "bizdir/0.1 (directory-ingest)");

    let ingest_radius_meters = parse_u32("BIZDIR_INGEST_RADIUS_METERS", "15000")?;
    if ingest_radius_meters == 0 || ingest_radius_meters > MAX_RADIUS_METERS {
        return Err(invalid(
            "BIZDIR_INGEST_RADIUS_METERS",
            format!("must be between 1 and {MAX_RADIUS_METERS}"),
        ));
    }

    let ingest_page_delay_ms = parse_u64("BIZDIR_INGEST_PAGE_DELAY_MS", "2000")?;
    if ingest_page_delay_ms < MIN_PAGE_DELAY_MS {
        return Err(invalid(
            "BIZDIR_INGEST_PAGE_DELAY_MS",
            format!("must be at least {MIN_PAGE_DELAY_MS}"),
        ));
    }

    let ingest_pagination = parse_bool("BIZDIR_INGEST_PAGINATION", true)?;
    let ingest_details = parse_bool("BIZDIR_INGEST_DETAILS", true)?;
    let ingest_conflict_policy =
        parse_conflict_policy(&or_default("BIZDIR_INGEST_CONFLICT_POLICY", "ignore"))?;

    let ingest_photo_max_width = parse_u32("BIZDIR_INGEST_PHOTO_MAX_WIDTH", "800")?;
    if ingest_photo_max_width == 0 || ingest_photo_max_width > MAX_PHOTO_WIDTH {
        return Err(invalid(
            "BIZDIR_INGEST_PHOTO_MAX_WIDTH",
            format!("must be between 1 and {MAX_PHOTO_WIDTH}"),
        ));
    }

    let grid_path = optional("BIZDIR_GRID_PATH").map(PathBuf::from);
    let ingest_cron = optional("BIZDIR_INGEST_CRON");

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        api_keys,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        places_api_key,
        places_base_url,
        places_timeout_secs,
        places_user_agent,
        ingest_radius_meters,
        ingest_page_delay_ms,
        ingest_pagination,
        ingest_details,
        ingest_conflict_policy,
        ingest_photo_max_width,
        grid_path,
        ingest_cron,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIZDIR_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_conflict_policy(s: &str) -> Result<ConflictPolicy, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "ignore" => Ok(ConflictPolicy::Ignore),
        "update" => Ok(ConflictPolicy::Update),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIZDIR_INGEST_CONFLICT_POLICY".to_string(),
            reason: format!("expected ignore or update, got \"{other}\""),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
