//! Offline unit tests for bizdir-db pool configuration and row types.
//! These tests do not require a live database connection.

use bizdir_core::{AppConfig, ConflictPolicy, Environment};
use bizdir_db::{BusinessRow, BusinessSearch, PoolConfig, UpsertOutcome};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        api_keys: Vec::new(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        places_api_key: None,
        places_base_url: "https://maps.googleapis.com/maps/api/place/".to_string(),
        places_timeout_secs: 30,
        places_user_agent: "ua".to_string(),
        ingest_radius_meters: 15_000,
        ingest_page_delay_ms: 2000,
        ingest_pagination: true,
        ingest_details: true,
        ingest_conflict_policy: ConflictPolicy::Ignore,
        ingest_photo_max_width: 800,
        grid_path: None,
        ingest_cron: None,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`BusinessRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn business_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let now = Utc::now();
    let row = BusinessRow {
        id: Uuid::new_v4(),
        name: "Buka Restaurant".to_string(),
        description: Some("restaurant, food, point of interest".to_string()),
        address: Some("East Legon".to_string()),
        city: "Accra".to_string(),
        latitude: Some(5.6037),
        longitude: Some(-0.187),
        rating: None,
        website: None,
        phone: None,
        category: "restaurant".to_string(),
        cover_image: None,
        created_at: now,
        updated_at: now,
    };

    assert_eq!(row.name, "Buka Restaurant");
    assert_eq!(row.city, "Accra");
    assert!(row.rating.is_none());
    assert_eq!(row.created_at, row.updated_at);
}

#[test]
fn business_search_default_has_no_filters() {
    let search = BusinessSearch::default();
    assert!(search.name.is_none());
    assert!(search.city.is_none());
    assert!(search.category.is_none());
}

#[test]
fn upsert_outcomes_are_distinct() {
    assert_ne!(UpsertOutcome::Inserted, UpsertOutcome::Ignored);
    assert_ne!(UpsertOutcome::Updated, UpsertOutcome::Ignored);
}
