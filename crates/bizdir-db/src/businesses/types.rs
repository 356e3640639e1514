//! Row types for the `businesses` table.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// What a single upsert did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    /// An existing row with the same `(name, address)` was overwritten.
    Updated,
    /// An existing row with the same `(name, address)` was kept as-is.
    Ignored,
}

/// A row from the `businesses` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub category: String,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for [`super::search_businesses`].
///
/// Each text filter is a case-insensitive substring match; `None` or blank
/// skips the filter.
#[derive(Debug, Clone, Default)]
pub struct BusinessSearch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub limit: i64,
}

/// Number of stored businesses per category label.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryCountRow {
    pub category: String,
    pub business_count: i64,
}
