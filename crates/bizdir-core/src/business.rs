use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized business ready to be written to the `businesses` table.
///
/// `(name, address)` is the natural key: two records with the same pair are
/// the same real-world business no matter which grid cell or run produced
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
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

impl BusinessRecord {
    /// The `(name, address)` pair used for deduplication.
    #[must_use]
    pub fn natural_key(&self) -> (&str, Option<&str>) {
        (self.name.as_str(), self.address.as_deref())
    }
}
