//! Write operations for the `businesses` table.

use bizdir_core::{BusinessRecord, ConflictPolicy};
use sqlx::PgPool;

use super::types::UpsertOutcome;
use crate::DbError;

/// Insert one business, resolving `(name, address)` collisions per `policy`.
///
/// - [`ConflictPolicy::Ignore`]: `ON CONFLICT DO NOTHING`; an existing row
///   yields [`UpsertOutcome::Ignored`].
/// - [`ConflictPolicy::Update`]: overwrite every column except `id` and
///   `created_at`; an existing row yields [`UpsertOutcome::Updated`].
///
/// Each call is a single statement, so the write is atomic on its own and
/// independent of any other record.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_business(
    pool: &PgPool,
    record: &BusinessRecord,
    policy: ConflictPolicy,
) -> Result<UpsertOutcome, DbError> {
    let conflict_clause = match policy {
        ConflictPolicy::Ignore => "ON CONFLICT (name, address) DO NOTHING",
        ConflictPolicy::Update => {
            "ON CONFLICT (name, address) DO UPDATE SET \
                 description = EXCLUDED.description, \
                 city        = EXCLUDED.city, \
                 latitude    = EXCLUDED.latitude, \
                 longitude   = EXCLUDED.longitude, \
                 rating      = EXCLUDED.rating, \
                 website     = EXCLUDED.website, \
                 phone       = EXCLUDED.phone, \
                 category    = EXCLUDED.category, \
                 cover_image = EXCLUDED.cover_image, \
                 updated_at  = EXCLUDED.updated_at"
        }
    };

    let sql = format!(
        "INSERT INTO businesses \
             (name, description, address, city, latitude, longitude, rating, \
              website, phone, category, cover_image, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         {conflict_clause} \
         RETURNING (xmax = 0) AS is_new"
    );

    let is_new: Option<bool> = sqlx::query_scalar::<_, bool>(&sql)
        .bind(&record.name)
        .bind(&record.description)
        .bind(&record.address)
        .bind(&record.city)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(record.rating)
        .bind(&record.website)
        .bind(&record.phone)
        .bind(&record.category)
        .bind(&record.cover_image)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_optional(pool)
        .await?;

    Ok(match is_new {
        // DO NOTHING returns no row when the key already exists.
        None => UpsertOutcome::Ignored,
        Some(true) => UpsertOutcome::Inserted,
        Some(false) => UpsertOutcome::Updated,
    })
}
