//! Read operations for the `businesses` table.

use sqlx::PgPool;

use super::types::{BusinessRow, BusinessSearch, CategoryCountRow};
use crate::DbError;

/// Wrap a user-supplied term for `ILIKE`, escaping its wildcards. Blank
/// terms become `None` so the filter is skipped.
fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}

/// Newest-first businesses matching the given filters.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_businesses(
    pool: &PgPool,
    search: &BusinessSearch,
) -> Result<Vec<BusinessRow>, DbError> {
    let rows = sqlx::query_as::<_, BusinessRow>(
        "SELECT id, name, description, address, city, latitude, longitude, rating, \
                website, phone, category, cover_image, created_at, updated_at \
         FROM businesses \
         WHERE ($1::text IS NULL OR name ILIKE $1) \
           AND ($2::text IS NULL OR city ILIKE $2) \
           AND ($3::text IS NULL OR category ILIKE $3) \
         ORDER BY created_at DESC, name \
         LIMIT $4",
    )
    .bind(like_pattern(search.name.as_deref()))
    .bind(like_pattern(search.city.as_deref()))
    .bind(like_pattern(search.category.as_deref()))
    .bind(search.limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Total number of stored businesses.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_businesses(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM businesses")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Distinct category labels in use, most populated first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategoryCountRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryCountRow>(
        "SELECT category, COUNT(*) AS business_count \
         FROM businesses \
         GROUP BY category \
         ORDER BY business_count DESC, category",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
