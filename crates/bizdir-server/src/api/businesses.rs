use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct BusinessItem {
    id: Uuid,
    name: String,
    description: Option<String>,
    address: Option<String>,
    city: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    rating: Option<f64>,
    website: Option<String>,
    phone: Option<String>,
    category: String,
    cover_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<bizdir_db::BusinessRow> for BusinessItem {
    fn from(row: bizdir_db::BusinessRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            address: row.address,
            city: row.city,
            latitude: row.latitude,
            longitude: row.longitude,
            rating: row.rating,
            website: row.website,
            phone: row.phone,
            category: row.category,
            cover_image: row.cover_image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BusinessQuery {
    /// Substring of the business name.
    pub q: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    category: String,
    business_count: i64,
}

pub(super) async fn search_businesses(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BusinessQuery>,
) -> Result<Json<ApiResponse<Vec<BusinessItem>>>, ApiError> {
    let rows = bizdir_db::search_businesses(
        &state.pool,
        &bizdir_db::BusinessSearch {
            name: query.q,
            city: query.city,
            category: query.category,
            limit: normalize_limit(query.limit),
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(BusinessItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CategoryItem>>>, ApiError> {
    let rows = bizdir_db::list_categories(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| CategoryItem {
            category: row.category,
            business_count: row.business_count,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
