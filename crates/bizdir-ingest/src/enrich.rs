//! Turns a raw search hit into a [`BusinessRecord`].

use bizdir_core::{BusinessRecord, GridCell};
use bizdir_places::{Place, PlaceDetails};
use chrono::{DateTime, Utc};

use crate::settings::RunOptions;
use crate::traits::PlacesSource;

/// Provider types joined into a readable description:
/// `["shopping_mall", "point_of_interest"]` → `"shopping mall, point of interest"`.
#[must_use]
pub fn describe_types(types: &[String]) -> Option<String> {
    if types.is_empty() {
        return None;
    }
    Some(
        types
            .iter()
            .map(|t| t.replace('_', " "))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Assemble a record from a hit and whatever enrichment succeeded. Missing
/// hit fields become `None`; this never fails.
#[must_use]
pub fn build_record(
    hit: &Place,
    details: Option<&PlaceDetails>,
    cell: &GridCell,
    cover_image: Option<String>,
    now: DateTime<Utc>,
) -> BusinessRecord {
    let location = hit.geometry.map(|g| g.location);
    BusinessRecord {
        name: hit.name.clone(),
        description: describe_types(&hit.types),
        address: hit.vicinity.clone(),
        city: cell.city.name.clone(),
        latitude: location.map(|l| l.lat),
        longitude: location.map(|l| l.lng),
        rating: hit.rating,
        website: details.and_then(|d| d.website.clone()),
        phone: details.and_then(|d| d.formatted_phone_number.clone()),
        category: cell.category.label(),
        cover_image,
        created_at: now,
        updated_at: now,
    }
}

/// Enrich one hit: resolve its cover photo and, when enabled, its contact
/// details. A failed details lookup is logged and leaves website and phone
/// empty.
pub async fn enrich_hit<S: PlacesSource>(
    source: &S,
    hit: &Place,
    cell: &GridCell,
    options: &RunOptions,
) -> BusinessRecord {
    let details = if options.details {
        match source.place_details(&hit.place_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                tracing::warn!(
                    place_id = %hit.place_id,
                    name = %hit.name,
                    error = %e,
                    "place details lookup failed; storing without contact fields"
                );
                None
            }
        }
    } else {
        None
    };

    let cover_image = hit
        .photos
        .first()
        .map(|photo| source.photo_url(&photo.photo_reference, options.photo_max_width));

    build_record(hit, details.as_ref(), cell, cover_image, Utc::now())
}
