//! Response types for the Places nearby-search and details endpoints.
//!
//! ## Observed shape
//!
//! Every field of a search hit except `place_id` may be missing: hits for
//! unnamed landmarks have no `vicinity`, many small shops carry no `rating`
//! or `photos`, and `types` is occasionally absent. All of them are
//! defaulted so a sparse hit never fails the whole page.
//!
//! `next_page_token` is omitted on the last page. A token is not redeemable
//! until a couple of seconds after it is issued; redeeming it early yields
//! `INVALID_REQUEST`.
//!
//! `status` is always present. `error_message` only accompanies non-`OK`
//! statuses such as `REQUEST_DENIED` or `OVER_QUERY_LIMIT`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub photo_reference: String,
}

/// One nearby-search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Raw nearby-search body.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<Place>,
    pub status: String,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One successful page of nearby-search hits.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchPage {
    pub results: Vec<Place>,
    /// `None` on the last page.
    pub next_page_token: Option<String>,
    /// `OK` or `ZERO_RESULTS`.
    pub status: String,
}

impl From<NearbySearchResponse> for NearbySearchPage {
    fn from(response: NearbySearchResponse) -> Self {
        Self {
            results: response.results,
            next_page_token: response
                .next_page_token
                .filter(|token| !token.trim().is_empty()),
            status: response.status,
        }
    }
}

/// Contact fields from the details endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
}

/// Raw details body.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}
