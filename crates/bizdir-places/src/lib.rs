//! Client for the Google Places web service: nearby search, place details,
//! and photo URLs. Knows nothing about storage or the ingestion grid.

pub mod client;
pub mod error;
pub mod types;

pub use client::{NearbyQuery, PlacesClient, DEFAULT_BASE_URL};
pub use error::PlacesError;
pub use types::{
    Geometry, LatLng, NearbySearchPage, NearbySearchResponse, Photo, Place, PlaceDetails,
    PlaceDetailsResponse,
};
