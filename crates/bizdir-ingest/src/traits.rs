//! Capability traits for the two collaborators of an ingestion run: the
//! places provider and the business store.
//!
//! The orchestrator is generic over both, so tests can substitute in-memory
//! doubles for the HTTP client and the database.

use std::future::Future;

use bizdir_core::{BusinessRecord, ConflictPolicy};
use bizdir_db::UpsertOutcome;
use bizdir_places::{NearbyQuery, NearbySearchPage, PlaceDetails, PlacesClient, PlacesError};

use crate::IngestError;

/// Source of nearby-search pages, place details and photo URLs.
pub trait PlacesSource: Send + Sync {
    /// Fetches one page of hits, redeeming `page_token` when given.
    fn search_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> impl Future<Output = Result<NearbySearchPage, PlacesError>> + Send;

    /// Fetches contact fields for one place.
    fn place_details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<PlaceDetails, PlacesError>> + Send;

    /// Public URL for a photo reference, capped at `max_width` pixels.
    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String;
}

/// Destination for enriched business records.
pub trait BusinessSink: Send + Sync {
    /// Writes one record, resolving `(name, address)` collisions per `policy`.
    fn upsert(
        &self,
        record: &BusinessRecord,
        policy: ConflictPolicy,
    ) -> impl Future<Output = Result<UpsertOutcome, IngestError>> + Send;
}

impl PlacesSource for PlacesClient {
    async fn search_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Result<NearbySearchPage, PlacesError> {
        self.nearby_search(query, page_token).await
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        PlacesClient::place_details(self, place_id).await
    }

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        PlacesClient::photo_url(self, photo_reference, max_width)
    }
}
