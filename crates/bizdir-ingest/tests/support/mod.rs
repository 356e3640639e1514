//! Scripted in-memory places provider shared by the ingestion tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bizdir_core::{BusinessRecord, ConflictPolicy};
use bizdir_db::{DbError, UpsertOutcome};
use bizdir_ingest::{BusinessSink, IngestError, PlacesSource};
use bizdir_places::{
    Geometry, LatLng, NearbyQuery, NearbySearchPage, Photo, Place, PlaceDetails, PlacesError,
};
use tokio::time::Instant;

type PageKey = (String, Option<String>);

#[derive(Debug, Clone)]
pub struct SearchCall {
    pub place_type: String,
    pub token: Option<String>,
    pub at: Instant,
}

/// Serves pre-registered pages keyed by `(place type, page token)`.
/// Unregistered requests fail with `INVALID_REQUEST`.
#[derive(Default)]
pub struct ScriptedSource {
    pages: HashMap<PageKey, Result<NearbySearchPage, String>>,
    calls: Mutex<Vec<SearchCall>>,
    details_calls: AtomicUsize,
    fail_details: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(
        mut self,
        place_type: &str,
        token: Option<&str>,
        hits: Vec<Place>,
        next: Option<&str>,
    ) -> Self {
        self.pages.insert(
            (place_type.to_string(), token.map(ToString::to_string)),
            Ok(NearbySearchPage {
                results: hits,
                next_page_token: next.map(ToString::to_string),
                status: "OK".to_string(),
            }),
        );
        self
    }

    pub fn failing_page(mut self, place_type: &str, token: Option<&str>, message: &str) -> Self {
        self.pages.insert(
            (place_type.to_string(), token.map(ToString::to_string)),
            Err(message.to_string()),
        );
        self
    }

    pub fn failing_details(mut self) -> Self {
        self.fail_details = true;
        self
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }
}

impl PlacesSource for ScriptedSource {
    async fn search_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Result<NearbySearchPage, PlacesError> {
        self.calls.lock().unwrap().push(SearchCall {
            place_type: query.place_type.clone(),
            token: page_token.map(ToString::to_string),
            at: Instant::now(),
        });

        let key = (query.place_type.clone(), page_token.map(ToString::to_string));
        match self.pages.get(&key) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(message)) => Err(PlacesError::Api {
                status: "UNKNOWN_ERROR".to_string(),
                message: message.clone(),
            }),
            None => Err(PlacesError::Api {
                status: "INVALID_REQUEST".to_string(),
                message: format!("no scripted page for {key:?}"),
            }),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_details {
            return Err(PlacesError::Api {
                status: "NOT_FOUND".to_string(),
                message: "details unavailable".to_string(),
            });
        }
        Ok(PlaceDetails {
            website: Some(format!("https://{place_id}.example.com")),
            formatted_phone_number: Some("030 000 0000".to_string()),
        })
    }

    fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!("https://photos.example.com/{photo_reference}?w={max_width}")
    }
}

/// A sink whose every write fails.
#[derive(Default)]
pub struct FailingSink {
    pub attempts: AtomicUsize,
}

impl BusinessSink for FailingSink {
    async fn upsert(
        &self,
        _record: &BusinessRecord,
        _policy: ConflictPolicy,
    ) -> Result<UpsertOutcome, IngestError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(IngestError::Store(DbError::Sqlx(sqlx::Error::PoolTimedOut)))
    }
}

pub fn place(place_id: &str, name: &str) -> Place {
    Place {
        place_id: place_id.to_string(),
        name: name.to_string(),
        vicinity: Some(format!("{name} Street")),
        geometry: Some(Geometry {
            location: LatLng {
                lat: 5.6,
                lng: -0.18,
            },
        }),
        rating: Some(4.0),
        photos: vec![Photo {
            photo_reference: format!("photo-{place_id}"),
        }],
        types: vec!["restaurant".to_string(), "food".to_string()],
    }
}
