//! Nearby-search and place-details endpoints for `PlacesClient`.

use crate::error::PlacesError;
use crate::types::{NearbySearchPage, NearbySearchResponse, PlaceDetails, PlaceDetailsResponse};

use super::PlacesClient;

const DETAILS_FIELDS: &str = "website,formatted_phone_number";

/// One nearby-search sweep: a centroid, a radius and a provider place type.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: u32,
    pub place_type: String,
}

impl NearbyQuery {
    fn location(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl PlacesClient {
    /// Fetches one page of nearby-search hits.
    ///
    /// With `page_token` set the provider returns the continuation page; the
    /// location, radius and type are still sent and ignored upstream. The
    /// caller is responsible for waiting until a token is redeemable.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] for any provider status other than `OK` or
    ///   `ZERO_RESULTS`.
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn nearby_search(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Result<NearbySearchPage, PlacesError> {
        let location = query.location();
        let radius = query.radius_m.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", query.place_type.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        tracing::debug!(
            place_type = %query.place_type,
            location = %location,
            continuation = page_token.is_some(),
            "requesting nearby search page"
        );

        let url = self.build_url(&self.nearby_url, &params);
        let body = self.request_json(url).await?;
        Self::check_status(&body, &["OK", "ZERO_RESULTS"])?;

        let response: NearbySearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearbysearch(type={})", query.place_type),
                source: e,
            })?;

        Ok(NearbySearchPage::from(response))
    }

    /// Fetches the website and phone number of one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] for any provider status other than `OK`
    ///   (including `NOT_FOUND`).
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        tracing::debug!(place_id, "requesting place details");

        let url = self.build_url(
            &self.details_url,
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        );
        let body = self.request_json(url).await?;
        Self::check_status(&body, &["OK"])?;

        let response: PlaceDetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;

        Ok(response.result.unwrap_or_default())
    }
}
