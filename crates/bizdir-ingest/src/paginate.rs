//! Continuation-token pagination over a [`PlacesSource`].

use std::collections::HashSet;
use std::time::Duration;

use bizdir_places::{NearbyQuery, Place, PlacesError};

use crate::traits::PlacesSource;

/// Hits gathered for one query, and the error that cut pagination short, if
/// any.
#[derive(Debug, Default)]
pub struct PaginatedHits {
    pub hits: Vec<Place>,
    pub pages_fetched: usize,
    pub error: Option<PlacesError>,
}

/// Fetches every page for `query`, in order.
///
/// Starts without a token and sleeps `page_delay` before redeeming each
/// continuation token. Stops when a page carries no token, when
/// `follow_tokens` is off (first page only), when a token repeats one
/// already seen for this query, or when a page fetch fails. Hits from pages
/// fetched before a failure are kept.
pub async fn fetch_all_pages<S: PlacesSource>(
    source: &S,
    query: &NearbyQuery,
    page_delay: Duration,
    follow_tokens: bool,
) -> PaginatedHits {
    let mut collected = PaginatedHits::default();
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut token: Option<String> = None;

    loop {
        if token.is_some() {
            tokio::time::sleep(page_delay).await;
        }

        let page = match source.search_page(query, token.as_deref()).await {
            Ok(page) => page,
            Err(e) => {
                collected.error = Some(e);
                break;
            }
        };

        collected.pages_fetched += 1;
        tracing::debug!(
            page = collected.pages_fetched,
            hits = page.results.len(),
            has_next = page.next_page_token.is_some(),
            "fetched search page"
        );
        collected.hits.extend(page.results);

        if !follow_tokens {
            break;
        }
        let Some(next) = page.next_page_token else {
            break;
        };
        if !seen_tokens.insert(next.clone()) {
            tracing::warn!(
                place_type = %query.place_type,
                pages = collected.pages_fetched,
                "provider repeated a continuation token; treating as last page"
            );
            break;
        }
        token = Some(next);
    }

    collected
}
