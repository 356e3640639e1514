//! Places ingestion: sweeps the city × category grid, paginates the provider,
//! enriches every hit and upserts it into the business store.

pub mod enrich;
pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod paginate;
pub mod settings;
pub mod sink;
pub mod traits;

pub use error::IngestError;
pub use memory::MemoryBusinessSink;
pub use orchestrator::{CellOutcome, IngestionRun, IngestionSummary, RunState};
pub use paginate::{fetch_all_pages, PaginatedHits};
pub use settings::{IngestSettings, RunOptions};
pub use sink::PgBusinessSink;
pub use traits::{BusinessSink, PlacesSource};

use bizdir_core::{AppConfig, IngestGrid};
use sqlx::PgPool;

/// Run one ingestion against the live provider, writing to Postgres.
///
/// The Places key is checked before anything else, so a missing key means
/// no provider call and no write.
///
/// # Errors
///
/// Returns [`IngestError::Config`] if no Places API key is configured, or
/// [`IngestError::Places`] if the HTTP client cannot be built.
pub async fn run_places_ingest(
    config: &AppConfig,
    pool: &PgPool,
    grid: &IngestGrid,
) -> Result<IngestionSummary, IngestError> {
    let settings = IngestSettings::from_app_config(config)?;
    let client = settings.build_client()?;
    let sink = PgBusinessSink::new(pool.clone());

    IngestionRun::new(&client, &sink, settings.options)
        .execute(grid)
        .await
}
