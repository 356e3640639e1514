use bizdir_core::ConfigError;
use bizdir_db::DbError;
use bizdir_places::PlacesError;
use thiserror::Error;

/// Errors that abort an ingestion run, or that a sink reports for a single
/// write.
///
/// Cell-scoped and hit-scoped failures never surface as `Err` from a run;
/// they are recorded in the summary instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("places client error: {0}")]
    Places(#[from] PlacesError),

    #[error("store error: {0}")]
    Store(#[from] DbError),

    #[error("ingestion run already started")]
    AlreadyStarted,
}
