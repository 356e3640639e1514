pub mod app_config;
pub mod business;
pub mod config;
pub mod grid;

pub use app_config::{AppConfig, ConflictPolicy, Environment};
pub use business::BusinessRecord;
pub use config::{load_app_config, load_app_config_from_env};
pub use grid::{default_grid, load_grid, City, GridCell, IngestGrid, PlaceCategory};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read grid file {path}: {source}")]
    GridFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse grid file: {0}")]
    GridFileParse(#[from] serde_yaml::Error),

    #[error("grid validation failed: {0}")]
    Validation(String),
}
