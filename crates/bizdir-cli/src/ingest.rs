//! `ingest` command: one places ingestion run from the terminal.

use anyhow::Context;
use bizdir_core::{AppConfig, IngestGrid};
use bizdir_ingest::{
    IngestSettings, IngestionRun, IngestionSummary, MemoryBusinessSink, PgBusinessSink,
    RunOptions,
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct IngestArgs {
    /// Restrict the run to this city (repeatable)
    #[arg(long = "city")]
    pub cities: Vec<String>,

    /// Restrict the run to this provider place type (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Skip the per-place details lookup (no website or phone)
    #[arg(long)]
    pub no_details: bool,

    /// Fetch only the first page of results per cell
    #[arg(long)]
    pub no_pagination: bool,

    /// Collect into memory and print the summary without writing to the database
    #[arg(long)]
    pub dry_run: bool,
}

impl IngestArgs {
    fn apply(&self, options: &mut RunOptions) {
        if self.no_details {
            options.details = false;
        }
        if self.no_pagination {
            options.pagination = false;
        }
    }
}

fn load_grid(config: &AppConfig, args: &IngestArgs) -> anyhow::Result<IngestGrid> {
    let grid = match &config.grid_path {
        Some(path) => bizdir_core::load_grid(path)
            .with_context(|| format!("failed to load grid from {}", path.display()))?,
        None => bizdir_core::default_grid(),
    };
    Ok(grid.restrict(&args.cities, &args.categories)?)
}

/// Run one ingestion and print its summary as JSON.
///
/// # Errors
///
/// Returns an error if the grid filters name an unknown city or category,
/// no Places API key is configured, or the database is unreachable.
pub(crate) async fn run_ingest(config: &AppConfig, args: &IngestArgs) -> anyhow::Result<()> {
    let grid = load_grid(config, args)?;
    let mut settings = IngestSettings::from_app_config(config)?;
    args.apply(&mut settings.options);
    let client = settings.build_client()?;

    let summary: IngestionSummary = if args.dry_run {
        let sink = MemoryBusinessSink::new();
        let summary = IngestionRun::new(&client, &sink, settings.options)
            .execute(&grid)
            .await?;
        tracing::info!(unique_records = sink.len(), "dry run complete; nothing written");
        summary
    } else {
        let pool = crate::connect(config).await?;
        let sink = PgBusinessSink::new(pool);
        IngestionRun::new(&client, &sink, settings.options)
            .execute(&grid)
            .await?
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
