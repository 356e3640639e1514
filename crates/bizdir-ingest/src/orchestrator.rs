//! One sweep of the ingestion grid.
//!
//! Cells are visited strictly in grid order. Within a cell the paginator runs
//! to completion first, then every hit is enriched and written in order.
//! Failures never escape their scope: a failed page ends that cell, a failed
//! details lookup or write affects only that hit.

use bizdir_core::{GridCell, IngestGrid};
use bizdir_db::UpsertOutcome;
use bizdir_places::NearbyQuery;
use serde::Serialize;
use tracing::Instrument;

use crate::enrich::enrich_hit;
use crate::paginate::fetch_all_pages;
use crate::settings::RunOptions;
use crate::traits::{BusinessSink, PlacesSource};
use crate::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
}

/// What happened in one grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellOutcome {
    pub city: String,
    pub category: String,
    pub pages_fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub ignored: usize,
    pub failed_writes: usize,
    /// Hits dropped before enrichment because their name was blank.
    pub skipped_hits: usize,
    /// Set when pagination stopped on a provider error.
    pub error: Option<String>,
    pub message: String,
}

impl CellOutcome {
    fn new(cell: &GridCell) -> Self {
        Self {
            city: cell.city.name.clone(),
            category: cell.category.tag.clone(),
            ..Self::default()
        }
    }

    /// Writes the store accepted, whether they inserted, updated or were
    /// ignored as duplicates.
    #[must_use]
    pub fn imported(&self) -> usize {
        self.inserted + self.updated + self.ignored
    }

    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Ignored => self.ignored += 1,
        }
    }
}

/// Result of a completed run. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub total_imported: usize,
    /// One message per cell, in visitation order.
    pub details: Vec<String>,
    pub cells: Vec<CellOutcome>,
}

impl IngestionSummary {
    #[must_use]
    pub fn message(&self) -> String {
        format!("Successfully imported {} places", self.total_imported)
    }

    #[must_use]
    pub fn failed_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.error.is_some()).count()
    }

    fn push(&mut self, cell: CellOutcome) {
        self.total_imported += cell.imported();
        self.details.push(cell.message.clone());
        self.cells.push(cell);
    }
}

/// A single ingestion run over a grid.
pub struct IngestionRun<'a, S, K> {
    source: &'a S,
    sink: &'a K,
    options: RunOptions,
    state: RunState,
}

impl<'a, S: PlacesSource, K: BusinessSink> IngestionRun<'a, S, K> {
    #[must_use]
    pub fn new(source: &'a S, sink: &'a K, options: RunOptions) -> Self {
        Self {
            source,
            sink,
            options,
            state: RunState::NotStarted,
        }
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Visit every cell of `grid` and return the summary.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::AlreadyStarted`] if this run has been executed
    /// before. Cell and hit failures are reported in the summary, not here.
    pub async fn execute(&mut self, grid: &IngestGrid) -> Result<IngestionSummary, IngestError> {
        if self.state != RunState::NotStarted {
            return Err(IngestError::AlreadyStarted);
        }
        self.state = RunState::Running;

        let cells = grid.cells();
        tracing::info!(
            cells = cells.len(),
            pagination = self.options.pagination,
            details = self.options.details,
            conflict_policy = %self.options.conflict_policy,
            "starting places ingestion"
        );

        let mut summary = IngestionSummary::default();
        for cell in &cells {
            let span = tracing::info_span!(
                "ingest_cell",
                city = %cell.city.name,
                category = %cell.category.tag
            );
            let outcome = self.run_cell(cell).instrument(span).await;
            summary.push(outcome);
        }

        self.state = RunState::Completed;
        tracing::info!(
            total_imported = summary.total_imported,
            failed_cells = summary.failed_cells(),
            "places ingestion finished"
        );
        Ok(summary)
    }

    async fn run_cell(&self, cell: &GridCell) -> CellOutcome {
        let mut outcome = CellOutcome::new(cell);
        let query = NearbyQuery {
            lat: cell.city.lat,
            lng: cell.city.lng,
            radius_m: self.options.radius_meters,
            place_type: cell.category.tag.clone(),
        };

        let fetched = fetch_all_pages(
            self.source,
            &query,
            self.options.page_delay,
            self.options.pagination,
        )
        .await;
        outcome.pages_fetched = fetched.pages_fetched;

        for hit in &fetched.hits {
            if hit.name.trim().is_empty() {
                outcome.skipped_hits += 1;
                tracing::warn!(place_id = %hit.place_id, "skipping hit without a name");
                continue;
            }

            let record = enrich_hit(self.source, hit, cell, &self.options).await;
            match self.sink.upsert(&record, self.options.conflict_policy).await {
                Ok(result) => {
                    tracing::debug!(name = %record.name, outcome = ?result, "stored business");
                    outcome.record(result);
                }
                Err(e) => {
                    outcome.failed_writes += 1;
                    tracing::warn!(name = %record.name, error = %e, "failed to store business");
                }
            }
        }

        let tag = &cell.category.tag;
        let city = &cell.city.name;
        outcome.message = match fetched.error {
            Some(e) => {
                tracing::error!(error = %e, pages = outcome.pages_fetched, "cell failed");
                let message = format!("Failed to import {tag} places in {city}: {e}");
                outcome.error = Some(e.to_string());
                message
            }
            None => {
                tracing::info!(
                    imported = outcome.imported(),
                    pages = outcome.pages_fetched,
                    "cell imported"
                );
                format!("Imported {} {tag} places in {city}", outcome.imported())
            }
        };

        outcome
    }
}
