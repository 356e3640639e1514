//! Background job scheduler.
//!
//! When `BIZDIR_INGEST_CRON` is set, registers a recurring places ingestion
//! job. A tick that fires while the previous run is still going is skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::AppState;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process. Dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the cron expression is rejected, or the scheduler fails to start.
pub async fn build_scheduler(state: AppState) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    if let Some(cron) = state.config.ingest_cron.clone() {
        register_ingest_job(&scheduler, &cron, state).await?;
    } else {
        tracing::info!("BIZDIR_INGEST_CRON not set; scheduled ingestion disabled");
    }

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_ingest_job(
    scheduler: &JobScheduler,
    cron: &str,
    state: AppState,
) -> Result<(), JobSchedulerError> {
    let state = Arc::new(state);
    let running = Arc::new(AtomicBool::new(false));

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let state = Arc::clone(&state);
        let running = Arc::clone(&running);

        Box::pin(async move {
            let Some(_guard) = RunGuard::acquire(&running) else {
                tracing::warn!("scheduler: previous places ingestion still running; skipping tick");
                return;
            };

            tracing::info!("scheduler: starting places ingestion");
            match bizdir_ingest::run_places_ingest(&state.config, &state.pool, &state.grid).await
            {
                Ok(summary) => tracing::info!(
                    total_imported = summary.total_imported,
                    failed_cells = summary.failed_cells(),
                    "scheduler: {}",
                    summary.message()
                ),
                Err(e) => tracing::error!(error = %e, "scheduler: places ingestion failed"),
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(cron, "scheduler: places ingestion job registered");
    Ok(())
}

/// Marks a run in progress; cleared on drop.
struct RunGuard {
    flag: Arc<AtomicBool>,
}

impl RunGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
