//! In-memory [`BusinessSink`] for dry runs and tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bizdir_core::{BusinessRecord, ConflictPolicy};
use bizdir_db::UpsertOutcome;

use crate::traits::BusinessSink;
use crate::IngestError;

/// Keeps records in a `Vec`, deduplicated on `(name, address)` with the
/// same conflict semantics as the `businesses` table.
#[derive(Debug, Default)]
pub struct MemoryBusinessSink {
    rows: Mutex<Vec<BusinessRecord>>,
    writes: AtomicUsize,
}

impl MemoryBusinessSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records in insertion order.
    #[must_use]
    pub fn records(&self) -> Vec<BusinessRecord> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of upsert calls received, including ignored ones.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BusinessRecord>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, record: &BusinessRecord, policy: ConflictPolicy) -> UpsertOutcome {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.lock();

        let position = rows
            .iter()
            .position(|row| row.natural_key() == record.natural_key());

        match (position, policy) {
            (None, _) => {
                rows.push(record.clone());
                UpsertOutcome::Inserted
            }
            (Some(_), ConflictPolicy::Ignore) => UpsertOutcome::Ignored,
            (Some(index), ConflictPolicy::Update) => {
                let created_at = rows[index].created_at;
                rows[index] = BusinessRecord {
                    created_at,
                    ..record.clone()
                };
                UpsertOutcome::Updated
            }
        }
    }
}

impl BusinessSink for MemoryBusinessSink {
    async fn upsert(
        &self,
        record: &BusinessRecord,
        policy: ConflictPolicy,
    ) -> Result<UpsertOutcome, IngestError> {
        Ok(self.apply(record, policy))
    }
}
