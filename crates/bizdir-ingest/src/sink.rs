//! Postgres-backed [`BusinessSink`].

use bizdir_core::{BusinessRecord, ConflictPolicy};
use bizdir_db::UpsertOutcome;
use sqlx::PgPool;

use crate::traits::BusinessSink;
use crate::IngestError;

/// Writes records to the `businesses` table, one statement per record.
#[derive(Debug, Clone)]
pub struct PgBusinessSink {
    pool: PgPool,
}

impl PgBusinessSink {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BusinessSink for PgBusinessSink {
    async fn upsert(
        &self,
        record: &BusinessRecord,
        policy: ConflictPolicy,
    ) -> Result<UpsertOutcome, IngestError> {
        Ok(bizdir_db::upsert_business(&self.pool, record, policy).await?)
    }
}
