//! Save gate: at most one persistence request per saver in flight.

use std::sync::atomic::{AtomicBool, Ordering};

use rigcheck_builds::{Build, BuildRecord};
use rigcheck_core::AggregateRoot;

use crate::error::StoreError;
use crate::store::BuildStore;

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(BuildRecord),
    /// Another save was outstanding; this request was dropped, not queued.
    Skipped,
}

#[derive(Debug)]
pub struct AutoSaver<S> {
    store: S,
    in_flight: AtomicBool,
    preferred_merchant: Option<String>,
}

/// Clears the in-flight flag when the save completes, fails or is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: BuildStore> AutoSaver<S> {
    pub fn new(store: S, preferred_merchant: Option<String>) -> Self {
        Self {
            store,
            in_flight: AtomicBool::new(false),
            preferred_merchant,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Persist the build's flat record unless a save is already outstanding.
    pub async fn save(&self, build: &Build) -> Result<SaveOutcome, StoreError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(build = %build.id(), "save already in flight; request dropped");
            return Ok(SaveOutcome::Skipped);
        }
        let _guard = InFlight(&self.in_flight);

        let record = BuildRecord::from_build(build, self.preferred_merchant.as_deref());
        self.store.save(record.clone()).await?;
        tracing::info!(
            build = %record.id,
            parts = record.component_ids.len(),
            total_price = record.total_price,
            "build saved"
        );
        Ok(SaveOutcome::Saved(record))
    }
}
