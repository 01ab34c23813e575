//! Shared mutable run state.
//!
//! The result collection, progress counters and the per-batch failure
//! buffer are the only shared mutable state in the system. Concurrent
//! aggregations all report through one `Mutex`-guarded struct behind
//! [`RunStateHandle`] — the single serialization point — so counts
//! cannot be corrupted and failure records cannot be lost. Consumers
//! get cloned snapshots, never references into the guarded data.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::progress::{Progress, RunStatus};
use crate::types::{CombinedProduct, FailureRecord};

#[derive(Debug, Default)]
struct RunState {
    progress: Progress,
    total_assigned: bool,
    products: Vec<CombinedProduct>,
    seen_ids: HashSet<u32>,
    batch_failures: Vec<FailureRecord>,
}

/// Cloneable handle to the shared run state. Mutators are called only
/// by the scheduler; snapshot reads are safe from anywhere.
#[derive(Debug, Clone, Default)]
pub struct RunStateHandle {
    inner: Arc<Mutex<RunState>>,
}

impl RunStateHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RunState> {
        self.inner.lock().expect("run state lock should not be poisoned")
    }

    /// Resets everything for a fresh run and raises the loading flag.
    pub fn begin_run(&self) {
        let mut state = self.lock();
        *state = RunState::default();
        state.progress.loading = true;
    }

    /// Records a successful catalog fetch: status `Pending → Success`
    /// and `total` assigned. `total` is set exactly once per run;
    /// later calls within the same run are ignored.
    pub fn mark_catalog_loaded(&self, total: usize) {
        let mut state = self.lock();
        state.progress.status = RunStatus::Success;
        if !state.total_assigned {
            state.progress.total = total;
            state.total_assigned = true;
        }
    }

    /// Records a fatal catalog-list failure: status `Fail`, loading
    /// cleared. No products were produced.
    pub fn mark_failed(&self) {
        let mut state = self.lock();
        state.progress.status = RunStatus::Fail;
        state.progress.loading = false;
    }

    /// Clears the failure buffer at the start of a processing unit.
    pub fn begin_batch(&self) {
        self.lock().batch_failures.clear();
    }

    pub fn record_failures(&self, failures: Vec<FailureRecord>) {
        if failures.is_empty() {
            return;
        }
        self.lock().batch_failures.extend(failures);
    }

    /// Appends a combined record as soon as it is ready (streaming
    /// append) and bumps `completed`. Records are identified by
    /// blueprint id; a duplicate id is dropped and does not advance the
    /// counter, which keeps `completed <= total`.
    pub fn append_product(&self, product: CombinedProduct) -> bool {
        let mut state = self.lock();
        if !state.seen_ids.insert(product.blueprint_id()) {
            tracing::warn!(
                blueprint = product.blueprint_id(),
                "duplicate combined record dropped"
            );
            return false;
        }
        state.products.push(product);
        state.progress.completed += 1;
        true
    }

    /// One elapsed-time tick (1-second resolution). Returns `false`
    /// once the run is no longer loading so the ticker task can exit.
    pub fn tick(&self) -> bool {
        let mut state = self.lock();
        if !state.progress.loading {
            return false;
        }
        state.progress.elapsed_secs += 1;
        true
    }

    /// Ends the run: loading cleared, final elapsed value retained.
    pub fn finish(&self) {
        self.lock().progress.loading = false;
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.lock().progress.clone()
    }

    #[must_use]
    pub fn products(&self) -> Vec<CombinedProduct> {
        self.lock().products.clone()
    }

    /// Failure records scoped to the most recent batch.
    #[must_use]
    pub fn last_failures(&self) -> Vec<FailureRecord> {
        self.lock().batch_failures.clone()
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
