//! Batch/throughput scheduling.
//!
//! Partitions the catalog into fixed-size batches, runs one batch's
//! aggregations concurrently, waits for the batch to drain before
//! starting the next, and paces between batches to respect the
//! upstream rate ceiling. A two-strikes circuit breaker stops
//! scheduling after a second failure-bearing batch; already-produced
//! records are retained.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use podcat_catalog::CatalogClient;
use podcat_core::AppConfig;

use crate::blueprint::aggregate_blueprint;
use crate::error::AggregateError;
use crate::state::RunStateHandle;

/// Outcome of a completed (or halted) aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub completed: usize,
    pub halted_early: bool,
    pub elapsed_secs: u64,
}

/// Circuit-breaker decision after a batch drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakerDecision {
    Continue,
    Halt,
}

/// Two-strikes halt policy across batches.
///
/// The first failure-bearing batch sets a persistent flag and
/// processing continues (one extra allowance); any later
/// failure-bearing batch halts scheduling after that batch. A clean
/// batch neither resets nor consumes the flag.
#[derive(Debug, Default)]
struct CircuitBreaker {
    grace_used: bool,
}

impl CircuitBreaker {
    fn record_batch(&mut self, failure_count: usize) -> BreakerDecision {
        if failure_count == 0 {
            return BreakerDecision::Continue;
        }
        if self.grace_used {
            BreakerDecision::Halt
        } else {
            self.grace_used = true;
            BreakerDecision::Continue
        }
    }
}

/// Runs the full catalog aggregation.
///
/// The catalog list is fetched exactly once; its failure is the only
/// fatal path (status set to `Fail`, loading cleared, no records
/// produced). Everything after that point degrades or halts without
/// erroring. Combined records are appended to `state` as soon as each
/// aggregation completes, so progress advances mid-batch.
///
/// # Errors
///
/// Returns [`AggregateError::CatalogList`] if the catalog list fetch
/// fails.
pub async fn run_aggregation(
    client: &CatalogClient,
    config: &AppConfig,
    state: &RunStateHandle,
) -> Result<RunSummary, AggregateError> {
    state.begin_run();

    // 1-second elapsed ticker; exits on its own once loading clears.
    let ticker_state = state.clone();
    let ticker = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if !ticker_state.tick() {
                break;
            }
        }
    });

    // The config boundary rejects a zero batch size, but the field is
    // public; clamp here so `chunks` can never panic.
    let batch_size = config.batch_size.max(1);

    let mut catalog = match client.list_blueprints().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "catalog list fetch failed; aborting run");
            state.mark_failed();
            ticker.abort();
            return Err(AggregateError::CatalogList(e));
        }
    };
    if config.catalog_limit > 0 {
        catalog.truncate(config.catalog_limit);
    }
    state.mark_catalog_loaded(catalog.len());
    tracing::info!(
        total = catalog.len(),
        batch_size,
        "catalog loaded; starting aggregation"
    );

    // Sequential mode (batch_size == 1) paces per item; batch mode
    // paces between batches. Neither sleeps before the first unit.
    let pacing = if batch_size == 1 {
        Duration::from_millis(config.sequential_delay_ms)
    } else {
        Duration::from_millis(config.inter_batch_delay_ms)
    };

    let mut breaker = CircuitBreaker::default();
    let mut halted_early = false;

    for (index, batch) in catalog.chunks(batch_size).enumerate() {
        if index > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }

        state.begin_batch();

        // All aggregations in the batch run concurrently; each outcome
        // is recorded as soon as it completes. The stream fully drains
        // before the next batch starts (bulk synchronization barrier).
        // Collected into a Vec (futures are inert until polled) so the
        // stream type carries no closure; a `map` closure here trips
        // rustc's auto-trait check when the run is `tokio::spawn`ed
        // (rust-lang/rust#102211).
        let batch_futures: Vec<_> = batch
            .iter()
            .map(|entry| aggregate_blueprint(client, entry))
            .collect();
        let mut outcomes = stream::iter(batch_futures).buffer_unordered(batch_size);

        while let Some(outcome) = outcomes.next().await {
            state.record_failures(outcome.failures);
            state.append_product(outcome.product);
        }

        let failure_count = state.last_failures().len();
        tracing::info!(
            batch = index,
            size = batch.len(),
            failures = failure_count,
            completed = state.progress().completed,
            "batch drained"
        );

        if breaker.record_batch(failure_count) == BreakerDecision::Halt {
            tracing::warn!(
                batch = index,
                failures = failure_count,
                "second failure-bearing batch; halting further scheduling"
            );
            halted_early = true;
            break;
        }
    }

    state.finish();
    ticker.abort();

    let progress = state.progress();
    Ok(RunSummary {
        total: progress.total,
        completed: progress.completed,
        halted_early,
        elapsed_secs: progress.elapsed_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_batches_never_trip_the_breaker() {
        let mut breaker = CircuitBreaker::default();
        for _ in 0..10 {
            assert_eq!(breaker.record_batch(0), BreakerDecision::Continue);
        }
    }

    #[test]
    fn first_failing_batch_uses_the_grace_allowance() {
        let mut breaker = CircuitBreaker::default();
        assert_eq!(breaker.record_batch(3), BreakerDecision::Continue);
        assert_eq!(breaker.record_batch(0), BreakerDecision::Continue);
    }

    #[test]
    fn second_failing_batch_halts_even_after_clean_batches() {
        let mut breaker = CircuitBreaker::default();
        assert_eq!(breaker.record_batch(1), BreakerDecision::Continue);
        // Clean batches neither reset nor consume the flag.
        assert_eq!(breaker.record_batch(0), BreakerDecision::Continue);
        assert_eq!(breaker.record_batch(0), BreakerDecision::Continue);
        assert_eq!(breaker.record_batch(2), BreakerDecision::Halt);
    }

    #[test]
    fn consecutive_failing_batches_halt_on_the_second() {
        let mut breaker = CircuitBreaker::default();
        assert_eq!(breaker.record_batch(1), BreakerDecision::Continue);
        assert_eq!(breaker.record_batch(1), BreakerDecision::Halt);
    }
}
