//! Aggregation orchestrator for the print-on-demand catalog.
//!
//! Coordinates many independent, rate-limited, partially-failing
//! network calls into one combined record per blueprint: bounded
//! concurrency per batch, a two-strikes circuit breaker across batches,
//! per-provider failure isolation, and live progress accounting.

pub mod blueprint;
pub mod enrich;
pub mod error;
pub mod policy;
pub mod progress;
pub mod scheduler;
pub mod state;
pub mod types;

pub use blueprint::{aggregate_blueprint, BlueprintOutcome};
pub use error::AggregateError;
pub use progress::{Progress, RunStatus};
pub use scheduler::{run_aggregation, RunSummary};
pub use state::RunStateHandle;
pub use types::{CombinedProduct, FailureRecord};
