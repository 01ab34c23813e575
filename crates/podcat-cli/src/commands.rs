//! Command handlers for the CLI.
//!
//! The presentation here is deliberately passive: it renders whatever
//! the orchestrator produced (including partial results after a
//! circuit-breaker halt) and never mutates the live run state it reads.

use std::time::Duration;

use serde_json::json;

use podcat_aggregate::{aggregate_blueprint, run_aggregation, RunStateHandle};
use podcat_catalog::{Blueprint, CatalogClient};
use podcat_core::AppConfig;

/// Run the full catalog aggregation and print a JSON run report.
///
/// A progress logger tails the live run state once per second while the
/// run is loading. Partial results are reported even when the circuit
/// breaker halted the run early.
pub async fn run(
    config: &AppConfig,
    batch_size: Option<usize>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(size) = batch_size {
        config.batch_size = size.max(1);
    }
    if let Some(limit) = limit {
        config.catalog_limit = limit;
    }

    let client = CatalogClient::new(&config)?;
    let state = RunStateHandle::new();

    let progress_state = state.clone();
    let progress_logger = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let progress = progress_state.progress();
            if !progress.loading {
                break;
            }
            tracing::info!(
                completed = progress.completed,
                total = progress.total,
                elapsed_secs = progress.elapsed_secs,
                "aggregation progress"
            );
        }
    });

    let result = run_aggregation(&client, &config, &state).await;
    progress_logger.abort();
    let summary = result?;

    if summary.halted_early {
        tracing::warn!(
            completed = summary.completed,
            total = summary.total,
            "run halted early by the circuit breaker; partial results follow"
        );
    }

    let report = json!({
        "summary": summary,
        "last_batch_failures": state.last_failures(),
        "products": state.products(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Aggregate a single blueprint and print its combined record.
///
/// There is no catalog list here, so the list-level entry is
/// synthesized from the id alone; its title is a stand-in, not catalog
/// data. Only the id feeds the aggregation, and the printed record's
/// detail comes from the detail fetch (or the partial-product default).
pub async fn blueprint(config: &AppConfig, id: u32) -> anyhow::Result<()> {
    let client = CatalogClient::new(config)?;
    let entry = Blueprint {
        id,
        title: format!("Blueprint {id}"),
        description: None,
        brand: None,
        model: None,
        images: Vec::new(),
    };

    let outcome = aggregate_blueprint(&client, &entry).await;
    let report = json!({
        "product": outcome.product,
        "failures": outcome.failures,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Dump the global print-provider list.
pub async fn providers(config: &AppConfig) -> anyhow::Result<()> {
    let client = CatalogClient::new(config)?;
    let providers = client.list_print_providers().await?;
    tracing::info!(count = providers.len(), "fetched global provider list");
    println!("{}", serde_json::to_string_pretty(&providers)?);
    Ok(())
}
