use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "podcat")]
#[command(about = "Print-on-demand catalog aggregation client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate the full catalog with batched, rate-limited fetches
    Run {
        /// Override the configured batch size (1 = sequential mode)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Process at most N catalog entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Aggregate a single blueprint and print its combined record
    Blueprint {
        /// Blueprint id from the catalog
        id: u32,
    },
    /// Dump the global print-provider list as JSON
    Providers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = podcat_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { batch_size, limit } => commands::run(&config, batch_size, limit).await,
        Commands::Blueprint { id } => commands::blueprint(&config, id).await,
        Commands::Providers => commands::providers(&config).await,
    }
}
