use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leadsignal_common::Config;
use leadsignal_scout::search::GoogleSearcher;
use leadsignal_scout::store::SnapshotFile;
use leadsignal_scout::{Scout, SignalStore};

#[derive(Parser)]
#[command(name = "scout", about = "Run the lead signal queries once and store the results")]
struct Cli {
    /// Snapshot path, overriding SIGNALS_FILE
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the local snapshot only
    #[arg(long)]
    no_remote: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::from_default_env().add_directive("leadsignal=info".parse()?);
    if cli.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Lead signal scout starting...");

    let mut config = Config::from_env()?;
    if let Some(output) = cli.output {
        config.signals_file = output;
    }
    config.log_redacted();

    let store = if cli.no_remote {
        info!("Remote store disabled by --no-remote");
        SignalStore::new(SnapshotFile::new(&config.signals_file), None)
    } else {
        SignalStore::from_config(&config)
    };

    let scout = Scout::new(
        Arc::new(GoogleSearcher::from_config(&config)),
        Arc::new(store),
    );
    let stats = scout.run().await?;

    info!(path = %config.signals_file.display(), "Snapshot saved");
    println!("{stats}");
    Ok(())
}
