use cid_enrich::app::{handle_fatal_error, init_logging, AppConfig, FileConfig};
use cid_enrich::runner::{print_banner, Runner};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Rewrite dataset image IDs from metadata CIDs to image CIDs
#[derive(Parser)]
#[command(name = "cid-enrich")]
#[command(
    about = "Resolve each record's IPFS metadata and save a dataset with the real image CIDs",
    long_about = None
)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Dataset to read (.json array or dataset module); defaults to the embedded dataset
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the updated dataset (default: nftDatas-updated.ts)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gateway URL template, `{cid}` is replaced by the identifier
    #[arg(long)]
    gateway: Option<String>,

    /// Delay after each record in milliseconds (default: 100)
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_logging(&AppConfig::new(verbose));

    let config = match build_config(cli) {
        Ok(config) => config,
        Err(e) => handle_fatal_error(e, verbose),
    };
    debug!("Resolved configuration: {:?}", config);

    print_banner();
    let result = match Runner::from_config(config) {
        Ok(runner) => runner.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        handle_fatal_error(e, verbose);
    }
}

fn build_config(cli: Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::new(cli.verbose);

    if let Some(path) = &cli.config {
        config = config.merge_file(FileConfig::load(path)?);
    }
    if let Some(gateway) = cli.gateway {
        config = config.with_gateway(gateway);
    }
    if let Some(input) = cli.input {
        config = config.with_input(input);
    }
    if let Some(output) = cli.output {
        config = config.with_output(output);
    }
    if let Some(delay_ms) = cli.delay_ms {
        config = config.with_pacing(Duration::from_millis(delay_ms));
    }

    Ok(config)
}
