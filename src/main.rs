use std::process::ExitCode;

use addrscout::config::{Cli, Config};
use addrscout::fetcher::HttpFetcher;
use addrscout::logging::init_logging;
use addrscout::orchestrator::{Orchestrator, RunSummary, TokioPacer};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env before clap reads the ADDRSCOUT_* fallbacks
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let config = Config::from_cli(cli)?;
    let fetcher = HttpFetcher::from_config(&config)?;

    let mut orchestrator = Orchestrator::new(config, fetcher, TokioPacer, std::io::stdout());
    orchestrator.run().await
}
