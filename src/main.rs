use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use reploit::cli::{parse_args, run_ask, run_chat, run_cli_command, run_health, run_index, CliCommand};
use reploit::config::ClientConfig;

/// Log filter used when RUST_LOG is unset.
const DEFAULT_LOG_FILTER: &str = "reploit=warn";

/// Logs go to stderr so they never interleave with the transcript.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Handle --version, --help and bad arguments before any initialization
    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(&command) {
        return result;
    }

    color_eyre::install()?;
    init_tracing();

    let config = ClientConfig::from_env();
    tracing::debug!("Using backend at {}", config.api_url);

    let runtime = tokio::runtime::Runtime::new()?;
    let succeeded = runtime.block_on(async move {
        match command {
            CliCommand::Chat => run_chat(config).await.map(|()| true),
            CliCommand::Ask(question) => run_ask(config, &question).await,
            CliCommand::Health => run_health(config).await,
            CliCommand::Index(repo_url) => run_index(config, &repo_url).await,
            CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_) => Ok(true),
        }
    });
    // A chat left at the prompt still has a blocking stdin read in flight
    runtime.shutdown_background();
    let succeeded = succeeded?;

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
