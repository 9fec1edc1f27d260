use clap::Parser;
use std::process::ExitCode;

use nasa_apod_mcp::cli::{run_commands, Cli};
use nasa_apod_mcp::infra;
use nasa_apod_mcp::infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    infra::logging::init();

    let cli = Cli::parse();
    if let Some(command) = cli.command {
        return Ok(run_commands(command).await);
    }

    let cfg = AppConfig::init()?;
    infra::boot::run_server(cfg).await?;
    Ok(ExitCode::SUCCESS)
}
