use clap::Parser;

use seo_audit::config::AppConfig;
use seo_audit::lifecycle;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    lifecycle::init_logging(&config.telemetry);

    let cli = cli::Cli::parse();
    cli::run(cli, config).await
}
