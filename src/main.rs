use anyhow::Context;
use clap::Parser;

use replframe::cli::Cli;
use replframe::config::{Config, ConfigStore};
use replframe::logging::init_tracing;
use replframe::runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let path = cli.config_path();

    let mut config = Config::load_from(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    cli.apply(&mut config);
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging.level);
    tracing::info!(config = %path.display(), "Starting console");

    runtime::run(ConfigStore::new(config, path)).await
}
