#[path = "caprouter/args.rs"]
mod args;
#[path = "caprouter/commands.rs"]
mod commands;
#[path = "caprouter/logging.rs"]
mod logging;

use capability_router::{Router, RouterConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = args::CliArgs::parse();
    let path = match args.config.clone() {
        Some(path) => path,
        None => RouterConfig::default_path()?,
    };
    let config = RouterConfig::load(&path)?;
    logging::init_logging(&config.logging)?;
    log::debug!("configuration loaded from {}", path.display());

    let router = Router::from_config(&config)?;
    commands::run(&router, args.command, args.json).await
}
