use capability_router::config::LoggingConfig;
use env_logger::Env;

/// `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(config.level.as_str()))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}
