use dnsdig_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called after logging is up, the config decides the log level.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        workers = config.dispatcher.workers,
        queue_capacity = config.dispatcher.effective_queue_capacity(),
        upstream = %config.resolver.upstream,
        timeout_ms = config.resolver.timeout_ms,
        record_types = config.resolver.record_types.len(),
        database = %config.database.path,
        cache = config.cache.enabled,
        "Configuration loaded"
    );
}
