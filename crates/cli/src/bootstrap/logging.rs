use dnsdig_domain::{Config, LogFormat};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries dig results only.
///
/// `RUST_LOG`, when set, replaces the configured directives.
pub fn init_logging(config: &Config) {
    let directives = config.logging.directives();
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => match EnvFilter::try_new(&directives) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new("info"), Some(e)),
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    if let Some(e) = rejected {
        warn!(directives = %directives, error = %e, "Invalid log filter, falling back to info");
    }
    info!(
        directives = %directives,
        format = %config.logging.format,
        "Logging initialized"
    );
}
