use anyhow::anyhow;
use shopcart_core::config::{AppConfig, LoadOptions, LogFormat};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Events go to stderr so stdout stays machine-readable.
///
/// Falls back to default logging settings when the configuration does not load; the command
/// itself reports the configuration problem.
pub fn init(options: LoadOptions) -> anyhow::Result<()> {
    let config = AppConfig::load(options).unwrap_or_default();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.trim().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!(error))
}
