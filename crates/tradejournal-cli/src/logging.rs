use std::env;

use tracing_subscriber::EnvFilter;
use tradejournal_core::JournalConfig;

const FALLBACK_FILTER: &str = "warn";

/// Installs the stderr subscriber.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then the config file.
pub fn init(cli_filter: Option<&str>, config: &JournalConfig) {
    let directive = cli_filter
        .map(str::to_owned)
        .or_else(|| env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| config.log_filter().to_owned());

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("warning: ignoring invalid log filter '{directive}': {err}");
        EnvFilter::new(FALLBACK_FILTER)
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
