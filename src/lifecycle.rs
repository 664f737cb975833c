//! Process lifecycle: logging setup and shutdown signalling.

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Initialize logging with tracing_subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is harmless.
pub fn init_logging(config: &TelemetryConfig) {
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => match EnvFilter::try_new(&config.log_level) {
            Ok(filter) => (filter, None),
            Err(err) => (EnvFilter::new("info"), Some(err)),
        },
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if let (true, Some(err)) = (installed, rejected) {
        tracing::warn!(
            "Invalid log level '{}' ({}), using 'info'",
            config.log_level,
            err
        );
    }
}

/// Cancels `token` on the first Ctrl-C.
pub fn cancel_on_ctrl_c(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    tracing::warn!("Interrupt received, finishing in-flight audits");
                    token.cancel();
                }
                Err(err) => tracing::error!("Unable to listen for Ctrl-C: {}", err),
            },
        }
    })
}
