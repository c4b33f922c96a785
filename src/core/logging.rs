use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::LogConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter comes from `LOG_LVL`.
pub fn init(config: &LogConfig) {
    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(tracing_subscriber::fmt::layer().with_ansi(true))
        .init();
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config.level.as_filter().into())
}
