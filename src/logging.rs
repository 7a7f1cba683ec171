use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over the computed default.
pub fn init(settings: &Settings) {
    let default_level = if settings.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},sqlx=warn")));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if settings.is_development() {
        builder.compact().without_time().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = result {
        eprintln!("tracing subscriber already installed: {err}");
    }
}
