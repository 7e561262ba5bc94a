use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "ACTIONKIT_LOG";

/// Installs the global stderr subscriber. `ACTIONKIT_LOG` wins over
/// `default_level`; an unparsable filter falls back to `warn`. Calling it a
/// second time is a no-op.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
