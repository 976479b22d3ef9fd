use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. Warnings and errors go to stderr so the
/// delimited output on stdout stays clean when the tool is piped.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
