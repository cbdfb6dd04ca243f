use tracing_subscriber::EnvFilter;

/// Installs the stderr tracing subscriber. Defaults to `warn` so routine
/// runs stay quiet; RUST_LOG overrides it. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
