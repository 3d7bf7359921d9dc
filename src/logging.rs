use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber for the command line tools. `RUST_LOG` wins
/// when set; otherwise `warn`, or `debug` with `verbose`. Safe to call more
/// than once.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "questionbank=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
