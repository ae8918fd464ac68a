// ABOUTME: Tracing subscriber setup for the academy binary
// ABOUTME: RUST_LOG filter with an info default, debug when verbose

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false) // Don't show module paths in logs
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
