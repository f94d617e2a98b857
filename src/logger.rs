use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Quiet runs only surface problems
/// such as dirty qubits; `--verbose` shows section starts and every
/// allocation and measurement.
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "qtour=debug" } else { "qtour=warn" }
}

/// Installs the global subscriber for the `qtour` binary.
///
/// Events go to stderr without timestamps, so stdout carries only the tour
/// itself and can be redirected or diffed.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(verbose)
                .with_level(true)
                .compact(),
        )
        .init();
}
