use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "PAYOFF_LOG";

/// Install a stderr subscriber so diagnostics never mix with stdout output.
///
/// `PAYOFF_LOG` takes a filter directive (`debug`, `payoff_core=trace`);
/// `--verbose` raises the default from `warn` to `debug`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
