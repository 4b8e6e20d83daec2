//! Diagnostic log output.
//!
//! Engine events are traced with `tracing`; the CLI installs a plain `fmt`
//! subscriber on stderr so logs never mix with the game display on stdout.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";
pub const VERBOSE_FILTER: &str = "info,fivedraw_engine=debug,fivedraw_cli=debug";

/// Filter directives: `RUST_LOG` wins, then `--verbose`, then the default.
pub fn filter_directives(verbose: bool) -> String {
    match std::env::var("RUST_LOG") {
        Ok(v) if !v.is_empty() => v,
        _ if verbose => VERBOSE_FILTER.to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global subscriber. Later calls are no-ops, so tests and
/// repeated `run` invocations in one process are safe.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_new(filter_directives(verbose))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
