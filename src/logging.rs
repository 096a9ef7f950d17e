//! Console logging init.
//!
//! `tracing` events go to stderr; stdout is reserved for the run summary.
//! The persistent log file is not a subscriber concern, see
//! [`RunLog`](crate::run_log::RunLog).

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Install the global `fmt` subscriber. `verbose` raises this crate to debug.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,nasa_iotd=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
