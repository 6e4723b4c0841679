//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "marketlens=info,warn";

/// Installs the global subscriber: `RUST_LOG` if set, otherwise
/// [`DEFAULT_FILTER`], raised to debug when `verbose`. Output goes to stderr
/// so stdout stays clean for results.
///
/// A second call is a no-op.
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("marketlens=debug,warn")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
