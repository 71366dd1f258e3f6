// crates/vanity/src/logging.rs

use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events are shown with `--verbose`.
const VERBOSE_FILTER: &str = "vanity=debug,load_package=debug,get_vcs_root=debug";

/// Logs go to stderr so stdout stays clean for generated HTML.
///
/// `RUST_LOG` wins over the `--verbose` default.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}
