//! Observability for meta resolution
//!
//! Structured logging through `tracing`:
//! - Every line names an [`Event`] in its `event` field
//! - Definition and registration are logged synchronously, where they happen
//! - Logging has no effect on resolution results
//!
//! # Usage
//!
//! ```ignore
//! use meta_inherit::observability::{self, Event};
//!
//! observability::init_logging(false);
//! tracing::info!(event = %Event::ManifestLoaded, classes = 4, "manifest loaded");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr subscriber honoring `RUST_LOG`.
///
/// Without `RUST_LOG` the level is `warn`, or `debug` when `verbose`.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();
}
