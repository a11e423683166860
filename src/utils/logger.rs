use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialises the tracing subscriber once per process.
///
/// Honors `RUST_LOG` when set, defaults to `debug` otherwise. Safe to call
/// from every test.
pub fn setup_logger() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .init();
    });
}
