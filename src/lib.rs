//! Deterministic net worth projection: normalizes a household's financial profile and
//! simulates income, expenses, investments and debt year by year.

pub mod api;
pub mod core;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. `RUST_LOG` overrides the `networth=info` default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("networth=info"));

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}
