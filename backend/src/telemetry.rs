//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber using `directives` (an `EnvFilter` string,
/// e.g. `backend=debug,dash_engine=info`). Falls back to `info` when the
/// directive does not parse. Safe to call more than once.
pub fn init_tracing(directives: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .init();
    });
}
