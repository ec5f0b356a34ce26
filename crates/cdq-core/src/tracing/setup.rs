//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "CDQ_LOG";

/// Initialize the cdq tracing/logging system.
///
/// Reads `CDQ_LOG` for per-crate log levels.
/// Format: `CDQ_LOG=cdq_analysis=debug,cdq_core=warn`
///
/// Falls back to `cdq=info` if `CDQ_LOG` is not set or is invalid.
///
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("cdq=info"));

        // try_init: a host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
