//! Diagnostic logging on stderr.
//!
//! The level comes from the command line, and can be raised to `debug` later once the
//! configuration has been read. `RUST_LOG` always wins.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Environment variable that turns on debug logging.
pub const DEBUG_ENV: &str = "HEADER_GUARD_DEBUG";

struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

static LOGGING: OnceLock<Logging> = OnceLock::new();

/// Level for a verbosity count and debug switch.
#[must_use]
pub const fn level_for(verbose: u8, debug: bool) -> &'static str {
    if debug || verbose >= 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    }
}

/// Whether `HEADER_GUARD_DEBUG` asks for debug logging.
#[must_use]
pub fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV).is_ok_and(|value| !matches!(value.as_str(), "" | "0" | "false"))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbose: u8, debug: bool) {
    let level = level_for(verbose, debug || debug_from_env());
    let (filter, from_env) = EnvFilter::try_from_default_env()
        .map_or_else(|_| (EnvFilter::new(level), false), |filter| (filter, true));
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok();

    if installed {
        let _ = LOGGING.set(Logging { handle, from_env });
        tracing::debug!(level, "logging initialized");
    }
}

/// Switch to debug logging, unless `RUST_LOG` chose the filter.
pub fn enable_debug() {
    let Some(logging) = LOGGING.get() else {
        return;
    };
    if logging.from_env {
        return;
    }
    if logging.handle.reload(EnvFilter::new("debug")).is_ok() {
        tracing::debug!("debug logging enabled by configuration");
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
