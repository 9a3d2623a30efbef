//! Diagnostic logging setup.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "THROWSCAN_LOG";

static INIT: Once = Once::new();

/// Default filter directive for the given verbosity.
pub fn default_directive(quiet: bool) -> &'static str {
    if quiet {
        "throwscan=warn"
    } else {
        "throwscan=info"
    }
}

/// Initialize the tracing subscriber. Diagnostics go to stderr, colored
/// only when stderr is a terminal.
///
/// `THROWSCAN_LOG` overrides the default level, e.g.
/// `THROWSCAN_LOG=throwscan::scan=debug`. Safe to call more than once.
pub fn init_logging(quiet: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false),
            )
            .with(filter)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "throwscan=info");
        assert_eq!(default_directive(true), "throwscan=warn");
    }
}
