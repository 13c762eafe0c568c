//! Tracing setup.
//!
//! Logs go to stderr with a compact formatter so stdout stays free for the
//! run summary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// - Respects `RUST_LOG` when set.
/// - Otherwise defaults to `info`, or `debug` for the workspace crates when
///   `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,gazette_cli=debug,gazette_extractor=debug,gazette_editor=debug,gazette_llm=debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        for verbose in [false, true] {
            assert!(default_directive(verbose).parse::<EnvFilter>().is_ok());
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false);
        init_tracing(true);
    }
}
