//! Diagnostic tracing for emtrack.
//!
//! Diagnostics go to stderr so they never mix with tables printed on
//! stdout. `RUST_LOG` takes precedence over `--debug`.

use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

fn default_filter(debug: bool) -> &'static str {
    if debug { "emtrack=debug" } else { "emtrack=warn" }
}

pub fn init_tracing(debug: bool) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| AppError::Config(format!("cannot initialize tracing: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_the_level() {
        assert_eq!(default_filter(false), "emtrack=warn");
        assert_eq!(default_filter(true), "emtrack=debug");
    }
}
