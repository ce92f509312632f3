use crate::error::{EcoError, Result};
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset.
pub fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the verbosity flags.
pub fn init(verbose: u8, quiet: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = default_level(verbose, quiet);
            EnvFilter::try_new(level)
                .map_err(|e| EcoError::Logging(format!("invalid log level '{level}': {e}")))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| EcoError::Logging(e.to_string()))
}
