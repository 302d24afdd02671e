//! Log setup
//!
//! Everything goes to stderr: stdout is reserved for the `name=value`
//! output fallback.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "HELMPACK_LOG";

/// Install the global subscriber
///
/// `--debug` forces the `debug` level; otherwise `HELMPACK_LOG` is used,
/// defaulting to `info`.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
