//! Tracing subscriber setup for the `securepass` binary.
//!
//! Log output goes to stderr so it never mixes with passwords or
//! tables printed on stdout.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "SECUREPASS_LOG";

/// Map the `-v` count to a default level for this crate.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber.
///
/// `SECUREPASS_LOG` wins when set; otherwise the level comes from `-v`.
/// Calling this twice is harmless (the second call is ignored).
pub fn init(verbose: u8) {
    let level = level_for_verbosity(verbose);
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("securepass={level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "debug");
    }
}
