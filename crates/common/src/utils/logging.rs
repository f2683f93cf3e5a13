use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Fallback filter when neither `RUST_LOG` nor a configured filter is set.
/// Kept quiet so log lines do not interleave with interactive prompts.
pub const DEFAULT_FILTER: &str = "warn";

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing subscriber with compact human-readable output.
/// - Respects `RUST_LOG` if set
/// - Falls back to `default_filter`, then to [`DEFAULT_FILTER`] if that does not parse
/// - Writes to stderr so stdout stays reserved for chat output
pub fn init_logging_default(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// Same filter resolution and writer as [`init_logging_default`].
pub fn init_logging_json(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(false)
        .json()
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        // second init must not panic even though a global subscriber exists
        init_logging_default("info");
        init_logging_json("debug");
    }
}
