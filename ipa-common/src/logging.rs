//! Tracing initialisation shared by workspace binaries

use crate::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter directives for a configured level
///
/// Workspace crates log at `level`; dependencies (HTTP stack, HTML parser)
/// stay at `warn`.
pub fn default_directives(level: &str) -> String {
    format!("warn,ipa_lookup={level},ipa_common={level}")
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_level` when set. Output goes
/// to stderr so stdout carries only transcriptions.
pub fn init_tracing(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(default_level))
            .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", default_level, e)))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::Internal(format!("Tracing already initialised: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("debug"),
            "warn,ipa_lookup=debug,ipa_common=debug"
        );
    }

    #[test]
    fn test_directives_parse() {
        assert!(EnvFilter::try_new(default_directives("info")).is_ok());
    }
}
