//! Configuration loading and resolution
//!
//! Resolution order for the configuration file:
//! 1. Explicit path (command-line argument)
//! 2. `IPA_LOOKUP_CONFIG` environment variable
//! 3. `<config_dir>/ipa-lookup/config.toml`
//! 4. Compiled defaults
//!
//! Individual values may then be overridden from the environment
//! (`IPA_LOOKUP_LOG_LEVEL`, `IPA_LOOKUP_TIMEOUT_SECS`).
//!
//! Resolution runs before the tracing subscriber exists (the log level is
//! itself configuration), so problems that fall back to defaults are
//! returned as [`ResolvedConfig::warnings`] for the caller to log.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "IPA_LOOKUP_CONFIG";

/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV_VAR: &str = "IPA_LOOKUP_LOG_LEVEL";

/// Environment variable overriding `http.timeout_secs`
pub const TIMEOUT_ENV_VAR: &str = "IPA_LOOKUP_TIMEOUT_SECS";

const APP_DIR_NAME: &str = "ipa-lookup";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Browser identification sent to dictionary sites that reject unidentified clients
pub const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_1) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/39.0.2171.95 Safari/537.36";

/// Longest accepted dictionary transcription, in characters
pub const DEFAULT_MAX_TRANSCRIPTION_CHARS: usize = 50;

/// Top-level configuration file model
///
/// Every section and field is optional in the TOML file; missing values
/// fall back to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub lookup: LookupConfig,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for workspace crates (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `[http]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent for API sources (wiki endpoints)
    pub user_agent: String,
    /// User-Agent for dictionary sites
    pub browser_user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("ipa-lookup/{}", env!("CARGO_PKG_VERSION")),
            browser_user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// `[lookup]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Maximum number of words looked up at once (1 = sequential)
    pub concurrency: usize,
    /// Dictionary results longer than this are rejected
    pub max_transcription_chars: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            max_transcription_chars: DEFAULT_MAX_TRANSCRIPTION_CHARS,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject values the lookup engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(Error::InvalidInput(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.lookup.concurrency == 0 {
            return Err(Error::InvalidInput(
                "lookup.concurrency must be at least 1".to_string(),
            ));
        }
        if self.lookup.max_transcription_chars == 0 {
            return Err(Error::InvalidInput(
                "lookup.max_transcription_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply `IPA_LOOKUP_*` environment overrides in place
    ///
    /// Returns a warning for each override that was ignored.
    pub fn apply_env_overrides(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV_VAR) {
            if !level.trim().is_empty() {
                self.logging.level = level.trim().to_string();
            }
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.http.timeout_secs = secs,
                _ => warnings.push(format!(
                    "Ignoring invalid {}={:?} (expected positive integer)",
                    TIMEOUT_ENV_VAR, raw
                )),
            }
        }

        warnings
    }
}

/// Effective configuration plus the fallbacks taken while resolving it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    pub config: Config,
    /// Human-readable messages, to be logged once tracing is initialised
    pub warnings: Vec<String>,
}

/// Resolve the effective configuration
///
/// An explicitly named file (argument or `IPA_LOOKUP_CONFIG`) must exist and
/// parse. The per-user file is optional: when it is absent or broken the
/// compiled defaults are used and a warning is recorded.
pub fn resolve_config(cli_path: Option<&Path>) -> Result<ResolvedConfig> {
    let mut warnings = Vec::new();
    let mut config = if let Some(path) = cli_path {
        // Priority 1: Command-line argument
        Config::load(path)?
    } else if let Some(path) = env_config_path() {
        // Priority 2: Environment variable
        Config::load(&path)?
    } else {
        // Priority 3: User config file, Priority 4: compiled defaults
        load_user_config(&mut warnings)
    };

    warnings.extend(config.apply_env_overrides());
    config.validate()?;
    Ok(ResolvedConfig { config, warnings })
}

/// Default per-user configuration path, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn env_config_path() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV_VAR)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
}

fn load_user_config(warnings: &mut Vec<String>) -> Config {
    let Some(path) = default_config_path() else {
        debug!("No platform config directory; using compiled defaults");
        return Config::default();
    };

    if !path.exists() {
        debug!(path = %path.display(), "No user config file; using compiled defaults");
        return Config::default();
    }

    match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            warnings.push(format!(
                "User config unusable; falling back to compiled defaults ({}: {})",
                path.display(),
                e
            ));
            Config::default()
        }
    }
}
