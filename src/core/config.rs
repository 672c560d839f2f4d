//! # Configuration
//!
//! Centralizes settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.happyhour/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HappyHourConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub opentdb: OpenTdbConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub total_questions: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenTdbConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TOTAL_QUESTIONS: usize = 10;
pub const DEFAULT_OPENTDB_BASE_URL: &str = "https://opentdb.com";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub total_questions: usize,
    pub opentdb_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.happyhour/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".happyhour").join("config.toml"))
}

/// Load config from `~/.happyhour/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HappyHourConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HappyHourConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HappyHourConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HappyHourConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: HappyHourConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Happy Hour Trivia Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# total_questions = 10        # Questions per game (or HAPPYHOUR_QUESTIONS env var)

# [opentdb]
# base_url = "https://opentdb.com"    # Or set OPENTDB_BASE_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_questions` comes from the `--questions` flag (None = not specified).
pub fn resolve(config: &HappyHourConfig, cli_questions: Option<usize>) -> ResolvedConfig {
    // Questions per game: CLI → env → config → default. A game needs at
    // least one question.
    let total_questions = cli_questions
        .or_else(|| {
            std::env::var("HAPPYHOUR_QUESTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.general.total_questions)
        .unwrap_or(DEFAULT_TOTAL_QUESTIONS)
        .max(1);

    // Provider base URL: env → config → default
    let opentdb_base_url = std::env::var("OPENTDB_BASE_URL")
        .ok()
        .or_else(|| config.opentdb.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENTDB_BASE_URL.to_string());

    ResolvedConfig {
        total_questions,
        opentdb_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = HappyHourConfig::default();
        assert!(config.general.total_questions.is_none());
        assert!(config.opentdb.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&HappyHourConfig::default(), None);
        assert_eq!(resolved.total_questions, DEFAULT_TOTAL_QUESTIONS);
        assert_eq!(resolved.opentdb_base_url, DEFAULT_OPENTDB_BASE_URL);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = HappyHourConfig {
            general: GeneralConfig {
                total_questions: Some(5),
            },
            opentdb: OpenTdbConfig {
                base_url: Some("http://localhost:9000".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.total_questions, 5);
        assert_eq!(resolved.opentdb_base_url, "http://localhost:9000");
    }

    #[test]
    fn test_resolve_cli_questions_wins() {
        let config = HappyHourConfig {
            general: GeneralConfig {
                total_questions: Some(5),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some(20));
        assert_eq!(resolved.total_questions, 20);
    }

    #[test]
    fn test_resolve_clamps_to_at_least_one_question() {
        let resolved = resolve(&HappyHourConfig::default(), Some(0));
        assert_eq!(resolved.total_questions, 1);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
total_questions = 15
"#;
        let config: HappyHourConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.total_questions, Some(15));
        assert!(config.opentdb.base_url.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
total_questions = 7

[opentdb]
base_url = "http://127.0.0.1:8080"
"#;
        let config: HappyHourConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.total_questions, Some(7));
        assert_eq!(config.opentdb.base_url.as_deref(), Some("http://127.0.0.1:8080"));
    }
}
