//! Configuration loading and typed config structures for Pixel Jeopardy.
//!
//! The canonical configuration lives in `jeopardy-config.yaml` next to the
//! host binary. Every field has a default, so an empty file (or none at all)
//! yields a playable setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable that overrides `storage.data_dir`.
pub const DATA_DIR_ENV: &str = "JEOPARDY_DATA_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is unusable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JeopardyConfig {
    /// Where the game blob and player names are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Board limits and default preferences.
    #[serde(default)]
    pub game: GameConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl JeopardyConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `JEOPARDY_DATA_DIR` overrides `storage.data_dir` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not an empty mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.storage.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.game.max_rounds == Some(0) {
            return Err(ConfigError::Invalid {
                field: "game.max_rounds",
                reason: "must allow at least one round".to_owned(),
            });
        }
        if self.storage.game_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage.game_key",
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

/// Persistence location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one file per stored key.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key under which the game snapshot is stored.
    #[serde(default = "default_game_key")]
    pub game_key: String,
}

impl StorageConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            self.data_dir = PathBuf::from(dir);
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            game_key: default_game_key(),
        }
    }
}

/// Game limits and starting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Largest round count the host may configure. Unset means no cap.
    #[serde(default)]
    pub max_rounds: Option<usize>,

    /// Sound effects on for a brand-new install.
    #[serde(default = "default_true")]
    pub default_sfx: bool,

    /// Music on for a brand-new install.
    #[serde(default = "default_true")]
    pub default_music: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: None,
            default_sfx: true,
            default_music: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_data_dir() -> PathBuf {
    PathBuf::from(".jeopardy")
}

fn default_game_key() -> String {
    "pixelJeopardyGame".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = JeopardyConfig::default();
        assert_eq!(config.storage.game_key, "pixelJeopardyGame");
        assert_eq!(config.game.max_rounds, None);
        assert!(config.game.default_sfx);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
storage:
  data_dir: "/tmp/jeopardy-test"
  game_key: "testGame"

game:
  max_rounds: 3
  default_sfx: false
  default_music: true

logging:
  level: "debug"
  json: true
"#;

        let config = JeopardyConfig::parse(yaml).unwrap();
        assert_eq!(config.storage.game_key, "testGame");
        assert_eq!(config.game.max_rounds, Some(3));
        assert!(!config.game.default_sfx);
        assert!(config.game.default_music);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = JeopardyConfig::parse("game:\n  max_rounds: 2\n").unwrap();

        // Overridden
        assert_eq!(config.game.max_rounds, Some(2));
        // Everything else uses defaults
        assert_eq!(config.storage.game_key, "pixelJeopardyGame");
        assert!(config.game.default_music);
        assert!(!config.logging.json);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(JeopardyConfig::parse("").is_ok());
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let result = JeopardyConfig::parse("game:\n  max_rounds: 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "game.max_rounds",
                ..
            })
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = JeopardyConfig::parse("game: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("jeopardy-config.yaml");
        if path.exists() {
            let config = JeopardyConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
