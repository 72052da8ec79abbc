//! Optional user configuration.
//!
//! Read from `$TRADEJOURNAL_HOME/config.yaml`, where the home directory
//! defaults to `$HOME/.tradejournal`. Every key is optional and a missing
//! file means defaults.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOME_ENV: &str = "TRADEJOURNAL_HOME";
const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    /// Lexicon file replacing the built-in word lists.
    pub lexicon_path: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `info` or `tradejournal_core=debug`.
    pub log_level: Option<String>,
}

impl JournalConfig {
    /// Loads `config.yaml` from the resolved home directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&resolve_home().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // relative lexicon paths are relative to the config file
        if let (Some(lexicon), Some(dir)) = (config.lexicon_path.as_mut(), path.parent()) {
            if lexicon.is_relative() {
                *lexicon = dir.join(&*lexicon);
            }
        }

        Ok(config)
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

pub fn resolve_home() -> PathBuf {
    if let Some(path) = env::var_os(HOME_ENV) {
        return PathBuf::from(path);
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".tradejournal");
    }

    PathBuf::from(".tradejournal")
}
