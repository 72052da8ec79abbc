use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tradejournal_core::ValidationError),

    #[error(transparent)]
    Lexicon(#[from] tradejournal_core::LexiconError),

    #[error(transparent)]
    Config(#[from] tradejournal_core::ConfigError),

    #[error("failed to read trades from '{path}': {message}")]
    Input { path: PathBuf, message: String },

    #[error(transparent)]
    Positions(#[from] tradejournal_core::PositionError),

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Input { .. } | Self::Positions(_) => 2,
            Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Lexicon(_) | Self::Config(_) | Self::Io(_) => 10,
        }
    }
}
