mod insight;
mod lexicon;
mod positions;
mod sentiment;
mod session;

use std::path::PathBuf;

use serde_json::Value;
use tradejournal_core::{
    Envelope, EnvelopeError, EnvelopeMeta, JournalConfig, Lexicon, SentimentScorer,
    SCHEMA_VERSION,
};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub text: Option<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            text: None,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Text shown instead of the JSON data in table format.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }
}

/// Rendered result of one command.
pub struct CommandOutput {
    pub envelope: Envelope<Value>,
    pub text: Option<String>,
}

/// Where the active word lists came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconSource {
    Builtin,
    File(PathBuf),
}

pub struct Context {
    pub scorer: SentimentScorer,
    pub lexicon_source: LexiconSource,
}

impl Context {
    pub fn load(cli: &Cli, config: &JournalConfig) -> Result<Self, CliError> {
        let path = cli.lexicon.clone().or_else(|| config.lexicon_path.clone());
        let (lexicon, lexicon_source) = match path {
            Some(path) => (Lexicon::from_path(&path)?, LexiconSource::File(path)),
            None => (Lexicon::default(), LexiconSource::Builtin),
        };

        Ok(Self {
            scorer: SentimentScorer::new(lexicon),
            lexicon_source,
        })
    }
}

/// Runs the selected command. The lexicon is loaded only by commands that
/// score text.
pub fn run(cli: &Cli, config: &JournalConfig) -> Result<CommandOutput, CliError> {
    let load = || Context::load(cli, config);

    let (name, command_result) = match &cli.command {
        Command::Sentiment(args) => ("sentiment", sentiment::run(args, &load()?)?),
        Command::Insight(args) => ("insight", insight::run(args, &load()?)?),
        Command::Positions(args) => ("positions", positions::run(args)?),
        Command::Lexicon => ("lexicon", lexicon::run(&load()?)?),
        Command::Session(args) => ("session", session::run(args, load()?)?),
    };

    let CommandResult {
        data,
        text,
        warnings,
        errors,
    } = command_result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), SCHEMA_VERSION, name)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    let envelope = Envelope::with_errors(meta, data, errors)?;
    Ok(CommandOutput { envelope, text })
}
