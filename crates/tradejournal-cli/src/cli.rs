//! CLI argument definitions for tradejournal.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sentiment` | Score free text against the lexicon |
//! | `insight` | Validate one trade and print its insight report |
//! | `positions` | Aggregate a file of trades into per-symbol positions |
//! | `lexicon` | Show the active word lists |
//! | `session` | Interactive in-memory journal |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and errors as failures |
//! | `--lexicon` | config or built-in | Lexicon file (JSON or YAML) |
//! | `--log-level` | `RUST_LOG`, config, then `warn` | tracing filter directive |
//!
//! # Examples
//!
//! ```bash
//! tradejournal sentiment "Great profit today, feeling confident"
//! tradejournal insight --date 2024-05-01 --symbol ABC --action buy --price 10 --quantity 5
//! tradejournal positions trades.yaml --format table
//! tradejournal session
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tradejournal_core::EntryDraft;

/// Personal trading journal with word-list sentiment and position summaries.
#[derive(Debug, Parser)]
#[command(
    name = "tradejournal",
    author,
    version,
    about = "Personal trading journal",
    long_about = "tradejournal logs trades, scores the trader's notes against a \
positive/negative word list and summarizes net position and average cost per symbol.\n\
\n\
Nothing is persisted: each invocation (or interactive session) starts with an empty journal.\n\
\n\
Use 'tradejournal <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON object (default)
    /// - ndjson: Compact single-line JSON
    /// - table: Human-readable text
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Lexicon file (.json, .yaml or .yml) replacing the built-in word lists.
    #[arg(long, global = true, value_name = "PATH")]
    pub lexicon: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `tradejournal_core=debug`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Table,
    /// Single JSON object output.
    Json,
    /// Compact single-line JSON.
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify free text as Positive, Negative or Neutral.
    ///
    /// # Examples
    ///
    ///   tradejournal sentiment "Bad loss, worried about this bearish trend"
    ///   tradejournal sentiment --lexicon words.yaml "to the moon"
    Sentiment(SentimentArgs),

    /// Validate one trade and print the insight report it would produce.
    Insight(EntryArgs),

    /// Aggregate a JSON or YAML list of trades into per-symbol positions.
    ///
    /// Each record has the fields date, symbol, action, price, quantity and
    /// optionally notes. Invalid records are reported and skipped.
    ///
    /// # Examples
    ///
    ///   tradejournal positions trades.json
    ///   tradejournal positions trades.yaml --format table
    Positions(PositionsArgs),

    /// Show the active lexicon.
    Lexicon,

    /// Interactive journal session on stdin/stdout.
    ///
    /// Type 'help' inside the session for the list of commands.
    Session(SessionArgs),
}

/// Arguments for the `sentiment` command.
#[derive(Debug, Args)]
pub struct SentimentArgs {
    /// Text to score; multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Trade fields for the `insight` command.
#[derive(Debug, Args)]
pub struct EntryArgs {
    /// Trade date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,

    /// Instrument symbol; case is kept as typed.
    #[arg(long)]
    pub symbol: String,

    /// buy or sell.
    #[arg(long)]
    pub action: String,

    /// Price per unit.
    #[arg(long)]
    pub price: String,

    /// Whole number of units.
    #[arg(long)]
    pub quantity: String,

    /// Free-text observations.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Voice transcript to attach.
    #[arg(long, default_value = "")]
    pub voice: String,
}

impl EntryArgs {
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            date: self.date.clone(),
            symbol: self.symbol.clone(),
            action: self.action.clone(),
            price: self.price.clone(),
            quantity: self.quantity.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Arguments for the `positions` command.
#[derive(Debug, Args)]
pub struct PositionsArgs {
    /// JSON or YAML file holding a list of trades.
    pub file: PathBuf,
}

/// Arguments for the `session` command.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Behave as if the host had no speech recognizer.
    #[arg(long, default_value_t = false)]
    pub no_speech: bool,
}
