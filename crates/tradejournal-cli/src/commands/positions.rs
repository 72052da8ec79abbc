use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tradejournal_core::{
    aggregate, chart_rows, EntryDraft, EnvelopeError, Journal, PositionSummary, Symbol,
};

use crate::chart;
use crate::cli::PositionsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PositionsResponseData {
    entries_loaded: usize,
    entries_rejected: usize,
    positions: BTreeMap<Symbol, PositionSummary>,
}

pub fn run(args: &PositionsArgs) -> Result<CommandResult, CliError> {
    let drafts = load_drafts(&args.file)?;

    let mut journal = Journal::new();
    let mut errors = Vec::new();
    for (index, draft) in drafts.iter().enumerate() {
        if let Err(err) = journal.record(draft, "") {
            tracing::warn!(index, error = %err, "skipping invalid trade");
            errors.push(EnvelopeError::rejected(index, &err));
        }
    }

    let positions = aggregate(journal.entries())?;
    let text = chart::render(&chart_rows(&positions));

    let data = PositionsResponseData {
        entries_loaded: journal.len(),
        entries_rejected: errors.len(),
        positions,
    };

    Ok(CommandResult::ok(serde_json::to_value(data)?)
        .with_text(text)
        .with_errors(errors))
}

/// Reads a list of drafts; the parser follows the file extension.
fn load_drafts(path: &Path) -> Result<Vec<EntryDraft>, CliError> {
    let input_error = |message: String| CliError::Input {
        path: path.to_path_buf(),
        message,
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let content = fs::read_to_string(path).map_err(|err| input_error(err.to_string()))?;

    match extension.as_str() {
        "json" => serde_json::from_str(&content).map_err(|err| input_error(err.to_string())),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|err| input_error(err.to_string())),
        other => Err(input_error(format!(
            "unsupported extension '{other}', expected .json, .yaml or .yml"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn trades_file(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("tempfile");
        file.write_all(body.as_bytes()).expect("write");
        file
    }

    #[test]
    fn aggregates_yaml_trades_and_reports_rejects() {
        let file = trades_file(
            ".yaml",
            "- {date: 2024-01-02, symbol: ABC, action: buy, price: 10, quantity: 5}\n\
             - {date: 2024-01-03, symbol: ABC, action: buy, price: 20, quantity: 5}\n\
             - {date: 2024-01-04, symbol: XYZ, action: hold, price: 1, quantity: 1}\n",
        );

        let result = run(&PositionsArgs {
            file: file.path().to_path_buf(),
        })
        .expect("positions");

        assert_eq!(result.data["entries_loaded"], 2);
        assert_eq!(result.data["entries_rejected"], 1);
        assert_eq!(result.data["positions"]["ABC"]["quantity"], 10);
        assert_eq!(result.data["positions"]["ABC"]["average_cost"], "15");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "invalid_action");
        assert_eq!(result.errors[0].index, Some(2));
    }

    #[test]
    fn flat_position_serializes_null_average_cost() {
        let file = trades_file(
            ".json",
            r#"[
                {"date":"2024-01-02","symbol":"ABC","action":"buy","price":"10","quantity":"5"},
                {"date":"2024-01-03","symbol":"ABC","action":"sell","price":"12","quantity":"5"}
            ]"#,
        );

        let result = run(&PositionsArgs {
            file: file.path().to_path_buf(),
        })
        .expect("positions");

        assert!(result.data["positions"]["ABC"]["average_cost"].is_null());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn unrepresentable_totals_fail_the_command() {
        let file = trades_file(
            ".yaml",
            "- {date: 2024-01-02, symbol: ABC, action: buy, price: \"50000000000000000000000000000\", quantity: 1}\n\
             - {date: 2024-01-03, symbol: ABC, action: buy, price: \"50000000000000000000000000000\", quantity: 1}\n",
        );

        let err = run(&PositionsArgs {
            file: file.path().to_path_buf(),
        })
        .err()
        .expect("must fail");

        assert!(matches!(err, CliError::Positions(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = trades_file(".csv", "date,symbol\n");
        let err = run(&PositionsArgs {
            file: file.path().to_path_buf(),
        })
        .err()
        .expect("must fail");
        assert!(matches!(err, CliError::Input { .. }));
    }
}
