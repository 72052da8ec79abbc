use tradejournal_core::{InsightReport, Journal};

use crate::cli::EntryArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub fn run(args: &EntryArgs, context: &Context) -> Result<CommandResult, CliError> {
    let mut journal = Journal::new();
    let entry = journal.record(&args.to_draft(), &args.voice)?;
    let report = InsightReport::generate(entry, &context.scorer);

    let data = serde_json::json!({
        "entry": entry,
        "insights": report,
    });

    Ok(CommandResult::ok(data).with_text(report.to_string()))
}
