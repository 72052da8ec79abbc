use crate::cli::SentimentArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub fn run(args: &SentimentArgs, context: &Context) -> Result<CommandResult, CliError> {
    let text = args.text.join(" ");
    let report = context.scorer.analyze(&text);

    let summary = format!(
        "sentiment : {}\nscore     : {} (+{} / -{})\nkey words : {}",
        report.sentiment,
        report.score,
        report.positive_hits,
        report.negative_hits,
        report.key_words,
    );

    let mut result = CommandResult::ok(serde_json::to_value(&report)?).with_text(summary);
    if report.positive_hits == 0 && report.negative_hits == 0 && !text.trim().is_empty() {
        result = result.with_warning("no lexicon words found; text scored as Neutral");
    }
    Ok(result)
}
