use serde::Serialize;

use crate::error::CliError;

use super::{CommandResult, Context, LexiconSource};

#[derive(Debug, Serialize)]
struct LexiconResponseData<'a> {
    source: String,
    positive: Vec<&'a str>,
    negative: Vec<&'a str>,
}

pub fn run(context: &Context) -> Result<CommandResult, CliError> {
    let lexicon = context.scorer.lexicon();
    let source = match &context.lexicon_source {
        LexiconSource::Builtin => String::from("builtin"),
        LexiconSource::File(path) => path.display().to_string(),
    };

    let data = LexiconResponseData {
        source,
        positive: lexicon.positive().iter().map(String::as_str).collect(),
        negative: lexicon.negative().iter().map(String::as_str).collect(),
    };

    let text = format!(
        "source   : {}\npositive : {}\nnegative : {}",
        data.source,
        data.positive.join(", "),
        data.negative.join(", "),
    );

    Ok(CommandResult::ok(serde_json::to_value(&data)?).with_text(text))
}
