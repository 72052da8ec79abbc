use std::io::{self, Write};

use serde_json::Value;
use tradejournal_core::Envelope;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, output, format, pretty)?;
    out.flush()?;
    Ok(())
}

fn write_output<W: Write>(
    out: &mut W,
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&output.envelope)?
            } else {
                serde_json::to_string(&output.envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(&output.envelope)?;
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(out, &output.envelope, output.text.as_deref())?,
    }

    Ok(())
}

fn write_table<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    text: Option<&str>,
) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "command     : {}", envelope.meta.command)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    writeln!(out)?;
    match text {
        Some(text) => writeln!(out, "{text}")?,
        None => {
            writeln!(out, "data:")?;
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                writeln!(out, "  {line}")?;
            }
        }
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            match error.index {
                Some(index) => writeln!(out, "  - [{index}] {}: {}", error.code, error.message)?,
                None => writeln!(out, "  - {}: {}", error.code, error.message)?,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tradejournal_core::{EnvelopeError, EnvelopeMeta, ValidationError, SCHEMA_VERSION};

    use super::*;

    fn sample(text: Option<&str>) -> CommandOutput {
        let mut meta = EnvelopeMeta::new("request-0001", SCHEMA_VERSION, "positions")
            .expect("meta");
        meta.push_warning("partial input");
        let errors = vec![EnvelopeError::rejected(
            3,
            &ValidationError::MissingField { field: "symbol" },
        )];
        CommandOutput {
            envelope: Envelope::with_errors(meta, json!({"answer": 42}), errors).expect("envelope"),
            text: text.map(str::to_owned),
        }
    }

    fn rendered(output: &CommandOutput, format: OutputFormat, pretty: bool) -> String {
        let mut buffer = Vec::new();
        write_output(&mut buffer, output, format, pretty).expect("render");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn table_prefers_text_and_lists_indexed_errors() {
        let out = rendered(&sample(Some("ABC  10 shares")), OutputFormat::Table, false);
        assert!(out.contains("command     : positions"));
        assert!(out.contains("  - partial input"));
        assert!(out.contains("ABC  10 shares"));
        assert!(!out.contains("\"answer\""));
        assert!(out.contains("  - [3] missing_field: field 'symbol' is required"));
    }

    #[test]
    fn table_falls_back_to_pretty_data() {
        let out = rendered(&sample(None), OutputFormat::Table, false);
        assert!(out.contains("data:"));
        assert!(out.contains("\"answer\": 42"));
    }

    #[test]
    fn ndjson_is_a_single_line() {
        let out = rendered(&sample(None), OutputFormat::Ndjson, true);
        assert_eq!(out.lines().count(), 1);
        let parsed: Value = serde_json::from_str(out.trim()).expect("json");
        assert_eq!(parsed["data"]["answer"], 42);
        assert_eq!(parsed["errors"][0]["index"], 3);
    }
}
