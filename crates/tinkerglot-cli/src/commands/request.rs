//! `tinkerglot request`.

use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;
use tinkerglot::{Config, Mode, RequestMessage, Translator, check_bindings, negotiate_accept};

use crate::OutputFormat;
use crate::output::{self, Format};

/// Response types a translation can be returned as.
const SUPPORTED_MEDIA_TYPES: &[&str] = &["application/json"];

#[derive(Serialize)]
struct RequestOutput {
    request_id: Option<String>,
    language: String,
    media_type: Option<String>,
    translated: String,
    parameters: Vec<String>,
    missing_bindings: Vec<String>,
    unused_bindings: Vec<String>,
}

/// Decodes the request body at `input` and translates its script into `mode`.
pub fn run(
    input: &Path,
    mode: Mode,
    accept: Option<&str>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let body = super::file_text(input)?;
    let message = RequestMessage::from_json(&body)?;

    let media_type = match accept {
        Some(header) => match negotiate_accept(header, SUPPORTED_MEDIA_TYPES) {
            Some(media_type) => Some(media_type),
            None => bail!("no supported response type in Accept header: {header}"),
        },
        None => None,
    };

    let report = check_bindings(&message.gremlin, message.binding_names())?;
    if !report.missing.is_empty() {
        tracing::warn!(missing = ?report.missing, "request leaves parameters unbound");
    }

    let source_name = message.g.clone().unwrap_or_else(|| "g".to_string());
    let translation =
        Translator::new(Config::new().with_source_name(source_name)).translate(&message.gremlin, mode)?;

    let result = RequestOutput {
        request_id: message.request_id,
        language: message.language,
        media_type,
        translated: translation.translated,
        parameters: translation.parameters.into_iter().collect(),
        missing_bindings: report.missing,
        unused_bindings: report.unused,
    };

    match Format::from(format) {
        Format::Json => output::print_json(&result, quiet)?,
        Format::Table => {
            let list = |items: &[String]| output::join_or_none(items.iter().map(String::as_str));
            let items = vec![
                ("Request ID", result.request_id.clone().unwrap_or_else(|| "-".to_string())),
                ("Language", result.language.clone()),
                ("Media Type", result.media_type.clone().unwrap_or_else(|| "-".to_string())),
                ("Translation", result.translated.clone()),
                ("Parameters", list(&result.parameters)),
                ("Missing Bindings", list(&result.missing_bindings)),
                ("Unused Bindings", list(&result.unused_bindings)),
            ];
            output::print_key_value_table(&items, quiet);
        }
    }
    Ok(())
}
