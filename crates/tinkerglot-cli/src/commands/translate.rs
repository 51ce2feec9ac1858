//! `tinkerglot translate`.

use anyhow::Result;
use comfy_table::{Cell, Color};
use serde::Serialize;
use tinkerglot::{Config, Mode, Translator};

use crate::OutputFormat;
use crate::output::{self, Format};

#[derive(Serialize)]
struct TranslationOutput {
    mode: String,
    translated: String,
    parameters: Vec<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ModeOutput {
    Translated { mode: String, translated: String },
    Failed { mode: String, error: String },
}

/// Translates `query` into `target`, or into every mode when `target` is `None`.
pub fn run(
    query: &str,
    target: Option<Mode>,
    config: Config,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let query = super::query_text(query)?;
    let translator = Translator::new(config);

    let Some(mode) = target else {
        return run_all(&translator, &query, format, quiet);
    };

    let translation = translator.translate(&query, mode)?;
    let parameters: Vec<String> = translation.parameters.into_iter().collect();

    match Format::from(format) {
        Format::Json => output::print_json(
            &TranslationOutput {
                mode: mode.to_string(),
                translated: translation.translated,
                parameters,
            },
            quiet,
        )?,
        Format::Table => {
            let items = vec![
                ("Mode", mode.to_string()),
                ("Translation", translation.translated),
                ("Parameters", output::join_or_none(parameters.iter().map(String::as_str))),
            ];
            output::print_key_value_table(&items, quiet);
        }
    }
    Ok(())
}

fn run_all(translator: &Translator, query: &str, format: OutputFormat, quiet: bool) -> Result<()> {
    let outputs = translator.translate_all(query)?;

    match Format::from(format) {
        Format::Json => {
            let rows: Vec<ModeOutput> = outputs
                .into_iter()
                .map(|(mode, rendered)| match rendered {
                    Ok(translated) => ModeOutput::Translated {
                        mode: mode.to_string(),
                        translated,
                    },
                    Err(e) => ModeOutput::Failed {
                        mode: mode.to_string(),
                        error: e.to_string(),
                    },
                })
                .collect();
            output::print_json(&rows, quiet)?;
        }
        Format::Table => {
            let mut table = output::create_table();
            output::add_header(&mut table, &["Mode", "Translation"]);
            for (mode, rendered) in outputs {
                let cell = match rendered {
                    Ok(translated) => Cell::new(translated),
                    Err(e) => Cell::new(e.to_string()).fg(Color::Red),
                };
                table.add_row(vec![Cell::new(mode.to_string()), cell]);
            }
            output::print_table(&table, quiet);
        }
    }
    Ok(())
}
