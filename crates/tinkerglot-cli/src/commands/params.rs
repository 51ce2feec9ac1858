//! `tinkerglot params`.

use anyhow::Result;
use comfy_table::Cell;
use tinkerglot::{Mode, translate};

use crate::OutputFormat;
use crate::output::{self, Format};

/// Lists the parameters of `query` in order of first occurrence.
pub fn run(query: &str, format: OutputFormat, quiet: bool) -> Result<()> {
    let query = super::query_text(query)?;
    let parameters = translate(&query, "g", Mode::Canonical)?.parameters;

    match Format::from(format) {
        Format::Json => output::print_json(&parameters, quiet)?,
        Format::Table => {
            let mut table = output::create_table();
            output::add_header(&mut table, &["#", "Parameter"]);
            for (i, name) in parameters.iter().enumerate() {
                table.add_row(vec![Cell::new(i + 1), Cell::new(name)]);
            }
            output::print_table(&table, quiet);
        }
    }
    Ok(())
}
