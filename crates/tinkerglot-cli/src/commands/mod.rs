//! CLI command implementations.

pub mod params;
pub mod request;
pub mod translate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Returns `arg` itself, or stdin when `arg` is `-`.
pub fn query_text(arg: &str) -> Result<String> {
    if arg == "-" {
        read_stdin()
    } else {
        Ok(arg.to_string())
    }
}

/// Reads `path`, or stdin when `path` is `-`.
pub fn file_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        read_stdin()
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("reading stdin")?;
    Ok(text)
}
