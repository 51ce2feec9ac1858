//! The canonical query language.

use tinkerglot_adapters::query::gremlin::ast::{MapEntry, RangeLiteral};
use tinkerglot_common::Language;
use tinkerglot_common::utils::error::Result;

use super::{Syntax, key_as_written};

/// Canonical Gremlin. Everything but ranges comes from the provided
/// methods of [`Syntax`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Gremlin;

impl Syntax for Gremlin {
    fn language(&self) -> Language {
        Language::Gremlin
    }

    fn range(&self, r: &RangeLiteral) -> Result<String> {
        Ok(format!("{}..{}", self.number(&r.start), self.number(&r.end)))
    }

    fn map_key(&self, entry: &MapEntry, rendered: String) -> String {
        key_as_written(entry, rendered)
    }
}
