//! Checks client-supplied bindings against the parameters a query uses.

use indexmap::IndexSet;
use serde::Serialize;
use tinkerglot_adapters::query::gremlin::parse;
use tinkerglot_common::utils::error::Result;

use crate::canonicalizer::canonicalize;
use crate::config::Config;
use crate::parameters::extract_parameters;

/// Difference between a query's parameters and the supplied names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingReport {
    /// Parameters used by the query with no binding, in query order.
    pub missing: Vec<String>,
    /// Bindings the query never uses, in supplied order.
    pub unused: Vec<String>,
}

impl BindingReport {
    /// True when every parameter is bound and every binding is used.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.unused.is_empty()
    }
}

/// Compares the parameters of `query` with `names`.
///
/// # Errors
///
/// Returns a syntax error when `query` cannot be parsed.
pub fn check_bindings<'a>(
    query: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<BindingReport> {
    let parameters = extract_parameters(&canonicalize(parse(query)?, &Config::default()));
    let supplied: IndexSet<&str> = names.into_iter().collect();

    let report = BindingReport {
        missing: parameters
            .iter()
            .filter(|p| !supplied.contains(p.as_str()))
            .cloned()
            .collect(),
        unused: supplied
            .iter()
            .filter(|name| !parameters.contains(**name))
            .map(|name| (*name).to_string())
            .collect(),
    };
    tracing::debug!(
        missing = report.missing.len(),
        unused = report.unused.len(),
        "checked bindings"
    );
    Ok(report)
}
