//! Gremlin query language front end.
//!
//! [`parse`] turns traversal text such as `g.V().has('name', 'marko')` into
//! an [`ast::Query`]. The tree is purely syntactic: a bare `desc` stays an
//! identifier and a bare `gt(1)` stays a receiver-less call until the
//! engine's canonicalizer classifies them.

pub mod ast;
pub mod lexer;
pub mod parser;

use tinkerglot_common::utils::error::Result;

pub use ast::Query;
pub use parser::{ANONYMOUS_MARKER, Parser};

/// Parses a traversal.
pub fn parse(source: &str) -> Result<Query> {
    let query = Parser::new(source)?.parse()?;
    tracing::trace!(len = source.len(), "parsed gremlin traversal");
    Ok(query)
}
