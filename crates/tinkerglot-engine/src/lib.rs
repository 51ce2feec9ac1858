//! # tinkerglot-engine
//!
//! The translation engine: everything between a parsed traversal and the
//! text handed back to the caller.
//!
//! ## Modules
//!
//! - [`config`] - Translator configuration
//! - [`vocabulary`] - The closed table of step, predicate, enum and strategy names
//! - [`canonicalizer`] - Resolves bare names and normalizes literals
//! - [`parameters`] - Bound-parameter extraction
//! - [`anonymizer`] - Literal-to-placeholder rewriting
//! - [`emit`] - Shared renderer and the per-language syntaxes
//! - [`translator`] - Orchestration: parse, canonicalize, render
//! - [`bindings`] - Pre-validation of client-supplied bindings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod anonymizer;
pub mod bindings;
pub mod canonicalizer;
pub mod config;
pub mod emit;
pub mod parameters;
pub mod translator;
pub mod vocabulary;

pub use anonymizer::anonymize;
pub use bindings::{BindingReport, check_bindings};
pub use canonicalizer::canonicalize;
pub use config::Config;
pub use emit::emit;
pub use parameters::extract_parameters;
pub use translator::{Translation, Translator, translate};
