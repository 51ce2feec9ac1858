//! # tinkerglot-adapters
//!
//! Adapters layer for Tinkerglot: the Gremlin front end and the decoder for
//! client request bodies.
//!
//! ## Modules
//!
//! - [`query`] - Query language lexer, AST and parser
//! - [`request`] - JSON request bodies and `Accept` negotiation

pub mod query;
pub mod request;
