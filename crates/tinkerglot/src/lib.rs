//! # Tinkerglot
//!
//! Translates Gremlin traversals into the source text of every TinkerPop
//! language variant.
//!
//! Start with [`translate`] for one-off calls, or build a [`Translator`]
//! from a [`Config`] when the source name or quoting should differ from the
//! defaults.
//!
//! ## Modes
//!
//! | Mode | Output |
//! | ---- | ------ |
//! | [`Mode::Canonical`] | The query in normalized Gremlin |
//! | [`Mode::Anonymized`] | Canonical Gremlin with literals replaced by placeholders |
//! | [`Mode::Target`] | Source for one [`Language`] |
//!
//! ## Quick Start
//!
//! ```rust
//! use tinkerglot::{Language, Mode, translate};
//!
//! let t = translate("g.V(vid1).has('age', gt(30))", "g", Mode::Target(Language::Python))?;
//! assert_eq!(t.translated, "g.V(vid1).has('age', P.gt(30))");
//! assert!(t.parameters.contains("vid1"));
//!
//! let t = translate("g.V().has('name', 'marko')", "g", Mode::Anonymized)?;
//! assert_eq!(t.translated, "g.V().has(string0, string1)");
//! # Ok::<(), tinkerglot::Error>(())
//! ```

// Translation API
pub use tinkerglot_engine::{
    BindingReport, Config, Translation, Translator, check_bindings, translate,
};

// Target and mode enums, quoting, and the error taxonomy
pub use tinkerglot_adapters::query::gremlin::ast::QuoteStyle;
pub use tinkerglot_common::types::{Language, Mode};
pub use tinkerglot_common::utils::error::{Error, QueryError, QueryErrorKind, Result};

// Request bodies sent by HTTP clients
pub use tinkerglot_adapters::request::{RequestError, RequestMessage, negotiate_accept};

/// Lower-level passes, for callers that work on trees directly.
pub mod passes {
    pub use tinkerglot_adapters::query::gremlin::{ast, parse};
    pub use tinkerglot_engine::{anonymize, canonicalize, emit, extract_parameters};
}
