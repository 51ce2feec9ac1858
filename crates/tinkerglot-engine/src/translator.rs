//! Query translation.
//!
//! Every translation runs the same passes:
//!
//! ```text
//! text -> parse -> canonicalize -> extract parameters
//!                       |
//!                       +-> render (canonical / target), or
//!                       +-> anonymize -> render
//! ```
//!
//! Parameters always come from the canonical tree, before anonymization.

use indexmap::IndexSet;
use serde::Serialize;
use tinkerglot_adapters::query::gremlin::parse;
use tinkerglot_common::utils::error::Result;
use tinkerglot_common::{Language, Mode};

use crate::anonymizer::anonymize;
use crate::canonicalizer::Canonicalizer;
use crate::config::Config;
use crate::emit::emit;
use crate::parameters::extract_parameters;

/// Output of one translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Rendered source text.
    pub translated: String,
    /// Bound parameters in order of first occurrence.
    pub parameters: IndexSet<String>,
}

/// Translates queries with a fixed [`Config`].
///
/// Holds no state between calls and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: Config,
}

impl Translator {
    /// Creates a translator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translates `query` into `mode`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error when `query` cannot be parsed, and an
    /// unsupported-construct error when the target cannot express a node.
    pub fn translate(&self, query: &str, mode: Mode) -> Result<Translation> {
        let canonical = Canonicalizer::new(&self.config).query(parse(query)?);
        let parameters = extract_parameters(&canonical);
        let source_name = self.config.source_name.as_str();

        let translated = match mode {
            Mode::Canonical | Mode::Target(Language::Gremlin) => {
                emit(&canonical, Language::Gremlin, source_name)?
            }
            Mode::Anonymized => emit(&anonymize(&canonical), Language::Gremlin, source_name)?,
            Mode::Target(language) => emit(&canonical, language, source_name)?,
        };

        tracing::debug!(%mode, parameters = parameters.len(), "translated query");
        Ok(Translation {
            translated,
            parameters,
        })
    }

    /// Translates `query` into every mode in [`Mode::ALL`].
    ///
    /// Parses once. A mode the query cannot be rendered in yields its error
    /// in place of a translation; the other modes are unaffected.
    ///
    /// # Errors
    ///
    /// Returns a syntax error when `query` cannot be parsed.
    pub fn translate_all(&self, query: &str) -> Result<Vec<(Mode, Result<String>)>> {
        let canonical = Canonicalizer::new(&self.config).query(parse(query)?);
        let source_name = self.config.source_name.as_str();
        let outputs = Mode::ALL
            .into_iter()
            .map(|mode| {
                let rendered = match mode {
                    Mode::Canonical => emit(&canonical, Language::Gremlin, source_name),
                    Mode::Anonymized => {
                        emit(&anonymize(&canonical), Language::Gremlin, source_name)
                    }
                    Mode::Target(language) => emit(&canonical, language, source_name),
                };
                (mode, rendered)
            })
            .collect();
        Ok(outputs)
    }
}

/// Translates `query` into `mode`, rendering the traversal source as
/// `source_name`.
///
/// # Errors
///
/// See [`Translator::translate`].
pub fn translate(query: &str, source_name: &str, mode: Mode) -> Result<Translation> {
    Translator::new(Config::new().with_source_name(source_name)).translate(query, mode)
}

#[cfg(test)]
mod tests {
    use tinkerglot_adapters::query::gremlin::ast::QuoteStyle;
    use tinkerglot_common::utils::error::QueryErrorKind;

    use super::*;

    #[test]
    fn test_canonical_and_parameters() {
        let t = translate("g.V(vid1).out(  'knows'  )", "g", Mode::Canonical).unwrap();
        assert_eq!(t.translated, "g.V(vid1).out('knows')");
        assert_eq!(t.parameters.iter().collect::<Vec<_>>(), vec!["vid1"]);
    }

    #[test]
    fn test_gremlin_target_is_canonical() {
        let a = translate("g.V().has('age', gt(30))", "g", Mode::Canonical).unwrap();
        let b = translate("g.V().has('age', gt(30))", "g", Mode::Target(Language::Gremlin)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.translated, "g.V().has('age', P.gt(30))");
    }

    #[test]
    fn test_anonymized_keeps_parameters() {
        let t = translate("g.V(x).has('name', 'marko')", "g", Mode::Anonymized).unwrap();
        assert_eq!(t.translated, "g.V(x).has(string0, string1)");
        assert!(t.parameters.contains("x"));
    }

    #[test]
    fn test_source_name() {
        let t = translate("g.V().count()", "gmodern", Mode::Target(Language::Python)).unwrap();
        assert_eq!(t.translated, "gmodern.V().count()");
    }

    #[test]
    fn test_errors() {
        let err = translate("g.V(", "g", Mode::Canonical).unwrap_err();
        assert_eq!(err.query_kind(), Some(QueryErrorKind::Syntax));

        let err = translate("g.inject(0..5)", "g", Mode::Target(Language::Python)).unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(err.to_string(), "Python does not support range literals");
    }

    #[test]
    fn test_deep_nesting() {
        let nested = |depth: usize| format!("g.inject({}1{})", "[".repeat(depth), "]".repeat(depth));

        let err = translate(&nested(100_000), "g", Mode::Canonical).unwrap_err();
        assert_eq!(err.query_kind(), Some(QueryErrorKind::Syntax));

        for mode in Mode::ALL {
            assert!(translate(&nested(200), "g", mode).is_ok(), "{mode:?}");
        }
    }

    #[test]
    fn test_quote_style() {
        let translator = Translator::new(Config::new().with_quote_style(QuoteStyle::Double));
        let t = translator.translate("g.V().has('name', 'x')", Mode::Canonical).unwrap();
        assert_eq!(t.translated, "g.V().has(\"name\", \"x\")");
    }

    #[test]
    fn test_translate_all() {
        let outputs = Translator::default().translate_all("g.inject(0..5)").unwrap();
        assert_eq!(outputs.len(), Mode::ALL.len());
        let groovy = outputs
            .iter()
            .find(|(mode, _)| *mode == Mode::Target(Language::Groovy))
            .unwrap();
        assert_eq!(groovy.1.as_ref().unwrap(), "g.inject(0..5)");
        let java = outputs
            .iter()
            .find(|(mode, _)| *mode == Mode::Target(Language::Java))
            .unwrap();
        assert!(java.1.as_ref().unwrap_err().is_unsupported());
    }

    #[test]
    fn test_translator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Translator>();
    }
}
