//! Translator configuration.

use tinkerglot_adapters::query::gremlin::ast::QuoteStyle;

/// Traversal source name used when none is configured.
pub const DEFAULT_SOURCE_NAME: &str = "g";

/// Options for a [`Translator`](crate::Translator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name rendered for the traversal source token.
    pub source_name: String,
    /// Delimiter forced onto every quoted string. `None` keeps each string's
    /// original delimiter.
    pub quote_style: Option<QuoteStyle>,
}

impl Config {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rendered traversal source name.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Forces one string delimiter. [`QuoteStyle::Bare`] is ignored; bare
    /// map keys stay bare.
    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = (style != QuoteStyle::Bare).then_some(style);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_SOURCE_NAME.to_string(),
            quote_style: None,
        }
    }
}
