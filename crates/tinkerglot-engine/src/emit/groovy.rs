//! Groovy source for the Gremlin console and script engines.

use chrono::{DateTime, SecondsFormat};
use tinkerglot_adapters::query::gremlin::ast::{
    DateTimeLiteral, MapEntry, NumberKind, NumberLiteral, QuoteStyle, RangeLiteral, StringLiteral,
};
use tinkerglot_common::Language;
use tinkerglot_common::utils::error::Result;

use super::{ArgSite, Syntax, escape_string, key_as_written, quote_as_written};

/// Groovy keywords, which no parameter may be named.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "def", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "goto", "if", "implements", "import", "in", "instanceof",
    "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
    "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "threadsafe", "throw", "throws", "trait", "transient", "true", "try", "var", "void",
    "volatile", "while",
];

/// Groovy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Groovy;

impl Syntax for Groovy {
    fn language(&self) -> Language {
        Language::Groovy
    }

    fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
    }

    fn null(&self, site: Option<&ArgSite<'_>>) -> String {
        match site {
            Some(site) if site.step == "inject" && site.index > 0 => "(Object) null".to_string(),
            _ => "null".to_string(),
        }
    }

    fn number(&self, n: &NumberLiteral) -> String {
        let digits = &n.digits;
        match n.kind() {
            NumberKind::Byte => format!("(byte){digits}"),
            NumberKind::Short => format!("(short){digits}"),
            NumberKind::Int => format!("{digits}i"),
            NumberKind::Long => format!("{digits}l"),
            NumberKind::BigInt => format!("{digits}g"),
            NumberKind::Float => format!("{digits}f"),
            NumberKind::Double => format!("{digits}d"),
            NumberKind::BigDecimal | NumberKind::UntypedInteger | NumberKind::UntypedFloat => {
                digits.clone()
            }
        }
    }

    fn infinity(&self, negative: bool) -> String {
        let name = if negative {
            "Double.NEGATIVE_INFINITY"
        } else {
            "Double.POSITIVE_INFINITY"
        };
        name.to_string()
    }

    fn string(&self, s: &StringLiteral) -> String {
        match s.quote {
            // `$` starts interpolation inside double quotes.
            QuoteStyle::Double => format!("\"{}\"", escape_string(&s.value, &['"', '$'])),
            _ => quote_as_written(s),
        }
    }

    fn datetime(&self, d: &DateTimeLiteral) -> String {
        let text = DateTime::from_timestamp_millis(d.epoch_millis).map_or_else(
            || d.text.value.clone(),
            |dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        );
        format!("datetime('{}')", escape_string(&text, &['\'']))
    }

    fn range(&self, r: &RangeLiteral) -> Result<String> {
        Ok(format!("{}..{}", r.start.digits, r.end.digits))
    }

    fn map_key(&self, entry: &MapEntry, rendered: String) -> String {
        key_as_written(entry, rendered)
    }

    fn vertex(&self, id: String, label: Option<String>) -> String {
        match label {
            Some(label) => format!("new ReferenceVertex({id}, {label})"),
            None => format!("new ReferenceVertex({id})"),
        }
    }
}
