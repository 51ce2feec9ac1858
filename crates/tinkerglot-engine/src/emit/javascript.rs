//! JavaScript source for gremlin-javascript.

use tinkerglot_adapters::query::gremlin::ast::{DateTimeLiteral, NumberLiteral, StringLiteral};
use tinkerglot_common::Language;

use super::{StepSite, Syntax, double_quoted, escape_keyword};

/// Step and parameter names that collide with JavaScript keywords.
const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "finally", "for", "from", "function", "if", "import", "in",
    "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try", "typeof",
    "var", "void", "while", "with", "yield",
];

/// gremlin-javascript.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScript;

impl Syntax for JavaScript {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn step_name(&self, site: &StepSite<'_>) -> String {
        escape_keyword(site.name, RESERVED)
    }

    fn static_method(&self, owner: &str, method: &str) -> String {
        let owner = if owner == "Cardinality" {
            "CardinalityValue"
        } else {
            owner
        };
        format!("{owner}.{method}")
    }

    fn number(&self, n: &NumberLiteral) -> String {
        n.digits.clone()
    }

    fn nan(&self) -> String {
        "Number.NaN".to_string()
    }

    fn infinity(&self, negative: bool) -> String {
        let name = if negative {
            "Number.NEGATIVE_INFINITY"
        } else {
            "Number.POSITIVE_INFINITY"
        };
        name.to_string()
    }

    fn string(&self, s: &StringLiteral) -> String {
        double_quoted(&s.value)
    }

    fn datetime(&self, d: &DateTimeLiteral) -> String {
        format!("new Date({})", d.epoch_millis)
    }

    fn set(&self, items: Vec<String>) -> String {
        if items.is_empty() {
            "new Set()".to_string()
        } else {
            format!("new Set([{}])", items.join(", "))
        }
    }

    fn map(&self, entries: Vec<(String, String)>) -> String {
        if entries.is_empty() {
            return "new Map()".to_string();
        }
        let body: Vec<String> = entries.into_iter().map(|(k, v)| format!("[{k}, {v}]")).collect();
        format!("new Map([{}])", body.join(", "))
    }

    fn strategy(&self, name: &str, entries: &[(String, String)]) -> String {
        if entries.is_empty() {
            return self.strategy_instance(name);
        }
        let body: Vec<String> = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        format!("new {name}({{{}}})", body.join(", "))
    }

    fn strategy_instance(&self, name: &str) -> String {
        format!("new {name}()")
    }

    fn keywords(&self) -> &'static [&'static str] {
        RESERVED
    }
}
