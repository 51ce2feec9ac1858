//! Python source for gremlin-python.

use tinkerglot_adapters::query::gremlin::ast::{
    DateTimeLiteral, EnumRef, NumberKind, NumberLiteral, StringLiteral,
};
use tinkerglot_common::Language;

use super::{ArgSite, StepSite, Syntax, escape_keyword, escape_string, snake_case};
use crate::vocabulary::vocabulary;

/// Names that collide with Python keywords or builtins once snake-cased.
const RESERVED: &[&str] = &[
    "all", "and", "any", "as", "filter", "from", "global", "id", "in", "is", "list", "max", "min",
    "none", "not", "or", "range", "set", "sum", "with",
];

/// Python keywords, which no parameter may be named.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// gremlin-python.
#[derive(Debug, Clone, Copy, Default)]
pub struct Python;

impl Syntax for Python {
    fn language(&self) -> Language {
        Language::Python
    }

    fn step_name(&self, site: &StepSite<'_>) -> String {
        pythonic(site.name)
    }

    fn static_method(&self, owner: &str, method: &str) -> String {
        let owner = if owner == "Cardinality" {
            "CardinalityValue"
        } else {
            owner
        };
        format!("{owner}.{}", pythonic(method))
    }

    fn enum_ref(&self, e: &EnumRef) -> String {
        format!("{}.{}", e.owner_path.join("."), pythonic(&e.member))
    }

    fn null(&self, _site: Option<&ArgSite<'_>>) -> String {
        "None".to_string()
    }

    fn boolean(&self, value: bool) -> String {
        let text = if value { "True" } else { "False" };
        text.to_string()
    }

    fn number(&self, n: &NumberLiteral) -> String {
        let digits = &n.digits;
        match n.kind() {
            NumberKind::Long => format!("long({digits})"),
            NumberKind::UntypedInteger if digits.parse::<i32>().is_err() => {
                format!("long({digits})")
            }
            _ => digits.clone(),
        }
    }

    fn nan(&self) -> String {
        "float('nan')".to_string()
    }

    fn infinity(&self, negative: bool) -> String {
        let text = if negative { "float('-inf')" } else { "float('inf')" };
        text.to_string()
    }

    fn string(&self, s: &StringLiteral) -> String {
        single_quoted(&s.value)
    }

    fn datetime(&self, d: &DateTimeLiteral) -> String {
        format!(
            "datetime.datetime.utcfromtimestamp({} / 1000.0)",
            d.epoch_millis
        )
    }

    fn set(&self, items: Vec<String>) -> String {
        if items.is_empty() {
            "set()".to_string()
        } else {
            format!("{{{}}}", items.join(", "))
        }
    }

    fn map(&self, entries: Vec<(String, String)>) -> String {
        if entries.is_empty() {
            return "{}".to_string();
        }
        let body: Vec<String> = entries.into_iter().map(|(k, v)| format!("{k}: {v}")).collect();
        format!("{{ {} }}", body.join(", "))
    }

    fn strategy(&self, name: &str, entries: &[(String, String)]) -> String {
        let body: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{}={v}", snake_case(k)))
            .collect();
        format!("{name}({})", body.join(", "))
    }

    fn strategy_instance(&self, name: &str) -> String {
        format!("{name}()")
    }

    fn strategy_class(&self, name: &str) -> String {
        vocabulary().strategy_class_name(name).map_or_else(
            || name.to_string(),
            |class| format!("GremlinType({})", single_quoted(&class)),
        )
    }

    fn vertex(&self, id: String, label: Option<String>) -> String {
        match label {
            Some(label) => format!("Vertex({id}, {label})"),
            None => format!("Vertex({id})"),
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
    }

    fn identifier(&self, name: &str) -> String {
        escape_reserved(escape_keyword(name, KEYWORDS))
    }

    fn join_args(&self, step: &str, parts: Vec<String>) -> String {
        if step == "withoutStrategies" && !parts.is_empty() {
            format!("*[{}]", parts.join(", "))
        } else {
            parts.join(", ")
        }
    }
}

/// Snake case plus a trailing underscore for reserved words.
fn pythonic(name: &str) -> String {
    escape_reserved(snake_case(name))
}

fn escape_reserved(name: String) -> String {
    if RESERVED.contains(&name.as_str()) {
        name + "_"
    } else {
        name
    }
}

fn single_quoted(value: &str) -> String {
    format!("'{}'", escape_string(value, &['\'', '"']))
}
