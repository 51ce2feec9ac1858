//! Go source for gremlingo.

use tinkerglot_adapters::query::gremlin::ast::{
    DateTimeLiteral, EnumRef, NumberLiteral, StringLiteral,
};
use tinkerglot_common::Language;

use super::{ArgSite, StepSite, Syntax, double_quoted, pascal_case};
use crate::vocabulary::vocabulary;

const PACKAGE: &str = "gremlingo";

/// Go keywords, which no parameter may be named.
const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
    "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// gremlingo.
#[derive(Debug, Clone, Copy, Default)]
pub struct Go;

impl Syntax for Go {
    fn language(&self) -> Language {
        Language::Go
    }

    fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
    }

    fn step_name(&self, site: &StepSite<'_>) -> String {
        pascal_case(site.name)
    }

    fn anonymous_prefix(&self) -> &'static str {
        "gremlingo.T__"
    }

    fn static_method(&self, owner: &str, method: &str) -> String {
        let owner = if owner == "Cardinality" {
            "CardinalityValue"
        } else {
            owner
        };
        format!("{}.{}", qualified(owner), pascal_case(method))
    }

    fn enum_ref(&self, e: &EnumRef) -> String {
        format!(
            "{}.{}",
            qualified(&e.owner_path.join(".")),
            pascal_case(&e.member)
        )
    }

    fn null(&self, _site: Option<&ArgSite<'_>>) -> String {
        "nil".to_string()
    }

    fn number(&self, n: &NumberLiteral) -> String {
        n.digits.clone()
    }

    fn nan(&self) -> String {
        "math.NaN()".to_string()
    }

    fn infinity(&self, negative: bool) -> String {
        format!("math.Inf({})", if negative { -1 } else { 1 })
    }

    fn string(&self, s: &StringLiteral) -> String {
        double_quoted(&s.value)
    }

    fn datetime(&self, d: &DateTimeLiteral) -> String {
        format!("time.UnixMilli({})", d.epoch_millis)
    }

    fn list(&self, items: Vec<String>) -> String {
        format!("[]interface{{}}{{{}}}", items.join(", "))
    }

    fn set(&self, items: Vec<String>) -> String {
        format!("{PACKAGE}.NewSimpleSet({})", items.join(", "))
    }

    fn map(&self, entries: Vec<(String, String)>) -> String {
        if entries.is_empty() {
            return "map[interface{}]interface{}{}".to_string();
        }
        let body: Vec<String> = entries.into_iter().map(|(k, v)| format!("{k}: {v}")).collect();
        format!("map[interface{{}}]interface{{}}{{{} }}", body.join(", "))
    }

    fn strategy(&self, name: &str, entries: &[(String, String)]) -> String {
        if entries.is_empty() {
            return self.strategy_instance(name);
        }
        let body: Vec<String> = entries
            .iter()
            .map(|(k, v)| format!("{}: {v}", pascal_case(k)))
            .collect();
        format!("{PACKAGE}.{name}({PACKAGE}.{name}Config{{{}}})", body.join(", "))
    }

    fn strategy_list(&self, strategy: &str, key: &str, items: &[String]) -> Option<String> {
        (strategy == "PartitionStrategy" && key == "readPartitions")
            .then(|| format!("{PACKAGE}.NewSimpleSet({})", items.join(", ")))
    }

    fn strategy_instance(&self, name: &str) -> String {
        format!("{PACKAGE}.{name}()")
    }

    fn vertex(&self, id: String, label: Option<String>) -> String {
        match label {
            Some(label) => format!("{PACKAGE}.Vertex{{Element{{{id}, {label}}}}}"),
            None => format!("{PACKAGE}.Vertex{{Element{{{id}}}}}"),
        }
    }
}

/// Prefixes driver-owned types with the package name.
fn qualified(owner: &str) -> String {
    if vocabulary().is_go_prefixed(owner) {
        format!("{PACKAGE}.{owner}")
    } else {
        owner.to_string()
    }
}
