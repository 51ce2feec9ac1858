//! Java source for gremlin-driver.

use tinkerglot_adapters::query::gremlin::ast::{
    DateTimeLiteral, NumberKind, NumberLiteral, StringLiteral,
};
use tinkerglot_common::Language;

use super::{Syntax, double_quoted};

/// Java keywords, which no parameter may be named.
const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Java.
#[derive(Debug, Clone, Copy, Default)]
pub struct Java;

impl Syntax for Java {
    fn language(&self) -> Language {
        Language::Java
    }

    fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
    }

    fn number(&self, n: &NumberLiteral) -> String {
        let digits = &n.digits;
        match n.kind() {
            NumberKind::Byte => format!("new Byte({digits})"),
            NumberKind::Short => format!("new Short({digits})"),
            NumberKind::Long => format!("{digits}l"),
            NumberKind::BigInt => format!("new BigInteger(\"{digits}\")"),
            NumberKind::Float => format!("{digits}f"),
            NumberKind::Double => format!("{digits}d"),
            NumberKind::BigDecimal => format!("new BigDecimal(\"{digits}\")"),
            NumberKind::Int | NumberKind::UntypedInteger | NumberKind::UntypedFloat => {
                digits.clone()
            }
        }
    }

    fn nan(&self) -> String {
        "Double.NaN".to_string()
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
        double_quoted(&s.value)
    }

    fn datetime(&self, d: &DateTimeLiteral) -> String {
        format!("new Date({})", d.epoch_millis)
    }

    fn list(&self, items: Vec<String>) -> String {
        anonymous_subclass("new ArrayList<Object>()", items.iter().map(|i| format!("add({i});")))
    }

    fn set(&self, items: Vec<String>) -> String {
        anonymous_subclass("new HashSet<Object>()", items.iter().map(|i| format!("add({i});")))
    }

    fn map(&self, entries: Vec<(String, String)>) -> String {
        anonymous_subclass(
            "new LinkedHashMap<Object, Object>()",
            entries.iter().map(|(k, v)| format!("put({k}, {v});")),
        )
    }

    fn strategy(&self, name: &str, entries: &[(String, String)]) -> String {
        if entries.is_empty() {
            return self.strategy_instance(name);
        }
        let mut out = format!("{name}.build()");
        for (key, value) in entries {
            out.push_str(&format!(".{key}({value})"));
        }
        out.push_str(".create()");
        out
    }

    fn strategy_instance(&self, name: &str) -> String {
        format!("{name}.instance()")
    }

    fn strategy_class(&self, name: &str) -> String {
        format!("{name}.class")
    }

    fn vertex(&self, id: String, label: Option<String>) -> String {
        match label {
            Some(label) => format!("new ReferenceVertex({id}, {label})"),
            None => format!("new ReferenceVertex({id})"),
        }
    }
}

/// `new T() {{ stmt; stmt; }}`, or just `new T()` when there is nothing to
/// add.
fn anonymous_subclass(constructor: &str, statements: impl Iterator<Item = String>) -> String {
    let body: Vec<String> = statements.collect();
    if body.is_empty() {
        constructor.to_string()
    } else {
        format!("{constructor} {{{{ {} }}}}", body.join(" "))
    }
}
