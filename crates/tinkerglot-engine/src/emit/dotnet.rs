//! C# source for Gremlin.Net.

use tinkerglot_adapters::query::gremlin::ast::{
    Collection, DateTimeLiteral, EnumRef, Literal, Node, NumberKind, NumberLiteral, StringLiteral,
};
use tinkerglot_common::Language;

use super::{ArgSite, StepOrigin, StepSite, Syntax, double_quoted, pascal_case};

/// Steps that take a single `<object>` type argument.
const OBJECT_GENERIC: &[&str] = &[
    "branch",
    "call",
    "cap",
    "choose",
    "coalesce",
    "constant",
    "elementMap",
    "flatMap",
    "groupCount",
    "io",
    "limit",
    "local",
    "map",
    "max",
    "mean",
    "min",
    "optional",
    "project",
    "properties",
    "range",
    "sack",
    "select",
    "skip",
    "sum",
    "tail",
    "unfold",
    "union",
    "value",
    "values",
];

/// Steps that take `<object, object>`.
const PAIR_GENERIC: &[&str] = &["group", "valueMap"];

const DICTIONARY_CAST: &str = "(IDictionary<object, object>) ";

/// C# keywords, which no parameter may be named.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Gremlin.Net.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotNet;

impl Syntax for DotNet {
    fn language(&self) -> Language {
        Language::DotNet
    }

    fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
    }

    fn step_name(&self, site: &StepSite<'_>) -> String {
        let name = pascal_case(site.name);
        let generic = if OBJECT_GENERIC.contains(&site.name)
            || (site.name == "fold" && site.origin == StepOrigin::Anonymous)
            || (site.name == "inject" && site.origin == StepOrigin::Source)
        {
            "<object>"
        } else if PAIR_GENERIC.contains(&site.name) {
            "<object, object>"
        } else {
            ""
        };
        format!("{name}{generic}")
    }

    fn static_method(&self, owner: &str, method: &str) -> String {
        format!("{}.{}", value_owner(owner), pascal_case(method))
    }

    fn enum_ref(&self, e: &EnumRef) -> String {
        format!("{}.{}", e.owner_path.join("."), member_name(&e.member))
    }

    fn null(&self, site: Option<&ArgSite<'_>>) -> String {
        let cast = site.and_then(|site| match (site.step, site.count, site.index) {
            ("hasLabel", 1, _) | ("has", 2, 0) => Some("(string) "),
            ("has", 2, 1) => Some("(object) "),
            _ => None,
        });
        format!("{}null", cast.unwrap_or(""))
    }

    fn number(&self, n: &NumberLiteral) -> String {
        let digits = &n.digits;
        match n.kind() {
            NumberKind::Byte => format!("(byte) {digits}"),
            NumberKind::Short => format!("(short) {digits}"),
            NumberKind::Long => format!("{digits}l"),
            NumberKind::Float => format!("{digits}f"),
            NumberKind::Double => format!("{digits}d"),
            NumberKind::BigDecimal => format!("(decimal) {digits}"),
            NumberKind::Int
            | NumberKind::BigInt
            | NumberKind::UntypedInteger
            | NumberKind::UntypedFloat => digits.clone(),
        }
    }

    fn nan(&self) -> String {
        "Double.NaN".to_string()
    }

    fn infinity(&self, negative: bool) -> String {
        let name = if negative {
            "Double.NegativeInfinity"
        } else {
            "Double.PositiveInfinity"
        };
        name.to_string()
    }

    fn string(&self, s: &StringLiteral) -> String {
        double_quoted(&s.value)
    }

    fn datetime(&self, d: &DateTimeLiteral) -> String {
        format!("DateTimeOffset.FromUnixTimeMilliseconds({})", d.epoch_millis)
    }

    fn list(&self, items: Vec<String>) -> String {
        initializer("new List<object>", &items)
    }

    fn set(&self, items: Vec<String>) -> String {
        initializer("new HashSet<object>", &items)
    }

    fn map(&self, entries: Vec<(String, String)>) -> String {
        if entries.is_empty() {
            return "new Dictionary<object, object>()".to_string();
        }
        let body: Vec<String> = entries
            .into_iter()
            .map(|(k, v)| format!("{{ {k}, {v} }}"))
            .collect();
        format!("new Dictionary<object, object> {{{}}}", body.join(", "))
    }

    fn strategy(&self, name: &str, entries: &[(String, String)]) -> String {
        let body: Vec<String> = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        format!("new {name}({})", body.join(", "))
    }

    fn strategy_list(&self, strategy: &str, key: &str, items: &[String]) -> Option<String> {
        (strategy == "PartitionStrategy" && key == "readPartitions")
            .then(|| initializer("new HashSet<string>", items))
    }

    fn strategy_instance(&self, name: &str) -> String {
        format!("new {name}()")
    }

    fn strategy_class(&self, name: &str) -> String {
        format!("typeof({name})")
    }

    fn wrap_arg(&self, site: &ArgSite<'_>, rendered: String) -> String {
        let cast = match (site.step, site.index, site.node) {
            ("mergeV" | "mergeE", 0, Node::Collection(Collection::Map(_)) | Node::Identifier(_))
                if site.count == 1 =>
            {
                DICTIONARY_CAST
            }
            ("option", 1, Node::Collection(Collection::Map(_))) => DICTIONARY_CAST,
            ("option", 1, Node::Anonymous(_)) => "(ITraversal) ",
            ("call", 0, Node::Literal(Literal::String(_))) if site.count == 1 => "(string) ",
            _ => "",
        };
        format!("{cast}{rendered}")
    }
}

fn initializer(prefix: &str, items: &[String]) -> String {
    if items.is_empty() {
        format!("{prefix}()")
    } else {
        format!("{prefix} {{ {} }}", items.join(", "))
    }
}

/// Owner of the static cardinality factories.
fn value_owner(owner: &str) -> &str {
    if owner == "Cardinality" {
        "CardinalityValue"
    } else {
        owner
    }
}

fn member_name(member: &str) -> String {
    match member {
        "graphml" => "GraphML".to_string(),
        "graphson" => "GraphSON".to_string(),
        m if !m.chars().any(char::is_lowercase) => {
            let mut chars = m.chars();
            let first: String = chars.next().into_iter().collect();
            first + &chars.as_str().to_lowercase()
        }
        m => pascal_case(m),
    }
}

#[cfg(test)]
mod tests {
    use tinkerglot_adapters::query::gremlin::parse;
    use tinkerglot_common::Language;

    use crate::{Config, canonicalize, emit};

    fn render(source: &str) -> String {
        let query = canonicalize(parse(source).unwrap(), &Config::default());
        emit(&query, Language::DotNet, "g").unwrap()
    }

    #[test]
    fn test_generic_steps() {
        assert_eq!(render("g.V().group()"), "g.V().Group<object, object>()");
        assert_eq!(
            render("g.V().project('k', 'v').by().by(__.values().fold())"),
            "g.V().Project<object>(\"k\", \"v\").By().By(__.Values<object>().Fold())"
        );
        assert_eq!(
            render("g.inject(null, null).inject(null, null)"),
            "g.Inject<object>(null, null).Inject(null, null)"
        );
        assert_eq!(render("g.V().fold().count(local)"), "g.V().Fold().Count(Scope.Local)");
    }

    #[test]
    fn test_casts() {
        assert_eq!(render("g.V().hasLabel(null)"), "g.V().HasLabel((string) null)");
        assert_eq!(render("g.V().has(null, null)"), "g.V().Has((string) null, (object) null)");
        assert_eq!(
            render("g.call('--list')"),
            "g.Call<object>((string) \"--list\")"
        );
        assert_eq!(
            render("g.mergeE(xx1).option(Merge.onCreate, __.select('c'))"),
            "g.MergeE((IDictionary<object, object>) xx1).Option(Merge.OnCreate, (ITraversal) __.Select<object>(\"c\"))"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            render("g.inject(1b, 1s, 1i, 1l, 1n, 1.0f, 1.0d, -1.0m, 1)"),
            "g.Inject<object>((byte) 1, (short) 1, 1, 1l, 1, 1.0f, 1.0d, (decimal) -1.0, 1)"
        );
        assert_eq!(
            render("g.with('x', [x:1, new:2])"),
            "g.With(\"x\", new Dictionary<object, object> {{ \"x\", 1 }, { \"new\", 2 }})"
        );
        assert_eq!(render("g.with('x', {1, 'x'})"), "g.With(\"x\", new HashSet<object> { 1, \"x\" })");
        assert_eq!(render("g.with('x', [])"), "g.With(\"x\", new List<object>())");
    }

    #[test]
    fn test_enums_and_strategies() {
        assert_eq!(
            render("g.io('a.xml').with(IO.reader, IO.graphml).read()"),
            "g.Io<object>(\"a.xml\").With(IO.Reader, IO.GraphML).Read()"
        );
        assert_eq!(render("g.V().to(Direction.OUT)"), "g.V().To(Direction.Out)");
        assert_eq!(
            render("g.withoutStrategies(ReadOnlyStrategy, FilterRankingStrategy)"),
            "g.WithoutStrategies(typeof(ReadOnlyStrategy), typeof(FilterRankingStrategy))"
        );
        assert_eq!(
            render("g.withStrategies(new PartitionStrategy(readPartitions: ['a', 'b']))"),
            "g.WithStrategies(new PartitionStrategy(readPartitions: new HashSet<string> { \"a\", \"b\" }))"
        );
    }

    #[test]
    fn test_keyword_parameters() {
        assert_eq!(
            render("g.V(class).out(function).limit(string)"),
            "g.V(class_).Out(function).Limit<object>(string_)"
        );
    }
}
