//! Literal anonymization.
//!
//! Replaces every literal constant of a canonical tree with a placeholder
//! identifier `<tag><index>`, e.g. `string0` or `map1`. Each type tag counts
//! from zero in order of first occurrence, and equal values share one
//! placeholder across the whole tree. Lists, sets, maps and ranges are
//! replaced as a single unit.
//!
//! Identifiers, enum members and type names are left alone. All state lives
//! in one [`Anonymizer`] and is dropped with it.

use hashbrown::HashMap;
use tinkerglot_adapters::query::gremlin::ast::{
    Call, Collection, Literal, Node, NumberKind, NumberLiteral, Query, StrategyConfig,
    VertexLiteral,
};

/// Value identity used for de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ValueKey {
    Null,
    Bool(bool),
    Text(String),
    Integer(NumberKind, i128),
    Float(NumberKind, u64),
    Decimal(NumberKind, String),
    NaN,
    PosInfinity,
    NegInfinity,
    Date(i64),
    Range(Box<ValueKey>, Box<ValueKey>),
    Collection(Node),
}

/// Where a literal sits, for the positions where `null` stands in for a
/// string.
#[derive(Debug, Clone, Copy)]
struct Position<'a> {
    step: &'a str,
    index: usize,
}

impl Position<'_> {
    fn is_string_typed(self) -> bool {
        self.step == "hasLabel" || (self.step == "has" && self.index == 0)
    }
}

/// Anonymizes a canonical query.
pub fn anonymize(query: &Query) -> Query {
    Anonymizer::new().query(query)
}

/// Per-call placeholder cache and counters.
#[derive(Debug, Default)]
pub struct Anonymizer {
    cache: HashMap<(&'static str, ValueKey), String>,
    counters: HashMap<&'static str, usize>,
}

impl Anonymizer {
    /// Creates an empty anonymizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anonymizes a whole query.
    pub fn query(&mut self, query: &Query) -> Query {
        Query {
            root: query.root.as_ref().map(|root| self.node(root, None)),
        }
    }

    fn node(&mut self, node: &Node, position: Option<Position<'_>>) -> Node {
        match node {
            Node::Call(call) => Node::Call(self.call(call)),
            Node::Anonymous(inner) => Node::Anonymous(Box::new(self.node(inner, None))),
            Node::Literal(literal) => self.literal(literal, position),
            Node::Collection(collection) => {
                let tag = match collection {
                    Collection::List(_) => "list",
                    Collection::Set(_) => "set",
                    Collection::Map(_) => "map",
                };
                self.placeholder(tag, ValueKey::Collection(node.clone()))
            }
            Node::Strategy(StrategyConfig { name, entries }) => Node::Strategy(StrategyConfig {
                name: name.clone(),
                entries: entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.node(value, None)))
                    .collect(),
            }),
            Node::Vertex(VertexLiteral { id, label }) => Node::Vertex(VertexLiteral {
                id: Box::new(self.node(id, None)),
                label: label.as_ref().map(|label| Box::new(self.node(label, None))),
            }),
            Node::Identifier(_) | Node::EnumRef(_) | Node::TypeRef(_) => node.clone(),
        }
    }

    fn call(&mut self, call: &Call) -> Call {
        let receiver = call.receiver.as_ref().map(|r| Box::new(self.node(r, None)));
        let args = call
            .args
            .iter()
            .enumerate()
            .map(|(index, arg)| {
                let position = Position {
                    step: &call.name,
                    index,
                };
                self.node(arg, Some(position))
            })
            .collect();
        Call {
            receiver,
            name: call.name.clone(),
            args,
        }
    }

    fn literal(&mut self, literal: &Literal, position: Option<Position<'_>>) -> Node {
        let (tag, key) = match literal {
            Literal::Null => {
                let tag = if position.is_some_and(Position::is_string_typed) {
                    "string"
                } else {
                    "object"
                };
                (tag, ValueKey::Null)
            }
            Literal::Bool(b) => ("boolean", ValueKey::Bool(*b)),
            Literal::String(s) => ("string", ValueKey::Text(s.value.clone())),
            Literal::Number(n) => (number_tag(n), number_key(n)),
            Literal::NaN => ("number", ValueKey::NaN),
            Literal::PosInfinity => ("number", ValueKey::PosInfinity),
            Literal::NegInfinity => ("number", ValueKey::NegInfinity),
            Literal::DateTime(d) => ("date", ValueKey::Date(d.epoch_millis)),
            Literal::Range(r) => (
                "range",
                ValueKey::Range(Box::new(number_key(&r.start)), Box::new(number_key(&r.end))),
            ),
        };
        self.placeholder(tag, key)
    }

    fn placeholder(&mut self, tag: &'static str, key: ValueKey) -> Node {
        let name = self
            .cache
            .entry((tag, key))
            .or_insert_with(|| {
                let counter = self.counters.entry(tag).or_insert(0);
                let name = format!("{tag}{counter}");
                *counter += 1;
                name
            })
            .clone();
        Node::Identifier(name)
    }
}

/// Numeric identity: `1.0d`, `1.00d` and `1.0D` are one value, as are `1`
/// and `01`.
fn number_key(n: &NumberLiteral) -> ValueKey {
    let kind = n.kind();
    match kind {
        NumberKind::Float | NumberKind::Double | NumberKind::UntypedFloat => n
            .digits
            .parse::<f64>()
            .map_or_else(|_| ValueKey::Decimal(kind, normalize_decimal(&n.digits)), |v| {
                ValueKey::Float(kind, v.to_bits())
            }),
        NumberKind::BigDecimal => ValueKey::Decimal(kind, normalize_decimal(&n.digits)),
        NumberKind::Byte
        | NumberKind::Short
        | NumberKind::Int
        | NumberKind::Long
        | NumberKind::BigInt
        | NumberKind::UntypedInteger => n.digits.parse::<i128>().map_or_else(
            |_| ValueKey::Decimal(kind, normalize_decimal(&n.digits)),
            |v| ValueKey::Integer(kind, v),
        ),
    }
}

/// Drops leading integer zeros and trailing fraction zeros.
fn normalize_decimal(digits: &str) -> String {
    let (sign, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let (int_part, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let fraction = fraction.trim_end_matches('0');

    let mut out = format!("{sign}{int_part}");
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    if let Some(exponent) = exponent {
        let exponent = exponent.parse::<i64>().map_or_else(|_| exponent.to_string(), |e| e.to_string());
        if exponent != "0" {
            out.push('e');
            out.push_str(&exponent);
        }
    }
    out
}

fn number_tag(n: &NumberLiteral) -> &'static str {
    match n.kind() {
        NumberKind::Byte => "byte",
        NumberKind::Short => "short",
        NumberKind::Int => "integer",
        NumberKind::Long => "long",
        NumberKind::BigInt => "biginteger",
        NumberKind::Float => "float",
        NumberKind::Double => "double",
        NumberKind::BigDecimal => "bigdecimal",
        NumberKind::UntypedInteger | NumberKind::UntypedFloat => "number",
    }
}
