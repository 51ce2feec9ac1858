//! Gremlin Abstract Syntax Tree.
//!
//! The parser produces this tree and every later pass (canonicalization,
//! parameter extraction, anonymization, emission) consumes it. Trees are
//! plain owned values; a pass that changes a tree returns a new one.

use smallvec::SmallVec;

/// A parsed traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    /// The outermost call chain, or `None` for the bare traversal source.
    pub root: Option<Node>,
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A step or a static method invocation.
    Call(Call),
    /// A scalar literal.
    Literal(Literal),
    /// A list, set or map literal.
    Collection(Collection),
    /// A bare name. After canonicalization this is always a bound parameter.
    Identifier(String),
    /// A member of an enumeration type, e.g. `T.id`.
    EnumRef(EnumRef),
    /// A type name used on its own, e.g. `ReadOnlyStrategy` or the `P` of
    /// `P.gt(1)`.
    TypeRef(String),
    /// A traversal rooted at the anonymous marker `__`.
    Anonymous(Box<Node>),
    /// A configured strategy instance, e.g. `new SeedStrategy(seed: 1)`.
    Strategy(StrategyConfig),
    /// A vertex reference, e.g. `new Vertex(1, 'person')`.
    Vertex(VertexLiteral),
}

/// A call in a chain.
///
/// `receiver` is `None` when the call hangs directly off the root token:
/// the traversal source at the top level, `__` inside an anonymous span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Call {
    /// What the call is invoked on.
    pub receiver: Option<Box<Node>>,
    /// Step or method name as written.
    pub name: String,
    /// Arguments in order.
    pub args: Vec<Node>,
}

impl Call {
    /// Creates a call.
    pub fn new(receiver: Option<Node>, name: impl Into<String>, args: Vec<Node>) -> Self {
        Self {
            receiver: receiver.map(Box::new),
            name: name.into(),
            args,
        }
    }

    /// Returns the calls of the chain from the root outward.
    ///
    /// The walk stops at the first receiver that is not itself a call (a
    /// `TypeRef` owner of a static call, for instance).
    pub fn chain(&self) -> Vec<&Call> {
        let mut calls = vec![self];
        let mut current = self;
        while let Some(Node::Call(inner)) = current.receiver.as_deref() {
            calls.push(inner);
            current = inner;
        }
        calls.reverse();
        calls
    }

    /// Returns the non-call node the chain starts from, if any.
    pub fn chain_base(&self) -> Option<&Node> {
        let mut current = self;
        loop {
            match current.receiver.as_deref() {
                Some(Node::Call(inner)) => current = inner,
                other => return other,
            }
        }
    }
}

/// An enumeration member such as `T.id` or `IO.graphml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumRef {
    /// Owning type, possibly qualified (`["T"]`).
    pub owner_path: SmallVec<[String; 1]>,
    /// Member name as written.
    pub member: String,
}

impl EnumRef {
    /// Creates a reference with a single-segment owner.
    pub fn new(owner: impl Into<String>, member: impl Into<String>) -> Self {
        let mut owner_path = SmallVec::new();
        owner_path.push(owner.into());
        Self {
            owner_path,
            member: member.into(),
        }
    }

    /// Last segment of the owner path.
    pub fn owner(&self) -> &str {
        self.owner_path.last().map_or("", String::as_str)
    }
}

/// A strategy with configuration entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrategyConfig {
    /// Strategy class name.
    pub name: String,
    /// Configuration keys and values in source order.
    pub entries: Vec<(String, Node)>,
}

/// `new Vertex(id)` or `new Vertex(id, label)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLiteral {
    /// Vertex id.
    pub id: Box<Node>,
    /// Optional vertex label.
    pub label: Option<Box<Node>>,
}

/// Collection literals. Map entries keep source order and are never
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `[a, b]`
    List(Vec<Node>),
    /// `{a, b}`
    Set(Vec<Node>),
    /// `[k: v]`
    Map(Vec<MapEntry>),
}

/// One `key:value` pair of a map literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapEntry {
    /// Entry key.
    pub key: Node,
    /// Entry value.
    pub value: Node,
    /// The key was written as `(key)`.
    pub parenthesized: bool,
}

impl MapEntry {
    /// Creates an entry with an unparenthesized key.
    pub fn new(key: Node, value: Node) -> Self {
        Self {
            key,
            value,
            parenthesized: false,
        }
    }
}

/// Delimiter a string was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    /// `'text'`
    Single,
    /// `"text"`
    Double,
    /// Unquoted map key, as in `[name: 1]`.
    Bare,
}

/// A string literal. `value` is always unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringLiteral {
    /// Unescaped text.
    pub value: String,
    /// Original delimiter.
    pub quote: QuoteStyle,
}

impl StringLiteral {
    /// Creates a single-quoted string.
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: QuoteStyle::Single,
        }
    }

    /// Creates a double-quoted string.
    pub fn double(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: QuoteStyle::Double,
        }
    }
}

/// Numeric type selected by a literal's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// `b`
    Byte,
    /// `s`
    Short,
    /// `i`
    Int,
    /// `l`
    Long,
    /// `n`
    BigInt,
    /// `f`
    Float,
    /// `d`
    Double,
    /// `m`
    BigDecimal,
    /// Integer digits without a suffix.
    UntypedInteger,
    /// Fractional or exponent digits without a suffix.
    UntypedFloat,
}

/// A numeral as written. `digits` keeps the sign and exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberLiteral {
    /// Digits including sign, fraction and exponent.
    pub digits: String,
    /// Type suffix character as written.
    pub suffix: Option<char>,
}

impl NumberLiteral {
    /// Creates a numeral.
    pub fn new(digits: impl Into<String>, suffix: Option<char>) -> Self {
        Self {
            digits: digits.into(),
            suffix,
        }
    }

    /// Returns the numeric type of this literal.
    pub fn kind(&self) -> NumberKind {
        match self.suffix.map(|c| c.to_ascii_lowercase()) {
            Some('b') => NumberKind::Byte,
            Some('s') => NumberKind::Short,
            Some('i') => NumberKind::Int,
            Some('l') => NumberKind::Long,
            Some('n') => NumberKind::BigInt,
            Some('f') => NumberKind::Float,
            Some('d') => NumberKind::Double,
            Some('m') => NumberKind::BigDecimal,
            _ if self.is_integral() => NumberKind::UntypedInteger,
            _ => NumberKind::UntypedFloat,
        }
    }

    /// True when the digits carry no fraction or exponent.
    pub fn is_integral(&self) -> bool {
        !self.digits.contains(['.', 'e', 'E'])
    }
}

/// `datetime('...')`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTimeLiteral {
    /// The ISO-8601 text as written.
    pub text: StringLiteral,
    /// Milliseconds since the Unix epoch, UTC.
    pub epoch_millis: i64,
}

impl DateTimeLiteral {
    /// Parses the text of a `datetime(...)` argument.
    ///
    /// Accepts RFC 3339 timestamps, offsets without a colon, local date-times
    /// (taken as UTC) and bare dates (midnight UTC).
    pub fn from_text(text: StringLiteral) -> Option<Self> {
        let epoch_millis = parse_epoch_millis(&text.value)?;
        Some(Self { text, epoch_millis })
    }
}

fn parse_epoch_millis(text: &str) -> Option<i64> {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.timestamp_millis());
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// An integer range `start..end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeLiteral {
    /// Lower bound.
    pub start: NumberLiteral,
    /// Upper bound.
    pub end: NumberLiteral,
}

/// Scalar literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// A quoted string.
    String(StringLiteral),
    /// A numeral.
    Number(NumberLiteral),
    /// `NaN`
    NaN,
    /// `Infinity`
    PosInfinity,
    /// `-Infinity`
    NegInfinity,
    /// `datetime('...')`
    DateTime(DateTimeLiteral),
    /// `a..b`
    Range(RangeLiteral),
}

/// Classification of a [`Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `null`
    Null,
    /// Boolean
    Bool,
    /// String
    String,
    /// 8-bit integer
    Int8,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// Arbitrary precision integer
    BigInt,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Arbitrary precision decimal
    BigDecimal,
    /// Integer without a suffix
    UntypedInteger,
    /// Float without a suffix
    UntypedFloat,
    /// Not a number
    NaN,
    /// Positive infinity
    PosInfinity,
    /// Negative infinity
    NegInfinity,
    /// Point in time
    DateTime,
    /// Integer range
    Range,
}

impl Literal {
    /// Returns the kind of this literal.
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Null => LiteralKind::Null,
            Literal::Bool(_) => LiteralKind::Bool,
            Literal::String(_) => LiteralKind::String,
            Literal::Number(n) => match n.kind() {
                NumberKind::Byte => LiteralKind::Int8,
                NumberKind::Short => LiteralKind::Int16,
                NumberKind::Int => LiteralKind::Int32,
                NumberKind::Long => LiteralKind::Int64,
                NumberKind::BigInt => LiteralKind::BigInt,
                NumberKind::Float => LiteralKind::Float32,
                NumberKind::Double => LiteralKind::Float64,
                NumberKind::BigDecimal => LiteralKind::BigDecimal,
                NumberKind::UntypedInteger => LiteralKind::UntypedInteger,
                NumberKind::UntypedFloat => LiteralKind::UntypedFloat,
            },
            Literal::NaN => LiteralKind::NaN,
            Literal::PosInfinity => LiteralKind::PosInfinity,
            Literal::NegInfinity => LiteralKind::NegInfinity,
            Literal::DateTime(_) => LiteralKind::DateTime,
            Literal::Range(_) => LiteralKind::Range,
        }
    }
}

impl Node {
    /// Shorthand for a single-quoted string literal node.
    pub fn string(value: impl Into<String>) -> Self {
        Node::Literal(Literal::String(StringLiteral::single(value)))
    }

    /// Shorthand for a numeral node.
    pub fn number(digits: impl Into<String>, suffix: Option<char>) -> Self {
        Node::Literal(Literal::Number(NumberLiteral::new(digits, suffix)))
    }

    /// Shorthand for a call node.
    pub fn call(receiver: Option<Node>, name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call(Call::new(receiver, name, args))
    }

    /// Returns the literal, if this node is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_kinds() {
        assert_eq!(NumberLiteral::new("1", None).kind(), NumberKind::UntypedInteger);
        assert_eq!(NumberLiteral::new("1.0", None).kind(), NumberKind::UntypedFloat);
        assert_eq!(NumberLiteral::new("1e3", None).kind(), NumberKind::UntypedFloat);
        assert_eq!(NumberLiteral::new("1", Some('L')).kind(), NumberKind::Long);
        assert_eq!(NumberLiteral::new("1", Some('m')).kind(), NumberKind::BigDecimal);
    }

    #[test]
    fn test_literal_kind() {
        let lit = Literal::Number(NumberLiteral::new("-1", Some('b')));
        assert_eq!(lit.kind(), LiteralKind::Int8);
        assert_eq!(Literal::NegInfinity.kind(), LiteralKind::NegInfinity);
    }

    #[test]
    fn test_datetime_formats() {
        let utc = DateTimeLiteral::from_text(StringLiteral::single("2023-08-02T00:00:00Z"));
        assert_eq!(utc.map(|d| d.epoch_millis), Some(1_690_934_400_000));

        let date = DateTimeLiteral::from_text(StringLiteral::single("2023-08-02"));
        assert_eq!(date.map(|d| d.epoch_millis), Some(1_690_934_400_000));

        let offset = DateTimeLiteral::from_text(StringLiteral::single("2023-08-02T02:00:00+02:00"));
        assert_eq!(offset.map(|d| d.epoch_millis), Some(1_690_934_400_000));

        assert!(DateTimeLiteral::from_text(StringLiteral::single("yesterday")).is_none());
    }

    #[test]
    fn test_call_chain_order() {
        let v = Call::new(None, "V", vec![]);
        let out = Call::new(Some(Node::Call(v)), "out", vec![]);
        let names: Vec<&str> = out.chain().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["V", "out"]);
        assert!(out.chain_base().is_none());
    }
}
