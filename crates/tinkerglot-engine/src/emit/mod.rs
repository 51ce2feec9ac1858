//! Rendering of canonical trees as source text.
//!
//! [`Renderer`] walks the tree once with an exhaustive match and asks a
//! [`Syntax`] for every token it writes. The trait's provided methods spell
//! the canonical query language itself; each target overrides only what it
//! spells differently.
//!
//! | target | module |
//! |--------|--------|
//! | Gremlin (canonical) | [`gremlin`] |
//! | .NET | [`dotnet`] |
//! | Go | [`go`] |
//! | Groovy | [`groovy`] |
//! | Java | [`java`] |
//! | JavaScript | [`javascript`] |
//! | Python | [`python`] |

pub mod dotnet;
pub mod go;
pub mod gremlin;
pub mod groovy;
pub mod java;
pub mod javascript;
pub mod python;

use tinkerglot_adapters::query::gremlin::ast::{
    Call, Collection, DateTimeLiteral, EnumRef, Literal, MapEntry, Node, NumberLiteral, Query,
    QuoteStyle, RangeLiteral, StringLiteral,
};
use tinkerglot_common::Language;
use tinkerglot_common::utils::error::{QueryError, Result};

/// How a step is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOrigin {
    /// First call on the traversal source.
    Source,
    /// First call of an anonymous traversal.
    Anonymous,
    /// Any later call in a chain.
    Chained,
}

/// A step about to be rendered.
#[derive(Debug, Clone, Copy)]
pub struct StepSite<'a> {
    /// Step name as written in the query language.
    pub name: &'a str,
    /// How the step is reached.
    pub origin: StepOrigin,
    /// The step's arguments.
    pub args: &'a [Node],
}

/// An argument about to be rendered.
#[derive(Debug, Clone, Copy)]
pub struct ArgSite<'a> {
    /// Name of the step the argument belongs to.
    pub step: &'a str,
    /// Position among the step's arguments.
    pub index: usize,
    /// Number of arguments the step has.
    pub count: usize,
    /// The argument itself.
    pub node: &'a Node,
}

/// Per-language spelling of every node kind.
///
/// The provided methods produce the canonical query language.
pub trait Syntax {
    /// Language this syntax renders.
    fn language(&self) -> Language;

    /// Step or chained method name.
    fn step_name(&self, site: &StepSite<'_>) -> String {
        site.name.to_string()
    }

    /// Source of anonymous traversals.
    fn anonymous_prefix(&self) -> &'static str {
        "__"
    }

    /// First call of a static chain such as `P.gt`.
    fn static_method(&self, owner: &str, method: &str) -> String {
        format!("{owner}.{method}")
    }

    /// Enumeration member.
    fn enum_ref(&self, e: &EnumRef) -> String {
        format!("{}.{}", e.owner_path.join("."), e.member)
    }

    /// Type name used on its own.
    fn type_ref(&self, name: &str) -> String {
        name.to_string()
    }

    /// `null`. `site` is set when the null is a step argument.
    fn null(&self, _site: Option<&ArgSite<'_>>) -> String {
        "null".to_string()
    }

    /// Boolean literal.
    fn boolean(&self, value: bool) -> String {
        value.to_string()
    }

    /// Numeral.
    fn number(&self, n: &NumberLiteral) -> String {
        match n.suffix {
            Some(suffix) => format!("{}{}", n.digits, suffix.to_ascii_lowercase()),
            None => n.digits.clone(),
        }
    }

    /// Not-a-number.
    fn nan(&self) -> String {
        "NaN".to_string()
    }

    /// Positive or negative infinity.
    fn infinity(&self, negative: bool) -> String {
        let text = if negative { "-Infinity" } else { "Infinity" };
        text.to_string()
    }

    /// String literal.
    fn string(&self, s: &StringLiteral) -> String {
        quote_as_written(s)
    }

    /// Point in time.
    fn datetime(&self, d: &DateTimeLiteral) -> String {
        format!("datetime({})", self.string(&d.text))
    }

    /// Integer range. Only targets with native range syntax override this.
    fn range(&self, _r: &RangeLiteral) -> Result<String> {
        Err(QueryError::unsupported(self.language().display_name(), "range literals").into())
    }

    /// List literal from rendered items.
    fn list(&self, items: Vec<String>) -> String {
        format!("[{}]", items.join(", "))
    }

    /// Set literal from rendered items.
    fn set(&self, items: Vec<String>) -> String {
        format!("{{{}}}", items.join(", "))
    }

    /// Map literal from rendered entries.
    fn map(&self, entries: Vec<(String, String)>) -> String {
        if entries.is_empty() {
            return "[:]".to_string();
        }
        let body: Vec<String> = entries.into_iter().map(|(k, v)| format!("{k}:{v}")).collect();
        format!("[{}]", body.join(", "))
    }

    /// Map key, given its entry and its rendering.
    fn map_key(&self, _entry: &MapEntry, rendered: String) -> String {
        rendered
    }

    /// Configured strategy from its name and rendered entries.
    fn strategy(&self, name: &str, entries: &[(String, String)]) -> String {
        let body: Vec<String> = entries.iter().map(|(k, v)| format!("{k}:{v}")).collect();
        format!("new {name}({})", body.join(", "))
    }

    /// Rendering of a list-valued strategy entry, when it differs from a
    /// plain list.
    fn strategy_list(&self, _strategy: &str, _key: &str, _items: &[String]) -> Option<String> {
        None
    }

    /// Strategy named bare in `withStrategies`.
    fn strategy_instance(&self, name: &str) -> String {
        self.type_ref(name)
    }

    /// Strategy named bare in `withoutStrategies`.
    fn strategy_class(&self, name: &str) -> String {
        self.type_ref(name)
    }

    /// Vertex reference from rendered id and label.
    fn vertex(&self, id: String, label: Option<String>) -> String {
        match label {
            Some(label) => format!("new Vertex({id}, {label})"),
            None => format!("new Vertex({id})"),
        }
    }

    /// Keywords a bound parameter must not be spelled as.
    fn keywords(&self) -> &'static [&'static str] {
        &[]
    }

    /// Bound parameter.
    fn identifier(&self, name: &str) -> String {
        escape_keyword(name, self.keywords())
    }

    /// Hook to decorate a rendered argument, e.g. with a cast.
    fn wrap_arg(&self, _site: &ArgSite<'_>, rendered: String) -> String {
        rendered
    }

    /// Joins rendered arguments of `step`.
    fn join_args(&self, _step: &str, parts: Vec<String>) -> String {
        parts.join(", ")
    }
}

/// Where a chain being rendered hangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChainRoot {
    Source,
    Anonymous,
    Argument,
}

/// Walks a canonical tree and renders it through a [`Syntax`].
pub struct Renderer<'a> {
    syntax: &'a dyn Syntax,
    source_name: &'a str,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer writing `source_name` for the traversal source.
    pub fn new(syntax: &'a dyn Syntax, source_name: &'a str) -> Self {
        Self {
            syntax,
            source_name,
        }
    }

    /// Renders a whole query.
    pub fn render(&self, query: &Query) -> Result<String> {
        match &query.root {
            None => Ok(self.source_name.to_string()),
            Some(root) => self.chain(root, ChainRoot::Source),
        }
    }

    fn chain(&self, node: &Node, root: ChainRoot) -> Result<String> {
        let Node::Call(call) = node else {
            return Err(QueryError::malformed("traversal root is not a call").into());
        };
        let calls = call.chain();
        let mut out = String::new();
        let mut rest = calls.as_slice();

        match call.chain_base() {
            None => {
                let origin = match root {
                    ChainRoot::Source => {
                        out.push_str(self.source_name);
                        StepOrigin::Source
                    }
                    ChainRoot::Anonymous => {
                        out.push_str(self.syntax.anonymous_prefix());
                        StepOrigin::Anonymous
                    }
                    ChainRoot::Argument => {
                        return Err(QueryError::malformed(format!(
                            "unresolved bare call '{}' in argument position",
                            calls.first().map_or("", |c| c.name.as_str())
                        ))
                        .into());
                    }
                };
                if let Some((first, tail)) = rest.split_first() {
                    self.step(&mut out, first, origin)?;
                    rest = tail;
                }
            }
            Some(Node::TypeRef(owner)) => {
                if let Some((first, tail)) = rest.split_first() {
                    out.push_str(&self.syntax.static_method(owner, &first.name));
                    out.push('(');
                    out.push_str(&self.args(first)?);
                    out.push(')');
                    rest = tail;
                }
            }
            Some(other) => {
                return Err(QueryError::malformed(format!(
                    "call receiver must be a step or a type, found {other:?}"
                ))
                .into());
            }
        }

        for call in rest {
            self.step(&mut out, call, StepOrigin::Chained)?;
        }
        Ok(out)
    }

    fn step(&self, out: &mut String, call: &Call, origin: StepOrigin) -> Result<()> {
        let site = StepSite {
            name: &call.name,
            origin,
            args: &call.args,
        };
        out.push('.');
        out.push_str(&self.syntax.step_name(&site));
        out.push('(');
        out.push_str(&self.args(call)?);
        out.push(')');
        Ok(())
    }

    fn args(&self, call: &Call) -> Result<String> {
        let count = call.args.len();
        let parts = call
            .args
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let site = ArgSite {
                    step: &call.name,
                    index,
                    count,
                    node,
                };
                let rendered = self.arg(&site)?;
                Ok(self.syntax.wrap_arg(&site, rendered))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.syntax.join_args(&call.name, parts))
    }

    fn arg(&self, site: &ArgSite<'_>) -> Result<String> {
        match site.node {
            Node::TypeRef(name) if site.step == "withStrategies" => {
                Ok(self.syntax.strategy_instance(name))
            }
            Node::TypeRef(name) if site.step == "withoutStrategies" => {
                Ok(self.syntax.strategy_class(name))
            }
            Node::Literal(Literal::Null) => Ok(self.syntax.null(Some(site))),
            node => self.node(node),
        }
    }

    fn node(&self, node: &Node) -> Result<String> {
        match node {
            Node::Call(_) => self.chain(node, ChainRoot::Argument),
            Node::Anonymous(inner) => self.chain(inner, ChainRoot::Anonymous),
            Node::Literal(literal) => self.literal(literal),
            Node::Collection(collection) => self.collection(collection),
            Node::Identifier(name) => Ok(self.syntax.identifier(name)),
            Node::EnumRef(e) => Ok(self.syntax.enum_ref(e)),
            Node::TypeRef(name) => Ok(self.syntax.type_ref(name)),
            Node::Strategy(config) => {
                let entries = config
                    .entries
                    .iter()
                    .map(|(key, value)| {
                        let rendered = match value {
                            Node::Collection(Collection::List(items)) => {
                                let items = self.nodes(items)?;
                                match self.syntax.strategy_list(&config.name, key, &items) {
                                    Some(special) => special,
                                    None => self.syntax.list(items),
                                }
                            }
                            other => self.node(other)?,
                        };
                        Ok((key.clone(), rendered))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.syntax.strategy(&config.name, &entries))
            }
            Node::Vertex(vertex) => {
                let id = self.node(&vertex.id)?;
                let label = vertex.label.as_deref().map(|l| self.node(l)).transpose()?;
                Ok(self.syntax.vertex(id, label))
            }
        }
    }

    fn nodes(&self, items: &[Node]) -> Result<Vec<String>> {
        items.iter().map(|item| self.node(item)).collect()
    }

    fn literal(&self, literal: &Literal) -> Result<String> {
        let syntax = self.syntax;
        Ok(match literal {
            Literal::Null => syntax.null(None),
            Literal::Bool(b) => syntax.boolean(*b),
            Literal::String(s) => syntax.string(s),
            Literal::Number(n) => syntax.number(n),
            Literal::NaN => syntax.nan(),
            Literal::PosInfinity => syntax.infinity(false),
            Literal::NegInfinity => syntax.infinity(true),
            Literal::DateTime(d) => syntax.datetime(d),
            Literal::Range(r) => syntax.range(r)?,
        })
    }

    fn collection(&self, collection: &Collection) -> Result<String> {
        Ok(match collection {
            Collection::List(items) => self.syntax.list(self.nodes(items)?),
            Collection::Set(items) => self.syntax.set(self.nodes(items)?),
            Collection::Map(entries) => {
                let rendered = entries
                    .iter()
                    .map(|entry| {
                        let k = self.syntax.map_key(entry, self.node(&entry.key)?);
                        Ok((k, self.node(&entry.value)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.syntax.map(rendered)
            }
        })
    }
}

/// Renders a canonical query in `language`.
pub fn emit(query: &Query, language: Language, source_name: &str) -> Result<String> {
    Renderer::new(syntax_for(language), source_name).render(query)
}

/// The syntax table for `language`.
pub fn syntax_for(language: Language) -> &'static dyn Syntax {
    match language {
        Language::Gremlin => &gremlin::Gremlin,
        Language::DotNet => &dotnet::DotNet,
        Language::Go => &go::Go,
        Language::Groovy => &groovy::Groovy,
        Language::Java => &java::Java,
        Language::JavaScript => &javascript::JavaScript,
        Language::Python => &python::Python,
    }
}

/// A map key with the parentheses it was written with.
pub fn key_as_written(entry: &MapEntry, rendered: String) -> String {
    if entry.parenthesized {
        format!("({rendered})")
    } else {
        rendered
    }
}

/// Appends `_` to `name` when it is one of `keywords`.
pub fn escape_keyword(name: &str, keywords: &[&str]) -> String {
    if keywords.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Escapes `value` for a string delimited by a character in `escaped`.
///
/// Backslash and the listed characters are backslash-escaped, as are tab,
/// carriage return, backspace and form feed. Other control characters
/// become `\uXXXX`. Newlines are kept literally.
pub fn escape_string(value: &str, escaped: &[char]) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if escaped.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() && c != '\n' => {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}

/// `"value"` with escaping.
pub fn double_quoted(value: &str) -> String {
    format!("\"{}\"", escape_string(value, &['"']))
}

/// Quotes with the literal's own delimiter; bare keys stay bare.
pub fn quote_as_written(s: &StringLiteral) -> String {
    match s.quote {
        QuoteStyle::Single => format!("'{}'", escape_string(&s.value, &['\''])),
        QuoteStyle::Double => double_quoted(&s.value),
        QuoteStyle::Bare => s.value.clone(),
    }
}

/// `hasLabel` → `HasLabel`.
pub fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `hasLabel` → `has_label`. Names written all in capitals are kept.
pub fn snake_case(name: &str) -> String {
    if !name.chars().any(char::is_lowercase) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
