//! Canonicalization pass.
//!
//! Resolves every bare name against the [vocabulary](crate::vocabulary) and
//! normalizes literal spelling so that all later passes see one shape per
//! construct:
//!
//! - a bare call chain in argument position becomes a static call when it
//!   starts with a predicate (`gt(1)` → `P.gt(1)`), otherwise an anonymous
//!   traversal (`out()` → `__.out()`);
//! - a bare identifier becomes an [`EnumRef`] (`desc` → `Order.desc`), a
//!   [`Node::TypeRef`] (`ReadOnlyStrategy`), or stays a parameter;
//! - numeric suffixes are lowercased;
//! - string delimiters are optionally forced to one style.
//!
//! Running the pass twice yields the same tree as running it once.

use smallvec::SmallVec;
use tinkerglot_adapters::query::gremlin::ast::{
    Call, Collection, DateTimeLiteral, EnumRef, Literal, MapEntry, Node, NumberLiteral, Query,
    QuoteStyle, RangeLiteral, StrategyConfig, StringLiteral, VertexLiteral,
};

use crate::config::Config;
use crate::vocabulary::vocabulary;

/// Name and arguments of one call in a chain.
type Link = (String, Vec<Node>);

/// A call chain taken apart: the non-call base, the call sitting on it and
/// the calls above that, root first.
struct Chain {
    base: Option<Node>,
    head: Link,
    tail: SmallVec<[Link; 4]>,
}

impl Chain {
    fn unchain(call: Call) -> Self {
        let mut tail = SmallVec::new();
        let mut current = call;
        loop {
            let Call {
                receiver,
                name,
                args,
            } = current;
            match receiver.map(|node| *node) {
                Some(Node::Call(inner)) => {
                    tail.push((name, args));
                    current = inner;
                }
                base => {
                    tail.reverse();
                    return Self {
                        base,
                        head: (name, args),
                        tail,
                    };
                }
            }
        }
    }

    fn links_mut(&mut self) -> impl Iterator<Item = &mut Link> {
        std::iter::once(&mut self.head).chain(self.tail.iter_mut())
    }

    fn rechain(self) -> Node {
        let (name, args) = self.head;
        self.tail
            .into_iter()
            .fold(Node::call(self.base, name, args), |receiver, (name, args)| {
                Node::call(Some(receiver), name, args)
            })
    }
}

/// Canonicalizes a query with the given configuration.
pub fn canonicalize(query: Query, config: &Config) -> Query {
    Canonicalizer::new(config).query(query)
}

/// The canonicalization pass. Holds only the options it applies.
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer {
    quote_style: Option<QuoteStyle>,
}

impl Canonicalizer {
    /// Creates a pass for `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            quote_style: config.quote_style,
        }
    }

    /// Canonicalizes a whole query.
    pub fn query(&self, query: Query) -> Query {
        Query {
            root: query.root.map(|root| self.root_chain(root)),
        }
    }

    /// A chain hanging off the source or `__`. Its base stays implicit.
    fn root_chain(&self, node: Node) -> Node {
        match node {
            Node::Call(call) => {
                let mut chain = Chain::unchain(call);
                chain.base = chain.base.map(|base| self.node(base));
                self.links(&mut chain);
                chain.rechain()
            }
            other => self.node(other),
        }
    }

    fn links(&self, chain: &mut Chain) {
        for (_, args) in chain.links_mut() {
            let taken = std::mem::take(args);
            *args = taken.into_iter().map(|arg| self.node(arg)).collect();
        }
    }

    /// Canonicalizes a node in argument position.
    fn node(&self, node: Node) -> Node {
        match node {
            Node::Call(call) => self.call(call),
            Node::Anonymous(inner) => Node::Anonymous(Box::new(self.root_chain(*inner))),
            Node::Identifier(name) => resolve_identifier(name),
            Node::Literal(literal) => Node::Literal(self.literal(literal)),
            Node::Collection(collection) => Node::Collection(self.collection(collection)),
            Node::Strategy(StrategyConfig { name, entries }) => Node::Strategy(StrategyConfig {
                name,
                entries: entries
                    .into_iter()
                    .map(|(key, value)| (key, self.node(value)))
                    .collect(),
            }),
            Node::Vertex(VertexLiteral { id, label }) => Node::Vertex(VertexLiteral {
                id: Box::new(self.node(*id)),
                label: label.map(|label| Box::new(self.node(*label))),
            }),
            node @ (Node::EnumRef(_) | Node::TypeRef(_)) => node,
        }
    }

    fn call(&self, call: Call) -> Node {
        let mut chain = Chain::unchain(call);
        self.links(&mut chain);

        match chain.base.take() {
            Some(base) => {
                chain.base = Some(self.node(base));
                chain.rechain()
            }
            None => {
                let (name, args) = &chain.head;
                // `not(x)` is only `P.not` when `x` is itself a predicate.
                let owner = vocabulary()
                    .predicate_owner(name)
                    .filter(|_| name != "not" || args.first().is_some_and(is_predicate));
                match owner {
                    Some(owner) => {
                        tracing::trace!(owner, "resolved bare predicate");
                        chain.base = Some(Node::TypeRef(owner.to_string()));
                        chain.rechain()
                    }
                    None => {
                        tracing::trace!("wrapped bare chain as anonymous traversal");
                        Node::Anonymous(Box::new(chain.rechain()))
                    }
                }
            }
        }
    }

    fn literal(&self, literal: Literal) -> Literal {
        match literal {
            Literal::String(s) => Literal::String(self.string(s)),
            Literal::Number(n) => Literal::Number(lowercase_suffix(n)),
            Literal::DateTime(DateTimeLiteral { text, epoch_millis }) => {
                Literal::DateTime(DateTimeLiteral {
                    text: self.string(text),
                    epoch_millis,
                })
            }
            Literal::Range(RangeLiteral { start, end }) => Literal::Range(RangeLiteral {
                start: lowercase_suffix(start),
                end: lowercase_suffix(end),
            }),
            other => other,
        }
    }

    fn string(&self, s: StringLiteral) -> StringLiteral {
        match self.quote_style {
            Some(quote) if s.quote != QuoteStyle::Bare => StringLiteral { quote, ..s },
            _ => s,
        }
    }

    fn collection(&self, collection: Collection) -> Collection {
        match collection {
            Collection::List(items) => {
                Collection::List(items.into_iter().map(|n| self.node(n)).collect())
            }
            Collection::Set(items) => {
                Collection::Set(items.into_iter().map(|n| self.node(n)).collect())
            }
            Collection::Map(entries) => Collection::Map(
                entries
                    .into_iter()
                    .map(|entry| MapEntry {
                        key: self.node(entry.key),
                        value: self.node(entry.value),
                        parenthesized: entry.parenthesized,
                    })
                    .collect(),
            ),
        }
    }
}

fn resolve_identifier(name: String) -> Node {
    let vocab = vocabulary();
    if let Some(owner) = vocab.enum_owner(&name) {
        tracing::trace!(member = %name, owner, "resolved enum member");
        return Node::EnumRef(EnumRef::new(owner, name));
    }
    if vocab.is_strategy(&name) || vocab.is_type(&name) {
        tracing::trace!(name = %name, "resolved type name");
        return Node::TypeRef(name);
    }
    Node::Identifier(name)
}

fn lowercase_suffix(n: NumberLiteral) -> NumberLiteral {
    NumberLiteral {
        suffix: n.suffix.map(|c| c.to_ascii_lowercase()),
        ..n
    }
}

/// True for a `P` or `TextP` expression.
pub(crate) fn is_predicate(node: &Node) -> bool {
    match node {
        Node::Call(call) => matches!(
            call.chain_base(),
            Some(Node::TypeRef(owner)) if owner == "P" || owner == "TextP"
        ),
        _ => false,
    }
}
