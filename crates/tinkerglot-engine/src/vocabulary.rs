//! The closed vocabulary of the query language.
//!
//! Built once on first use and only read afterwards; every lookup the
//! canonicalizer, the parameter extractor and the emitters make about names
//! goes through [`vocabulary()`].

use std::sync::LazyLock;

use hashbrown::{HashMap, HashSet};

/// Bare enum members and the type that owns them.
const ENUM_MEMBERS: &[(&str, &str)] = &[
    ("local", "Scope"),
    ("global", "Scope"),
    ("id", "T"),
    ("label", "T"),
    ("key", "T"),
    ("value", "T"),
    ("single", "Cardinality"),
    ("list", "Cardinality"),
    ("set", "Cardinality"),
    ("onCreate", "Merge"),
    ("onMatch", "Merge"),
    ("outV", "Merge"),
    ("inV", "Merge"),
    ("asc", "Order"),
    ("desc", "Order"),
    ("shuffle", "Order"),
    ("first", "Pop"),
    ("last", "Pop"),
    ("all", "Pop"),
    ("mixed", "Pop"),
    ("keys", "Column"),
    ("values", "Column"),
    ("normSack", "Barrier"),
    ("OUT", "Direction"),
    ("IN", "Direction"),
    ("BOTH", "Direction"),
    ("second", "DT"),
    ("minute", "DT"),
    ("hour", "DT"),
    ("day", "DT"),
    ("sum", "Operator"),
    ("minus", "Operator"),
    ("mult", "Operator"),
    ("div", "Operator"),
    ("min", "Operator"),
    ("max", "Operator"),
    ("assign", "Operator"),
    ("addAll", "Operator"),
    ("sumLong", "Operator"),
];

/// Static factory methods callable without their owner, and that owner.
const PREDICATES: &[(&str, &str)] = &[
    ("eq", "P"),
    ("neq", "P"),
    ("lt", "P"),
    ("lte", "P"),
    ("gt", "P"),
    ("gte", "P"),
    ("inside", "P"),
    ("outside", "P"),
    ("between", "P"),
    ("within", "P"),
    ("without", "P"),
    ("not", "P"),
    ("containing", "TextP"),
    ("notContaining", "TextP"),
    ("startingWith", "TextP"),
    ("notStartingWith", "TextP"),
    ("endingWith", "TextP"),
    ("notEndingWith", "TextP"),
    ("regex", "TextP"),
    ("notRegex", "TextP"),
    ("single", "Cardinality"),
    ("list", "Cardinality"),
    ("set", "Cardinality"),
];

/// Type names that may appear as the owner of a member or static call.
const TYPES: &[&str] = &[
    "P",
    "TextP",
    "T",
    "Scope",
    "Cardinality",
    "CardinalityValue",
    "Merge",
    "Operator",
    "Barrier",
    "IO",
    "WithOptions",
    "Order",
    "Pop",
    "Column",
    "Direction",
    "DT",
    "ConnectedComponent",
    "ShortestPath",
    "PageRank",
    "PeerPressure",
];

/// Types whose members live in the Go driver's own namespace.
const GO_PREFIXED_TYPES: &[&str] = &[
    "P",
    "TextP",
    "T",
    "Scope",
    "Cardinality",
    "CardinalityValue",
    "Merge",
    "Operator",
    "Barrier",
    "IO",
    "WithOptions",
    "Order",
    "Pop",
    "Column",
    "Direction",
    "DT",
];

/// Package a strategy class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyCategory {
    /// Adds behavior to a traversal.
    Decoration,
    /// Final rewrites before execution.
    Finalization,
    /// Performance rewrites.
    Optimization,
    /// Rejects disallowed traversals.
    Verification,
}

impl StrategyCategory {
    fn package(self) -> &'static str {
        match self {
            StrategyCategory::Decoration => "decoration",
            StrategyCategory::Finalization => "finalization",
            StrategyCategory::Optimization => "optimization",
            StrategyCategory::Verification => "verification",
        }
    }
}

/// Strategy classes: name, category, and whether it belongs to the graph
/// computer packages.
const STRATEGIES: &[(&str, StrategyCategory, bool)] = &[
    ("ConnectiveStrategy", StrategyCategory::Decoration, false),
    ("ElementIdStrategy", StrategyCategory::Decoration, false),
    ("EventStrategy", StrategyCategory::Decoration, false),
    ("HaltedTraverserStrategy", StrategyCategory::Decoration, false),
    ("OptionsStrategy", StrategyCategory::Decoration, false),
    ("PartitionStrategy", StrategyCategory::Decoration, false),
    ("RequirementsStrategy", StrategyCategory::Decoration, false),
    ("SackStrategy", StrategyCategory::Decoration, false),
    ("SeedStrategy", StrategyCategory::Decoration, false),
    ("SideEffectStrategy", StrategyCategory::Decoration, false),
    ("SubgraphStrategy", StrategyCategory::Decoration, false),
    ("VertexProgramStrategy", StrategyCategory::Decoration, true),
    ("MatchAlgorithmStrategy", StrategyCategory::Finalization, false),
    ("ProfileStrategy", StrategyCategory::Finalization, false),
    ("ReferenceElementStrategy", StrategyCategory::Finalization, false),
    ("ComputerFinalizationStrategy", StrategyCategory::Finalization, true),
    ("AdjacentToIncidentStrategy", StrategyCategory::Optimization, false),
    ("ByModulatorOptimizationStrategy", StrategyCategory::Optimization, false),
    ("CountStrategy", StrategyCategory::Optimization, false),
    ("EarlyLimitStrategy", StrategyCategory::Optimization, false),
    ("FilterRankingStrategy", StrategyCategory::Optimization, false),
    ("IdentityRemovalStrategy", StrategyCategory::Optimization, false),
    ("IncidentToAdjacentStrategy", StrategyCategory::Optimization, false),
    ("InlineFilterStrategy", StrategyCategory::Optimization, false),
    ("LazyBarrierStrategy", StrategyCategory::Optimization, false),
    ("MatchPredicateStrategy", StrategyCategory::Optimization, false),
    ("OrderLimitStrategy", StrategyCategory::Optimization, false),
    ("PathProcessorStrategy", StrategyCategory::Optimization, false),
    ("PathRetractionStrategy", StrategyCategory::Optimization, false),
    ("ProductiveByStrategy", StrategyCategory::Optimization, false),
    ("RepeatUnrollStrategy", StrategyCategory::Optimization, false),
    ("GraphFilterStrategy", StrategyCategory::Optimization, true),
    ("MessagePassingReductionStrategy", StrategyCategory::Optimization, true),
    ("EdgeLabelVerificationStrategy", StrategyCategory::Verification, false),
    ("LambdaRestrictionStrategy", StrategyCategory::Verification, false),
    ("ReadOnlyStrategy", StrategyCategory::Verification, false),
    ("ReservedKeysVerificationStrategy", StrategyCategory::Verification, false),
    ("StandardVerificationStrategy", StrategyCategory::Verification, false),
    ("ComputerVerificationStrategy", StrategyCategory::Verification, true),
    ("VertexProgramRestrictionStrategy", StrategyCategory::Verification, true),
];

/// Step and source method names.
const STEPS: &[&str] = &[
    "V", "E", "addE", "addV", "aggregate", "all", "and", "any", "as", "asDate", "asString",
    "barrier", "both", "bothE", "bothV", "branch", "by", "call", "cap", "choose", "coalesce",
    "coin", "combine", "commit", "concat", "conjoin", "connectedComponent", "constant", "count",
    "cyclicPath", "dateAdd", "dateDiff", "dedup", "difference", "disjunct", "drop", "element",
    "elementMap", "emit", "explain", "fail", "filter", "flatMap", "fold", "format", "from",
    "group", "groupCount", "has", "hasId", "hasKey", "hasLabel", "hasNext", "hasNot",
    "hasValue", "id", "identity", "in", "inE", "inV", "index", "inject", "intersect", "io",
    "is", "iterate", "key", "label", "lTrim", "length", "limit", "local", "loops", "map",
    "match", "math", "max", "mean", "merge", "mergeE", "mergeV", "min", "next", "none", "not",
    "option", "optional", "or", "order", "otherV", "out", "outE", "outV", "pageRank", "path",
    "peerPressure", "product", "profile", "program", "project", "properties", "property",
    "propertyMap", "rTrim", "range", "read", "repeat", "replace", "reverse", "rollback", "sack",
    "sample", "select", "shortestPath", "sideEffect", "simplePath", "skip", "split", "store",
    "subgraph", "substring", "sum", "tail", "timeLimit", "times", "to", "toE", "toList",
    "toLower", "toUpper", "toV", "tree", "trim", "tryNext", "tx", "unfold", "union", "until",
    "value", "valueMap", "values", "where", "with", "withBulk", "withComputer", "withPath",
    "withSack", "withSideEffect", "withStrategies", "withoutStrategies", "write",
];

/// Literal keywords.
const KEYWORDS: &[&str] = &["true", "false", "null", "NaN", "Infinity", "new", "datetime", "__"];

/// Read-only lookup tables over the query language's names.
#[derive(Debug)]
pub struct Vocabulary {
    enum_members: HashMap<&'static str, &'static str>,
    predicates: HashMap<&'static str, &'static str>,
    types: HashSet<&'static str>,
    go_prefixed: HashSet<&'static str>,
    strategies: HashMap<&'static str, (StrategyCategory, bool)>,
    steps: HashSet<&'static str>,
    keywords: HashSet<&'static str>,
}

static VOCABULARY: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::build);

/// Returns the process-wide vocabulary.
pub fn vocabulary() -> &'static Vocabulary {
    &VOCABULARY
}

impl Vocabulary {
    fn build() -> Self {
        Self {
            enum_members: ENUM_MEMBERS.iter().copied().collect(),
            predicates: PREDICATES.iter().copied().collect(),
            types: TYPES.iter().copied().collect(),
            go_prefixed: GO_PREFIXED_TYPES.iter().copied().collect(),
            strategies: STRATEGIES
                .iter()
                .map(|&(name, category, computer)| (name, (category, computer)))
                .collect(),
            steps: STEPS.iter().copied().collect(),
            keywords: KEYWORDS.iter().copied().collect(),
        }
    }

    /// Owner of a bare enum member, e.g. `desc` → `Order`.
    pub fn enum_owner(&self, member: &str) -> Option<&'static str> {
        self.enum_members.get(member).copied()
    }

    /// Owner of a bare static call, e.g. `within` → `P`.
    pub fn predicate_owner(&self, name: &str) -> Option<&'static str> {
        self.predicates.get(name).copied()
    }

    /// True for owners of enum members and static calls.
    pub fn is_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    /// True for owner types the Go driver exposes as `gremlingo.<Type>`.
    pub fn is_go_prefixed(&self, name: &str) -> bool {
        self.go_prefixed.contains(name)
    }

    /// True for known strategy classes.
    pub fn is_strategy(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Fully-qualified Java class name of a strategy.
    pub fn strategy_class_name(&self, name: &str) -> Option<String> {
        let &(category, computer) = self.strategies.get(name)?;
        let base = if computer {
            "org.apache.tinkerpop.gremlin.process.computer.traversal.strategy"
        } else {
            "org.apache.tinkerpop.gremlin.process.traversal.strategy"
        };
        Some(format!("{base}.{}.{name}", category.package()))
    }

    /// True for step and source method names.
    pub fn is_step(&self, name: &str) -> bool {
        self.steps.contains(name)
    }

    /// True when `name` belongs to the language rather than to the caller.
    ///
    /// A bare identifier that is not part of the vocabulary is a bound
    /// parameter.
    pub fn contains(&self, name: &str) -> bool {
        self.enum_members.contains_key(name)
            || self.predicates.contains_key(name)
            || self.types.contains(name)
            || self.strategies.contains_key(name)
            || self.steps.contains(name)
            || self.keywords.contains(name)
    }
}
