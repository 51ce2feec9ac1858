//! Translation targets.
//!
//! - [`Language`] names a syntax an emitter can produce
//! - [`Mode`] selects what a translation call returns

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A syntax the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    /// The canonical form of the query language itself.
    Gremlin,
    /// C# for Gremlin.Net.
    DotNet,
    /// Go for gremlin-go.
    Go,
    /// Groovy for gremlin-groovy.
    Groovy,
    /// Java for gremlin-core.
    Java,
    /// JavaScript for gremlin-javascript.
    JavaScript,
    /// Python for gremlin-python.
    Python,
}

impl Language {
    /// Every emitter language, canonical form first.
    pub const ALL: [Language; 7] = [
        Language::Gremlin,
        Language::DotNet,
        Language::Go,
        Language::Groovy,
        Language::Java,
        Language::JavaScript,
        Language::Python,
    ];

    /// Display name used in error messages.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Language::Gremlin => "Gremlin",
            Language::DotNet => ".NET",
            Language::Go => "Go",
            Language::Groovy => "Groovy",
            Language::Java => "Java",
            Language::JavaScript => "Javascript",
            Language::Python => "Python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gremlin" | "language" | "canonical" => Ok(Language::Gremlin),
            "dotnet" | ".net" | "csharp" | "c#" => Ok(Language::DotNet),
            "go" | "golang" => Ok(Language::Go),
            "groovy" => Ok(Language::Groovy),
            "java" => Ok(Language::Java),
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// What a translation call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    /// Re-render the query in its own normalized grammar.
    Canonical,
    /// Canonical form with every literal replaced by a placeholder.
    Anonymized,
    /// Source text for a host language.
    Target(Language),
}

impl Mode {
    /// Every mode: canonical, anonymized, then each host language.
    pub const ALL: [Mode; 8] = [
        Mode::Canonical,
        Mode::Anonymized,
        Mode::Target(Language::DotNet),
        Mode::Target(Language::Go),
        Mode::Target(Language::Groovy),
        Mode::Target(Language::Java),
        Mode::Target(Language::JavaScript),
        Mode::Target(Language::Python),
    ];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Canonical => f.write_str("Canonical"),
            Mode::Anonymized => f.write_str("Anonymized"),
            Mode::Target(language) => language.fmt(f),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anonymized" | "anonymous" => Ok(Mode::Anonymized),
            other => match other.parse::<Language>()? {
                Language::Gremlin => Ok(Mode::Canonical),
                language => Ok(Mode::Target(language)),
            },
        }
    }
}
