//! Error types for Tinkerglot.
//!
//! Every failure of a translation call surfaces as an [`Error`]. Query-level
//! failures carry a [`QueryError`] whose [`QueryErrorKind`] tells the caller
//! whether the input text was malformed, the requested target cannot express
//! a construct, or the tree handed between passes broke its contract.

use std::fmt;

use thiserror::Error;

/// Convenient result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Parsing, rendering or tree-consistency failure for a query.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl Error {
    /// Returns the query error kind, if this is a query error.
    #[must_use]
    pub fn query_kind(&self) -> Option<QueryErrorKind> {
        match self {
            Error::Query(e) => Some(e.kind),
        }
    }

    /// Returns true when the target language cannot express a construct.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        self.query_kind() == Some(QueryErrorKind::Unsupported)
    }
}

/// Classification of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    /// The query text does not follow the grammar.
    Syntax,
    /// The target language has no rendering for a node.
    Unsupported,
    /// The tree violates the parser contract.
    Malformed,
}

/// Location of a token in the query text.
///
/// `start` and `end` are byte offsets; `line` and `column` are 1-based and
/// point at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Line of `start`.
    pub line: usize,
    /// Column of `start`.
    pub column: usize,
}

impl SourceSpan {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A query-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// What went wrong.
    pub kind: QueryErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Where in the source it went wrong, if known.
    pub span: Option<SourceSpan>,
    /// The query text, kept for error reporting.
    pub source: Option<String>,
}

impl QueryError {
    /// Creates a new query error.
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            source: None,
        }
    }

    /// Creates an `UnsupportedConstruct` error in the canonical
    /// `"<Language> does not support <feature>"` form.
    pub fn unsupported(language: &str, feature: impl fmt::Display) -> Self {
        Self::new(
            QueryErrorKind::Unsupported,
            format!("{language} does not support {feature}"),
        )
    }

    /// Creates a `MalformedAst` error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::Malformed, message)
    }

    /// Attaches a source span.
    #[must_use]
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Attaches the query text.
    #[must_use]
    pub fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns the line of the query text the span points at.
    #[must_use]
    pub fn source_line(&self) -> Option<&str> {
        let span = self.span?;
        self.source.as_deref()?.lines().nth(span.line.checked_sub(1)?)
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // Callers match on the message prefix, so it is printed bare.
            QueryErrorKind::Unsupported => f.write_str(&self.message),
            QueryErrorKind::Syntax => {
                write!(f, "syntax error: {}", self.message)?;
                if let Some(span) = self.span {
                    write!(f, " at line {}, column {}", span.line, span.column)?;
                }
                Ok(())
            }
            QueryErrorKind::Malformed => write!(f, "malformed AST: {}", self.message),
        }
    }
}

impl std::error::Error for QueryError {}
