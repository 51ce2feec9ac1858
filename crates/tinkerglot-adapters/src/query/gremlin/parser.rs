//! Gremlin Parser.
//!
//! Parses tokenized Gremlin traversals into an AST. The parser only knows the
//! shape of the grammar; deciding whether a bare name is a step, an enum
//! member or a parameter is left to the canonicalizer.

use smallvec::{SmallVec, smallvec};
use tinkerglot_common::utils::error::{Error, QueryError, QueryErrorKind, Result};

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};

/// Name of the anonymous traversal marker.
pub const ANONYMOUS_MARKER: &str = "__";

/// Deepest nesting of arguments, collections and anonymous traversals.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Gremlin parser.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    /// Source string for error reporting.
    source: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given source.
    pub fn new(source: &'a str) -> Result<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            depth: 0,
            source,
        })
    }

    /// Parses the whole input as one traversal.
    pub fn parse(&mut self) -> Result<Query> {
        let query = self.parse_query()?;
        if !self.check(&TokenKind::Eof) {
            return Err(self.error(format!(
                "Unexpected {} after end of traversal",
                describe(self.current_kind())
            )));
        }
        Ok(query)
    }

    fn parse_query(&mut self) -> Result<Query> {
        match self.current_kind() {
            TokenKind::Identifier(name) if name != ANONYMOUS_MARKER => {
                self.advance();
            }
            _ => return Err(self.error("Expected traversal source")),
        }
        let root = self.parse_root_chain()?;
        Ok(Query { root })
    }

    /// Parses the calls hanging off a root token (`g` or `__`).
    fn parse_root_chain(&mut self) -> Result<Option<Node>> {
        if !self.check(&TokenKind::Dot) {
            return Ok(None);
        }
        self.advance();
        let name = self.expect_identifier("step name")?;
        let args = self.parse_arguments()?;
        self.parse_chain(Node::call(None, name, args)).map(Some)
    }

    /// Parses `.step(args)` repeatedly on top of `receiver`.
    fn parse_chain(&mut self, receiver: Node) -> Result<Node> {
        let mut current = receiver;
        while self.check(&TokenKind::Dot) {
            self.advance();
            let name = self.expect_identifier("step name")?;
            let args = self.parse_arguments()?;
            current = Node::call(Some(current), name, args);
        }
        Ok(current)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Node>> {
        self.expect(&TokenKind::LParen)?;
        let args = self.parse_expression_list(&TokenKind::RParen)?;
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// Parses comma-separated expressions up to (not including) `close`.
    fn parse_expression_list(&mut self, close: &TokenKind) -> Result<Vec<Node>> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expression()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    fn parse_expression(&mut self) -> Result<Node> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "Expression nested deeper than {MAX_NESTING_DEPTH} levels"
            )));
        }
        self.depth += 1;
        let node = self.parse_term();
        self.depth -= 1;
        node
    }

    fn parse_term(&mut self) -> Result<Node> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::String { value, quote } => {
                self.advance();
                Ok(Node::Literal(Literal::String(StringLiteral { value, quote })))
            }
            TokenKind::Number { digits, suffix } => {
                self.advance();
                self.parse_number_or_range(NumberLiteral { digits, suffix })
            }
            TokenKind::True => {
                self.advance();
                Ok(Node::Literal(Literal::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Node::Literal(Literal::Bool(false)))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Node::Literal(Literal::Null))
            }
            TokenKind::NaN => {
                self.advance();
                Ok(Node::Literal(Literal::NaN))
            }
            TokenKind::Infinity => {
                self.advance();
                Ok(Node::Literal(Literal::PosInfinity))
            }
            TokenKind::Minus => {
                self.advance();
                self.expect(&TokenKind::Infinity)?;
                Ok(Node::Literal(Literal::NegInfinity))
            }
            TokenKind::LBracket => self.parse_list_or_map(),
            TokenKind::LBrace => {
                self.advance();
                let items = self.parse_expression_list(&TokenKind::RBrace)?;
                self.expect(&TokenKind::RBrace)?;
                Ok(Node::Collection(Collection::Set(items)))
            }
            TokenKind::New => self.parse_new(),
            TokenKind::Identifier(name) => self.parse_name(name),
            other => Err(self.error(format!("Unexpected {}", describe(&other)))),
        }
    }

    fn parse_number_or_range(&mut self, start: NumberLiteral) -> Result<Node> {
        if !self.check(&TokenKind::DotDot) {
            return Ok(Node::Literal(Literal::Number(start)));
        }
        self.advance();
        let end = match self.current_kind().clone() {
            TokenKind::Number { digits, suffix } => NumberLiteral { digits, suffix },
            _ => return Err(self.error("Expected integer after '..'")),
        };
        if !start.is_integral() || !end.is_integral() {
            return Err(self.error("Range bounds must be integers"));
        }
        self.advance();
        Ok(Node::Literal(Literal::Range(RangeLiteral { start, end })))
    }

    fn parse_list_or_map(&mut self) -> Result<Node> {
        self.expect(&TokenKind::LBracket)?;

        if self.check(&TokenKind::RBracket) {
            self.advance();
            return Ok(Node::Collection(Collection::List(Vec::new())));
        }
        if self.check(&TokenKind::Colon) {
            self.advance();
            self.expect(&TokenKind::RBracket)?;
            return Ok(Node::Collection(Collection::Map(Vec::new())));
        }

        let (first, parenthesized) = self.parse_map_key_or_element()?;
        if !self.check(&TokenKind::Colon) {
            let mut items = vec![first];
            while self.check(&TokenKind::Comma) {
                self.advance();
                items.push(self.parse_expression()?);
            }
            self.expect(&TokenKind::RBracket)?;
            return Ok(Node::Collection(Collection::List(items)));
        }

        self.advance();
        let mut entries = vec![MapEntry {
            key: first,
            value: self.parse_expression()?,
            parenthesized,
        }];
        while self.check(&TokenKind::Comma) {
            self.advance();
            let (key, parenthesized) = self.parse_map_key_or_element()?;
            self.expect(&TokenKind::Colon)?;
            entries.push(MapEntry {
                key,
                value: self.parse_expression()?,
                parenthesized,
            });
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(Node::Collection(Collection::Map(entries)))
    }

    /// A map key may be a bare word, a parenthesized expression or any
    /// expression. The caller decides from the following `:` whether it was
    /// a key at all. The flag is set for a parenthesized key.
    fn parse_map_key_or_element(&mut self) -> Result<(Node, bool)> {
        if self.peek_kind(1) == &TokenKind::Colon {
            let bare = match self.current_kind() {
                TokenKind::Identifier(name) => Some(name.clone()),
                TokenKind::New => Some("new".to_string()),
                _ => None,
            };
            if let Some(value) = bare {
                self.advance();
                let key = Node::Literal(Literal::String(StringLiteral {
                    value,
                    quote: QuoteStyle::Bare,
                }));
                return Ok((key, false));
            }
        }
        if self.check(&TokenKind::LParen) {
            self.advance();
            let inner = self.parse_expression()?;
            self.expect(&TokenKind::RParen)?;
            return Ok((inner, true));
        }
        Ok((self.parse_expression()?, false))
    }

    fn parse_new(&mut self) -> Result<Node> {
        self.expect(&TokenKind::New)?;
        let name = self.expect_identifier("type name after 'new'")?;
        self.expect(&TokenKind::LParen)?;

        if name == "Vertex" || name == "ReferenceVertex" {
            let mut args = self.parse_expression_list(&TokenKind::RParen)?;
            self.expect(&TokenKind::RParen)?;
            if args.is_empty() || args.len() > 2 {
                return Err(self.error("Vertex takes an id and an optional label"));
            }
            let label = if args.len() == 2 { args.pop() } else { None };
            let id = args.pop().ok_or_else(|| self.error("Vertex requires an id"))?;
            return Ok(Node::Vertex(VertexLiteral {
                id: Box::new(id),
                label: label.map(Box::new),
            }));
        }

        let mut entries = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let key = self.expect_identifier("strategy configuration key")?;
                self.expect(&TokenKind::Colon)?;
                entries.push((key, self.parse_expression()?));
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(Node::Strategy(StrategyConfig { name, entries }))
    }

    fn parse_name(&mut self, name: String) -> Result<Node> {
        self.advance();

        if name == ANONYMOUS_MARKER {
            if !self.check(&TokenKind::Dot) {
                return Err(self.error("Expected '.' after '__'"));
            }
            let chain = self.parse_root_chain()?;
            return chain
                .map(|root| Node::Anonymous(Box::new(root)))
                .ok_or_else(|| self.error("Expected step after '__'"));
        }

        if name == "datetime" && self.check(&TokenKind::LParen) {
            return self.parse_datetime();
        }

        if self.check(&TokenKind::LParen) {
            let args = self.parse_arguments()?;
            return self.parse_chain(Node::call(None, name, args));
        }

        if !self.check(&TokenKind::Dot) {
            return Ok(Node::Identifier(name));
        }

        // Qualified name: `T.id`, `P.gt(1)`, `IO.graphml`.
        let mut path: SmallVec<[String; 1]> = smallvec![name];
        while self.check(&TokenKind::Dot) {
            self.advance();
            let segment = self.expect_identifier("member name")?;
            if self.check(&TokenKind::LParen) {
                let args = self.parse_arguments()?;
                let owner = Node::TypeRef(path.join("."));
                return self.parse_chain(Node::call(Some(owner), segment, args));
            }
            path.push(segment);
        }
        let member = path.pop().unwrap_or_default();
        Ok(Node::EnumRef(EnumRef {
            owner_path: path,
            member,
        }))
    }

    fn parse_datetime(&mut self) -> Result<Node> {
        self.expect(&TokenKind::LParen)?;
        let text = match self.current_kind().clone() {
            TokenKind::String { value, quote } => StringLiteral { value, quote },
            _ => return Err(self.error("Expected date string in datetime()")),
        };
        let literal = DateTimeLiteral::from_text(text)
            .ok_or_else(|| self.error("Invalid date in datetime()"))?;
        self.advance();
        self.expect(&TokenKind::RParen)?;
        Ok(Node::Literal(Literal::DateTime(literal)))
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn current(&self) -> &Token {
        // The lexer always ends the stream with Eof.
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(last)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_kind(&self, n: usize) -> &TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.position + n).min(last)].kind
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected {}, found {}",
                describe(kind),
                describe(self.current_kind())
            )))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        match self.current_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("Expected {what}, found {}", describe(other)))),
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Query(
            QueryError::new(QueryErrorKind::Syntax, message)
                .with_span(self.current().span)
                .with_source(self.source.to_string()),
        )
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Identifier(name) => format!("identifier '{name}'"),
        TokenKind::String { .. } => "string".to_string(),
        TokenKind::Number { digits, .. } => format!("number {digits}"),
        TokenKind::True => "'true'".to_string(),
        TokenKind::False => "'false'".to_string(),
        TokenKind::Null => "'null'".to_string(),
        TokenKind::New => "'new'".to_string(),
        TokenKind::NaN => "'NaN'".to_string(),
        TokenKind::Infinity => "'Infinity'".to_string(),
        TokenKind::LParen => "'('".to_string(),
        TokenKind::RParen => "')'".to_string(),
        TokenKind::LBracket => "'['".to_string(),
        TokenKind::RBracket => "']'".to_string(),
        TokenKind::LBrace => "'{'".to_string(),
        TokenKind::RBrace => "'}'".to_string(),
        TokenKind::Comma => "','".to_string(),
        TokenKind::Dot => "'.'".to_string(),
        TokenKind::DotDot => "'..'".to_string(),
        TokenKind::Colon => "':'".to_string(),
        TokenKind::Minus => "'-'".to_string(),
        TokenKind::Eof => "end of input".to_string(),
    }
}
