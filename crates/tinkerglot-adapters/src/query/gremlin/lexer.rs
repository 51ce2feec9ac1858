//! Gremlin Lexer.
//!
//! Splits query text into tokens. Whitespace and newlines between tokens are
//! skipped; string literals may span lines.

use tinkerglot_common::utils::error::{Error, QueryError, QueryErrorKind, Result, SourceSpan};

use super::ast::QuoteStyle;

/// Token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A name: step, type, enum member or parameter.
    Identifier(String),
    /// A quoted string, unescaped.
    String {
        /// Unescaped contents.
        value: String,
        /// Delimiter used.
        quote: QuoteStyle,
    },
    /// A numeral with optional sign and type suffix.
    Number {
        /// Sign, digits, fraction and exponent as written.
        digits: String,
        /// Type suffix as written.
        suffix: Option<char>,
    },

    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `new`
    New,
    /// `NaN`
    NaN,
    /// `Infinity`
    Infinity,

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `..`
    DotDot,
    /// `:`
    Colon,
    /// `-` not followed by a digit.
    Minus,

    /// End of input.
    Eof,
}

/// A token with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Source span.
    pub span: SourceSpan,
}

/// Gremlin lexer.
pub struct Lexer<'a> {
    chars: Vec<char>,
    pos: usize,
    offset: usize,
    line: usize,
    column: usize,
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            column: 1,
            source,
        }
    }

    /// Tokenizes the whole input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let start = self.mark();
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: self.span_from(start),
                });
                return Ok(tokens);
            };

            let kind = match ch {
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                ',' => self.single(TokenKind::Comma),
                ':' => self.single(TokenKind::Colon),
                '.' => {
                    self.bump();
                    if self.peek() == Some('.') {
                        self.bump();
                        TokenKind::DotDot
                    } else {
                        TokenKind::Dot
                    }
                }
                '-' => {
                    if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
                        self.bump();
                        self.number(true)
                    } else {
                        self.single(TokenKind::Minus)
                    }
                }
                '\'' | '"' => self.string(ch, start)?,
                c if c.is_ascii_digit() => self.number(false),
                c if is_ident_start(c) => self.identifier(),
                other => {
                    self.bump();
                    return Err(self.error(format!("Unexpected character '{other}'"), start));
                }
            };
            tokens.push(Token {
                kind,
                span: self.span_from(start),
            });
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn identifier(&mut self) -> TokenKind {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident_part(c)) {
            name.push(c);
            self.bump();
        }
        match name.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "new" => TokenKind::New,
            "NaN" => TokenKind::NaN,
            "Infinity" => TokenKind::Infinity,
            _ => TokenKind::Identifier(name),
        }
    }

    fn number(&mut self, negative: bool) -> TokenKind {
        let mut digits = String::new();
        if negative {
            digits.push('-');
        }
        self.take_digits(&mut digits);

        // `1..5` is a range, not a fraction.
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            digits.push('.');
            self.bump();
            self.take_digits(&mut digits);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_nth(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_nth(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(c) = self.bump() {
                        digits.push(c);
                    }
                }
                self.take_digits(&mut digits);
            }
        }

        let suffix = match self.peek() {
            Some(c)
                if "bBsSiIlLnNfFdDmM".contains(c)
                    && !self.peek_nth(1).is_some_and(is_ident_part) =>
            {
                self.bump();
                Some(c)
            }
            _ => None,
        };

        TokenKind::Number { digits, suffix }
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            out.push(c);
            self.bump();
        }
    }

    fn string(&mut self, delimiter: char, start: Mark) -> Result<TokenKind> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("Unterminated string literal", start)),
                Some(c) if c == delimiter => break,
                Some('\\') => {
                    let escape_start = self.mark();
                    match self.bump() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some('b') => value.push('\u{8}'),
                        Some('f') => value.push('\u{c}'),
                        Some('u') => value.push(self.unicode_escape(escape_start)?),
                        Some(other) => value.push(other),
                        None => return Err(self.error("Unterminated string literal", start)),
                    }
                }
                Some(c) => value.push(c),
            }
        }
        let quote = if delimiter == '\'' {
            QuoteStyle::Single
        } else {
            QuoteStyle::Double
        };
        Ok(TokenKind::String { value, quote })
    }

    fn unicode_escape(&mut self, start: Mark) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("Invalid unicode escape", start))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error("Invalid unicode escape", start))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn span_from(&self, start: Mark) -> SourceSpan {
        SourceSpan::new(start.offset, self.offset, start.line, start.column)
    }

    fn error(&self, message: impl Into<String>, start: Mark) -> Error {
        Error::Query(
            QueryError::new(QueryErrorKind::Syntax, message)
                .with_span(self.span_from(start))
                .with_source(self.source.to_string()),
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    column: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn number(digits: &str, suffix: Option<char>) -> TokenKind {
        TokenKind::Number {
            digits: digits.to_string(),
            suffix,
        }
    }

    #[test]
    fn test_simple_chain() {
        assert_eq!(
            kinds("g.V()"),
            vec![
                TokenKind::Identifier("g".into()),
                TokenKind::Dot,
                TokenKind::Identifier("V".into()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_and_suffixes() {
        assert_eq!(
            kinds("1 -1.0 1.0d 1e10 2L 3n"),
            vec![
                number("1", None),
                number("-1.0", None),
                number("1.0", Some('d')),
                number("1e10", None),
                number("2", Some('L')),
                number("3", Some('n')),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_range_is_not_a_fraction() {
        assert_eq!(
            kinds("0..5"),
            vec![number("0", None), TokenKind::DotDot, number("5", None), TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#"'a\'b' "c\ndA""#),
            vec![
                TokenKind::String {
                    value: "a'b".into(),
                    quote: QuoteStyle::Single
                },
                TokenKind::String {
                    value: "c\ndA".into(),
                    quote: QuoteStyle::Double
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true null new NaN -Infinity"),
            vec![
                TokenKind::True,
                TokenKind::Null,
                TokenKind::New,
                TokenKind::NaN,
                TokenKind::Minus,
                TokenKind::Infinity,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_reports_position() {
        let err = Lexer::new("g.V(\n'abc").tokenize().unwrap_err();
        let Error::Query(query) = err;
        assert_eq!(query.kind, QueryErrorKind::Syntax);
        let span = query.span.unwrap();
        assert_eq!((span.line, span.column), (2, 1));
    }

    #[test]
    fn test_suffix_needs_word_boundary() {
        assert_eq!(
            kinds("1is"),
            vec![number("1", None), TokenKind::Identifier("is".into()), TokenKind::Eof]
        );
    }
}
