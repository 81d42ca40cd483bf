//! # Lexer
//!
//! Turns source text into a lazy stream of [`Token`]s. Whitespace and `;` line
//! comments are skipped. Every token carries the byte [`Span`] it was read from.
//!
//! The lexer is an [`Iterator`] over `Result<Token, LexError>`: it stops after
//! the first error. To lex again, build a new [`Lexer`].

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// Byte range `start..end` into the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// 1-based line and column of the span start.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let before = source.get(..self.start).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let col = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, col)
    }

    /// Render `msg` with the source line under this span and a caret underline.
    pub fn annotate(&self, source: &str, msg: &str) -> String {
        let (line, col) = self.line_col(source);
        let text = source.lines().nth(line - 1).unwrap_or("");
        let width = source
            .get(self.start..self.end)
            .map(|s| s.lines().next().unwrap_or("").chars().count())
            .unwrap_or(0)
            .max(1);
        let gutter = " ".repeat(line.to_string().len());

        format!(
            "error: {msg}\n{gutter}--> {line}:{col}\n{gutter} |\n{line} | {text}\n{gutter} | {}{}",
            " ".repeat(col - 1),
            "^".repeat(width)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Punct {
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub value: f64,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen(Punct),
    RParen(Punct),
    LBracket(Punct),
    RBracket(Punct),
    StringLiteral(StringLiteral),
    Number(Number),
    Ident(Ident),
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::LParen(inner) => inner.position,
            Token::RParen(inner) => inner.position,
            Token::LBracket(inner) => inner.position,
            Token::RBracket(inner) => inner.position,
            Token::StringLiteral(inner) => inner.position,
            Token::Number(inner) => inner.position,
            Token::Ident(inner) => inner.position,
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::LBracket(_) => "'['".to_string(),
            Token::RBracket(_) => "']'".to_string(),
            Token::StringLiteral(inner) => format!("string \"{}\"", inner.value),
            Token::Number(inner) => format!("number '{}'", inner.value),
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that starts no token.
    UnexpectedCharacter { found: char, span: Span },
    /// A `"` without its closing quote.
    UnterminatedString { span: Span },
    /// A word starting with a digit that is not `[0-9]+(\.[0-9]+)?`.
    InvalidNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::InvalidNumber { span, .. } => *span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { found, .. } => {
                write!(f, "unexpected character '{}'", found.escape_debug())
            }
            LexError::UnterminatedString { .. } => write!(f, "unterminated string literal"),
            LexError::InvalidNumber { text, .. } => write!(f, "invalid number literal '{text}'"),
        }
    }
}

impl std::error::Error for LexError {}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '*' | '/' | '+' | '-')
}

fn is_number(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && fraction.is_none_or(digits)
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().peekable(),
            failed: false,
        }
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(pos, _)| *pos)
            .unwrap_or(self.input.len())
    }

    fn skip_trivia(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else if c == ';' {
                while let Some((_, c)) = self.chars.next() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn string(&mut self, start: usize) -> Result<Token, LexError> {
        for (pos, c) in self.chars.by_ref() {
            if c == '"' {
                return Ok(Token::StringLiteral(StringLiteral {
                    value: self.input[start + 1..pos].to_string(),
                    position: Span::new(start, pos + 1),
                }));
            }
        }
        Err(LexError::UnterminatedString {
            span: Span::new(start, self.input.len()),
        })
    }

    fn word(&mut self, start: usize) -> Result<Token, LexError> {
        while self.chars.next_if(|&(_, c)| is_ident_char(c)).is_some() {}
        let end = self.offset();
        let text = &self.input[start..end];
        let position = Span::new(start, end);

        if !text.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(Token::Ident(Ident {
                value: text.to_string(),
                position,
            }));
        }

        match text.parse::<f64>() {
            Ok(value) if is_number(text) => Ok(Token::Number(Number { value, position })),
            _ => Err(LexError::InvalidNumber {
                text: text.to_string(),
                span: position,
            }),
        }
    }

    fn lex_token(&mut self) -> Option<Result<Token, LexError>> {
        self.skip_trivia();
        let &(start, c) = self.chars.peek()?;
        let punct = Punct {
            position: Span::new(start, start + 1),
        };

        let token = match c {
            '(' => Ok(Token::LParen(punct)),
            ')' => Ok(Token::RParen(punct)),
            '[' => Ok(Token::LBracket(punct)),
            ']' => Ok(Token::RBracket(punct)),
            '"' => {
                self.chars.next();
                return Some(self.string(start));
            }
            c if is_ident_char(c) => return Some(self.word(start)),
            found => Err(LexError::UnexpectedCharacter {
                found,
                span: Span::new(start, start + found.len_utf8()),
            }),
        };
        self.chars.next();
        Some(token)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.lex_token()?;
        self.failed = item.is_err();
        Some(item)
    }
}

/// Lex the whole input at once.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}
