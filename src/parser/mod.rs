//! # Parser
//!
//! Builds [`SExp`] trees from a token stream with an explicit stack of open
//! delimiters. A source buffer may hold several top-level forms; they are
//! returned in order.

mod state;

use std::fmt;

pub use state::{Delimiter, MAX_DEPTH, ParseState};

use crate::ast::{SExp, SExpKind};
use crate::lexer::{Span, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A closing delimiter whose kind differs from the frame it closes.
    MismatchedDelimiter {
        open: Delimiter,
        open_span: Span,
        close: Delimiter,
        span: Span,
    },
    /// Input ended with `open` still waiting for its closer.
    UnclosedDelimiter { open: Delimiter, span: Span },
    /// A closing delimiter with nothing open.
    UnexpectedClosing { close: Delimiter, span: Span },
    /// `open` would nest deeper than [`MAX_DEPTH`].
    TooDeep { open: Delimiter, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::MismatchedDelimiter { span, .. }
            | ParseError::UnclosedDelimiter { span, .. }
            | ParseError::UnexpectedClosing { span, .. }
            | ParseError::TooDeep { span, .. } => *span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MismatchedDelimiter { open, close, .. } => write!(
                f,
                "mismatched delimiter: '{}' closed by '{}'",
                open.opening(),
                close.closing()
            ),
            ParseError::UnclosedDelimiter { open, .. } => {
                write!(f, "unclosed delimiter '{}'", open.opening())
            }
            ParseError::UnexpectedClosing { close, .. } => {
                write!(f, "unexpected closing delimiter '{}'", close.closing())
            }
            ParseError::TooDeep { open, .. } => {
                write!(f, "'{}' nests deeper than {MAX_DEPTH} levels", open.opening())
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse every top-level form in `tokens`.
///
/// The stream item error type is kept, so a lexer error stops parsing and is
/// returned as-is, while delimiter errors are converted into `E`.
pub fn parse<I, E>(tokens: I) -> Result<Vec<SExp>, E>
where
    I: IntoIterator<Item = Result<Token, E>>,
    E: From<ParseError>,
{
    let mut state = ParseState::new();

    for token in tokens {
        match token? {
            Token::LParen(p) => state.open(Delimiter::Paren, p.position)?,
            Token::LBracket(p) => state.open(Delimiter::Bracket, p.position)?,
            Token::RParen(p) => state.close(Delimiter::Paren, p.position)?,
            Token::RBracket(p) => state.close(Delimiter::Bracket, p.position)?,
            Token::Ident(ident) => {
                state.push(SExp::new(SExpKind::Symbol(ident.value), ident.position))
            }
            Token::StringLiteral(string) => {
                state.push(SExp::new(SExpKind::String(string.value), string.position))
            }
            Token::Number(number) => {
                state.push(SExp::new(SExpKind::Number(number.value), number.position))
            }
        }
    }

    Ok(state.finish()?)
}
