use crate::ast::{SExp, SExpKind};
use crate::lexer::Span;

use super::{ParseError, ParseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Paren,
    Bracket,
}

impl Delimiter {
    pub fn opening(self) -> char {
        match self {
            Delimiter::Paren => '(',
            Delimiter::Bracket => '[',
        }
    }

    pub fn closing(self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
        }
    }
}

/// Deepest delimiter nesting accepted. Typing and printing recurse over the
/// tree, so deeper input is rejected here instead of exhausting the stack.
pub const MAX_DEPTH: usize = 256;

/// Siblings collected before a delimiter was opened.
#[derive(Debug)]
struct Frame {
    siblings: Vec<SExp>,
    open: Delimiter,
    position: Span,
}

#[derive(Debug, Default)]
pub struct ParseState {
    stack: Vec<Frame>,
    current: Vec<SExp>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, node: SExp) {
        self.current.push(node);
    }

    pub fn open(&mut self, open: Delimiter, position: Span) -> ParseResult<()> {
        if self.depth() >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                open,
                span: position,
            });
        }

        let siblings = std::mem::take(&mut self.current);
        self.stack.push(Frame {
            siblings,
            open,
            position,
        });
        Ok(())
    }

    pub fn close(&mut self, close: Delimiter, position: Span) -> ParseResult<()> {
        let Some(frame) = self.stack.pop() else {
            return Err(ParseError::UnexpectedClosing {
                close,
                span: position,
            });
        };

        if frame.open != close {
            return Err(ParseError::MismatchedDelimiter {
                open: frame.open,
                open_span: frame.position,
                close,
                span: position,
            });
        }

        let elements = std::mem::replace(&mut self.current, frame.siblings);
        let kind = match close {
            Delimiter::Paren => SExpKind::List(elements),
            Delimiter::Bracket => SExpKind::Vector(elements),
        };
        let span = frame.position.merge(&position);
        self.current.push(SExp::new(kind, span));
        Ok(())
    }

    pub fn finish(mut self) -> ParseResult<Vec<SExp>> {
        match self.stack.pop() {
            Some(frame) => Err(ParseError::UnclosedDelimiter {
                open: frame.open,
                span: frame.position,
            }),
            None => Ok(self.current),
        }
    }
}
