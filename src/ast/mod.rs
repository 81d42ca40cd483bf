//! # Symbolic expression tree
//!
//! The parser produces a forest of [`SExp`] nodes. Each node owns its children
//! and has a type slot that stays `None` until inference fills it in.

use crate::lexer::Span;
use crate::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum SExpKind {
    Symbol(String),
    String(String),
    Number(f64),
    /// Parenthesized form `( ... )`
    List(Vec<SExp>),
    /// Bracketed form `[ ... ]`
    Vector(Vec<SExp>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SExp {
    pub kind: SExpKind,
    pub position: Span,
    /// Written by inference, rewritten by substitution.
    pub ty: Option<Type>,
}

impl SExp {
    pub fn new(kind: SExpKind, position: Span) -> Self {
        Self {
            kind,
            position,
            ty: None,
        }
    }

    pub fn symbol(name: impl Into<String>, position: Span) -> Self {
        Self::new(SExpKind::Symbol(name.into()), position)
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            SExpKind::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn children(&self) -> &[SExp] {
        match &self.kind {
            SExpKind::List(elements) | SExpKind::Vector(elements) => elements,
            SExpKind::Symbol(_) | SExpKind::String(_) | SExpKind::Number(_) => &[],
        }
    }

    /// Compares tags, payloads and children, ignoring spans and types.
    pub fn same_structure(&self, other: &SExp) -> bool {
        match (&self.kind, &other.kind) {
            (SExpKind::Symbol(a), SExpKind::Symbol(b)) => a == b,
            (SExpKind::String(a), SExpKind::String(b)) => a == b,
            (SExpKind::Number(a), SExpKind::Number(b)) => a == b,
            (SExpKind::List(a), SExpKind::List(b)) | (SExpKind::Vector(a), SExpKind::Vector(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_structure(y))
            }
            _ => false,
        }
    }
}
