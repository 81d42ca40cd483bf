//! # Type Error Definitions
//!
//! Errors raised while typing one top-level form:
//!
//! - a symbol is used but bound nowhere (`UnboundSymbol`)
//! - two function types disagree on parameter count (`ArityMismatch`)
//! - two types cannot be made equal (`UnificationFailure`)
//! - a type would have to contain itself (`InfiniteType`)
//! - a special form is written wrongly (`MalformedForm`)
//! - a node has nothing to take its type from (`NoType`)
//!
//! Every variant carries the span of the node it was raised for. Unification
//! failures point at the node whose rule produced the failing constraint.

use std::fmt;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;
use crate::lexer::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Reference to a symbol bound in no enclosing scope.
    UnboundSymbol { name: String, span: Span },

    /// Two function types with different parameter counts.
    ArityMismatch { left: Type, right: Type, span: Span },

    /// Two structurally incompatible types, e.g. `Number` and `String`.
    UnificationFailure { left: Type, right: Type, span: Span },

    /// Binding `var` to `ty` would create an infinite type.
    InfiniteType { var: TypeVar, ty: Type, span: Span },

    /// A special form with the wrong shape, e.g. `(fn x x)`.
    MalformedForm { message: String, span: Span },

    /// No type can be computed for the node, e.g. `()` or `(fn [x])`.
    NoType { reason: String, span: Span },
}

impl TypeError {
    pub fn unbound_symbol(name: String, span: Span) -> Self {
        TypeError::UnboundSymbol { name, span }
    }

    pub fn malformed_form(message: impl Into<String>, span: Span) -> Self {
        TypeError::MalformedForm {
            message: message.into(),
            span,
        }
    }

    pub fn no_type(reason: impl Into<String>, span: Span) -> Self {
        TypeError::NoType {
            reason: reason.into(),
            span,
        }
    }

    /// Attach the span of the constraint's origin to a unification error.
    pub fn from_unify_error(err: UnifyError, span: Span) -> Self {
        match err {
            UnifyError::Mismatch { left, right } => {
                TypeError::UnificationFailure { left, right, span }
            }
            UnifyError::ArityMismatch { left, right } => {
                TypeError::ArityMismatch { left, right, span }
            }
            UnifyError::OccursCheck { var, ty } => TypeError::InfiniteType { var, ty, span },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeError::UnboundSymbol { span, .. }
            | TypeError::ArityMismatch { span, .. }
            | TypeError::UnificationFailure { span, .. }
            | TypeError::InfiniteType { span, .. }
            | TypeError::MalformedForm { span, .. }
            | TypeError::NoType { span, .. } => *span,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeError::UnboundSymbol { name, .. } => write!(f, "unbound symbol: {name}"),
            TypeError::ArityMismatch { left, right, .. } => {
                write!(f, "arity mismatch: {left} vs {right}")
            }
            TypeError::UnificationFailure { left, right, .. } => {
                write!(f, "unification failure: cannot unify {left} with {right}")
            }
            TypeError::InfiniteType { var, ty, .. } => write!(
                f,
                "infinite type: {} = {}",
                Type::Var(*var),
                ty
            ),
            TypeError::MalformedForm { message, .. } => write!(f, "malformed form: {message}"),
            TypeError::NoType { reason, .. } => write!(f, "no type computed for node: {reason}"),
        }
    }
}

impl std::error::Error for TypeError {}
