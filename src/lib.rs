//! # typed-sexp - type inference for an S-expression language
//!
//! A small compiler front end: it tokenizes source text, parses it into
//! symbolic expression trees and infers a static type for every node with
//! constraint generation plus unification.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → lazy Token stream
//!     ↓
//! [Parser] → Vec<SExp> (type slots empty)
//!     ↓
//! [Infer] → typed nodes + constraints
//!     ↓
//! [unify] → Substitution
//!     ↓
//! [Substitution::apply_to_node] → fully resolved types
//! ```
//!
//! ## Language
//!
//! - `( ... )` lists, `[ ... ]` vectors
//! - `"strings"` without escapes, numbers `[0-9]+(\.[0-9]+)?`
//! - identifiers `[a-zA-Z0-9.*/+-]+`, `;` line comments
//! - `(fn [x y] body...)` defines a function
//! - `(.method target args...)` calls `target.method`
//!
//! ## Type System
//!
//! Monomorphic Hindley-Milner style inference: every node gets a type term
//! (`Number`, `String`, `Array<T>`, function types, type variables), every
//! typing rule emits equality constraints, and unification solves them. There
//! is no let-polymorphism. The unifier has an occurs check, so self-referential
//! constraints fail with an infinite type error.
//!
//! ## Module Structure
//!
//! - [`lexer`] - Tokenization and source spans
//! - [`parser`] - Bracket-matching parser
//! - [`ast`] - The symbolic expression tree
//! - [`desugar`] - Classification of list forms
//! - [`types`] - Type terms, environments, inference and unification
//! - [`fmt`] - Printing trees back to surface syntax
//!
//! ## Getting Started
//!
//! 1. Parse source code with [`parse_source()`]
//! 2. Or parse and type check every top-level form with [`check_source()`]

pub mod ast;
pub mod desugar;
pub mod fmt;
pub mod lexer;
pub mod parser;
pub mod types;

use ast::SExp;
use lexer::{LexError, Lexer, Span};
use parser::ParseError;
use types::{Infer, TypeError};

/// Any failure of the pipeline. Each stage aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Type(TypeError),
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::Lex(err) => err.span(),
            CompileError::Parse(err) => err.span(),
            CompileError::Type(err) => err.span(),
        }
    }

    /// The error message with the offending source line underlined.
    pub fn render(&self, source: &str) -> String {
        self.span().annotate(source, &self.to_string())
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(err) => write!(f, "lex error: {err}"),
            CompileError::Parse(err) => write!(f, "parse error: {err}"),
            CompileError::Type(err) => write!(f, "type error: {err}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        CompileError::Lex(err)
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<TypeError> for CompileError {
    fn from(err: TypeError) -> Self {
        CompileError::Type(err)
    }
}

/// Lex and parse every top-level form of `source`.
pub fn parse_source(source: &str) -> Result<Vec<SExp>, CompileError> {
    parser::parse(Lexer::new(source).map(|token| token.map_err(CompileError::from)))
}

/// Parse `source` and type check each top-level form in its own inference run
/// against the standard environment.
pub fn check_source(source: &str) -> Result<Vec<SExp>, CompileError> {
    let mut forms = parse_source(source)?;

    for form in &mut forms {
        let mut infer = Infer::new();
        let env = infer.standard_env();
        infer.check(&env, form)?;
    }

    Ok(forms)
}
