//! # Form classification
//!
//! Decides how a parenthesized list is read before it is typed:
//!
//! - `(fn [params...] body...)` defines a function;
//! - `(.method target args...)` calls `target.method` with `args`;
//! - anything else applies its head to the remaining elements.
//!
//! This is purely syntactic and never rewrites the tree. The typed tree keeps
//! the shape that was parsed, and consumers such as code emitters apply the
//! same classification.

use crate::ast::SExp;

/// Reserved head symbol of the function definition form.
pub const FN_FORM: &str = "fn";

/// Prefix marking the method call sugar.
pub const METHOD_PREFIX: char = '.';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    /// `()`
    Empty,
    /// `(fn [params...] body...)`
    Function,
    /// `(.method target args...)`, arguments start at index 2.
    MethodCall { callee: String },
    /// `(head args...)`, arguments start at index 1.
    Application,
}

impl Form {
    /// Index of the first argument element for call forms.
    pub fn first_argument(&self) -> usize {
        match self {
            Form::MethodCall { .. } => 2,
            Form::Empty | Form::Function | Form::Application => 1,
        }
    }
}

/// Name `target.method` for a `.method` head applied to a symbol `target`.
pub fn method_callee(head: &str, target: &str) -> Option<String> {
    let method = head.strip_prefix(METHOD_PREFIX)?;
    if method.is_empty() {
        return None;
    }
    Some(format!("{target}{head}"))
}

pub fn classify(elements: &[SExp]) -> Form {
    let Some(head) = elements.first() else {
        return Form::Empty;
    };

    match head.as_symbol() {
        Some(FN_FORM) => Form::Function,
        Some(name) => elements
            .get(1)
            .and_then(SExp::as_symbol)
            .and_then(|target| method_callee(name, target))
            .map_or(Form::Application, |callee| Form::MethodCall { callee }),
        None => Form::Application,
    }
}
