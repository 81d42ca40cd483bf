//! Pretty printer for symbolic expressions
//!
//! `Display` for [`SExp`] prints surface syntax that parses back to the same
//! tree. [`SExp::typed`] additionally appends `:Type` to every node whose type
//! slot is filled, e.g. `(+:(Number, Number) -> Number 1:Number 2:Number):Number`.

use std::fmt::{self, Display};

use crate::ast::{SExp, SExpKind};

/// Display adapter printing a tree with its type annotations.
pub struct Typed<'a>(&'a SExp);

impl SExp {
    pub fn typed(&self) -> Typed<'_> {
        Typed(self)
    }
}

impl Display for SExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_sexp(self, false, f)
    }
}

impl Display for Typed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_sexp(self.0, true, f)
    }
}

fn format_sexp(sexp: &SExp, typed: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &sexp.kind {
        SExpKind::Symbol(name) => f.write_str(name)?,
        SExpKind::String(value) => write!(f, "\"{value}\"")?,
        SExpKind::Number(value) => write!(f, "{value}")?,
        SExpKind::List(elements) => format_sequence(elements, '(', ')', typed, f)?,
        SExpKind::Vector(elements) => format_sequence(elements, '[', ']', typed, f)?,
    }

    match &sexp.ty {
        Some(ty) if typed => write!(f, ":{ty}"),
        _ => Ok(()),
    }
}

fn format_sequence(
    elements: &[SExp],
    open: char,
    close: char,
    typed: bool,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, elem) in elements.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        format_sexp(elem, typed, f)?;
    }
    write!(f, "{close}")
}

/// Print a forest of top-level forms, one per line.
pub fn format_program(forms: &[SExp]) -> String {
    forms
        .iter()
        .map(SExp::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
