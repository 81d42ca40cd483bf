use std::fmt;

use super::ty::{Type, TypeVar};
use crate::ast::{SExp, SExpKind};
use crate::desugar::{Form, classify};

/// Ordered variable bindings found by unification.
///
/// A replacement may mention a variable bound later in the sequence, so the
/// pairs are applied one after another, never in parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(pub Vec<(TypeVar, Type)>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(Vec::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        Substitution(vec![(var, ty)])
    }

    pub fn push(&mut self, var: TypeVar, ty: Type) {
        self.0.push((var, ty));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TypeVar, Type)> {
        self.0.iter()
    }

    pub fn apply(&self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        for (var, replacement) in &self.0 {
            ty = ty.substitute(var, replacement);
        }
        ty
    }

    /// Rewrite the type slot of `node` and of every typed node below it.
    ///
    /// Inside a function definition only the body is visited: the `fn` head
    /// and the parameter vector carry no type.
    pub fn apply_to_node(&self, node: &mut SExp) {
        if let Some(ty) = &node.ty {
            node.ty = Some(self.apply(ty));
        }

        match &mut node.kind {
            SExpKind::Symbol(_) | SExpKind::String(_) | SExpKind::Number(_) => {}
            SExpKind::Vector(elements) => self.apply_to_all(elements),
            SExpKind::List(elements) => {
                let skip = match classify(elements) {
                    Form::Function => 2,
                    _ => 0,
                };
                self.apply_to_all(elements.iter_mut().skip(skip));
            }
        }
    }

    fn apply_to_all<'a>(&self, nodes: impl IntoIterator<Item = &'a mut SExp>) {
        for node in nodes {
            self.apply_to_node(node);
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (var, ty) in &self.0 {
            writeln!(f, "{} -> {}", Type::Var(*var), ty)?;
        }
        Ok(())
    }
}
