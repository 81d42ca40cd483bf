use std::fmt;

use super::error::TypeError;
use super::subst::Substitution;
use super::ty::{Type, TypeVar};
use crate::lexer::Span;

/// `left` and `right` must end up as the same type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
    /// Node whose typing rule asked for the equality.
    pub origin: Span,
}

impl Constraint {
    pub fn new(left: Type, right: Type, origin: Span) -> Self {
        Self {
            left,
            right,
            origin,
        }
    }

    pub fn substitute(&mut self, var: &TypeVar, replacement: &Type) {
        self.left = self.left.substitute(var, replacement);
        self.right = self.right.substitute(var, replacement);
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ~ {}", self.left, self.right)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { left: Type, right: Type },
    ArityMismatch { left: Type, right: Type },
    OccursCheck { var: TypeVar, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { left, right } => {
                write!(f, "cannot unify {left} with {right}")
            }
            UnifyError::ArityMismatch { left, right } => {
                write!(f, "parameter count differs between {left} and {right}")
            }
            UnifyError::OccursCheck { var, ty } => {
                write!(
                    f,
                    "occurs check: cannot construct infinite type {} = {}",
                    Type::Var(*var),
                    ty
                )
            }
        }
    }
}

/// What solving a single constraint produced.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Discard,
    Bind(TypeVar, Type),
    Decompose(Vec<(Type, Type)>),
}

fn bind(var: TypeVar, ty: Type) -> Result<Step, UnifyError> {
    if ty.occurs(&var) {
        Err(UnifyError::OccursCheck { var, ty })
    } else {
        Ok(Step::Bind(var, ty))
    }
}

fn step(left: Type, right: Type) -> Result<Step, UnifyError> {
    if left == right {
        return Ok(Step::Discard);
    }

    match (left, right) {
        (Type::Var(var), ty) | (ty, Type::Var(var)) => bind(var, ty),

        (
            Type::Func {
                params: left_params,
                ret: left_ret,
            },
            Type::Func {
                params: right_params,
                ret: right_ret,
            },
        ) => {
            if left_params.len() != right_params.len() {
                return Err(UnifyError::ArityMismatch {
                    left: Type::Func {
                        params: left_params,
                        ret: left_ret,
                    },
                    right: Type::Func {
                        params: right_params,
                        ret: right_ret,
                    },
                });
            }
            let mut pairs: Vec<_> = left_params.into_iter().zip(right_params).collect();
            pairs.push((*left_ret, *right_ret));
            Ok(Step::Decompose(pairs))
        }

        (Type::App(left_ctor, left_arg), Type::App(right_ctor, right_arg)) => Ok(Step::Decompose(
            vec![(*left_ctor, *right_ctor), (*left_arg, *right_arg)],
        )),

        (left, right) => Err(UnifyError::Mismatch { left, right }),
    }
}

/// Solve `constraints` into a substitution.
///
/// Constraints are handled as a work-list. Each binding `v := t` is applied to
/// every constraint still waiting, so later constraints never mention an
/// already bound variable. The bindings are returned in the order found.
pub fn unify(constraints: Vec<Constraint>) -> Result<Substitution, TypeError> {
    let mut work = constraints;
    let mut subst = Substitution::empty();

    while let Some(Constraint {
        left,
        right,
        origin,
    }) = work.pop()
    {
        match step(left, right).map_err(|e| TypeError::from_unify_error(e, origin))? {
            Step::Discard => {}
            Step::Bind(var, ty) => {
                for constraint in &mut work {
                    constraint.substitute(&var, &ty);
                }
                subst.push(var, ty);
            }
            Step::Decompose(pairs) => work.extend(
                pairs
                    .into_iter()
                    .map(|(left, right)| Constraint::new(left, right, origin)),
            ),
        }
    }

    Ok(subst)
}
