pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::Infer;
pub use subst::Substitution;
pub use ty::{BaseType, Type, TypeVar, TypeVarSupply};
pub use unify::{Constraint, unify};
