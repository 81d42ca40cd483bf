use std::collections::HashMap;

use super::ty::{Type, TypeVarSupply};

/// One scope of symbol types. Lookups fall back to the parent scope, which is
/// borrowed, not owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEnv<'a> {
    bindings: HashMap<String, Type>,
    parent: Option<&'a TypeEnv<'a>>,
}

impl<'a> TypeEnv<'a> {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_bindings(bindings: Vec<(String, Type)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
            parent: None,
        }
    }

    pub fn with_parent(parent: &'a TypeEnv<'a>) -> Self {
        TypeEnv {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// The outermost scope every program starts in.
    ///
    /// `map` mentions type variables, so they are drawn from the supply of the
    /// run that will use this environment.
    pub fn standard(supply: &mut TypeVarSupply) -> Self {
        let arithmetic = || Type::func(vec![Type::number(), Type::number()], Type::number());
        let a = Type::Var(supply.fresh());
        let b = Type::Var(supply.fresh());

        TypeEnv::with_bindings(vec![
            ("+".to_string(), arithmetic()),
            ("-".to_string(), arithmetic()),
            ("*".to_string(), arithmetic()),
            ("/".to_string(), arithmetic()),
            (
                "str".to_string(),
                Type::func(vec![Type::number()], Type::string()),
            ),
            (
                "map".to_string(),
                Type::func(
                    vec![Type::func(vec![a.clone()], b.clone()), Type::array(a)],
                    Type::array(b),
                ),
            ),
        ])
    }

    pub fn insert(&mut self, name: String, ty: Type) {
        self.bindings.insert(name, ty);
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings
            .get(name)
            .or_else(|| self.parent.and_then(|p| p.lookup(name)))
    }
}
