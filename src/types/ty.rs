use std::collections::HashSet;
use std::fmt;

/// Nominal type atom. Values only come from the fixed registry below, so two
/// base types are the same type iff they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseType(&'static str);

impl BaseType {
    pub const NUMBER: BaseType = BaseType("Number");
    pub const STRING: BaseType = BaseType("String");
    pub const ARRAY: BaseType = BaseType("Array");

    const REGISTRY: [BaseType; 3] = [BaseType::NUMBER, BaseType::STRING, BaseType::ARRAY];

    pub fn lookup(name: &str) -> Option<BaseType> {
        Self::REGISTRY.into_iter().find(|base| base.0 == name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar {
    pub id: usize,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

/// Hands out type variables; ids are never reused by the same supply.
#[derive(Debug, Default)]
pub struct TypeVarSupply {
    next: usize,
}

impl TypeVarSupply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> TypeVar {
        let id = self.next;
        self.next += 1;
        TypeVar::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Base(BaseType),
    Func { params: Vec<Type>, ret: Box<Type> },
    Var(TypeVar),
    /// Constructor applied to an argument, e.g. `Array<Number>`.
    App(Box<Type>, Box<Type>),
}

impl Type {
    pub fn number() -> Self {
        Type::Base(BaseType::NUMBER)
    }

    pub fn string() -> Self {
        Type::Base(BaseType::STRING)
    }

    pub fn array(elem: Type) -> Self {
        Type::app(Type::Base(BaseType::ARRAY), elem)
    }

    pub fn func(params: Vec<Type>, ret: Type) -> Self {
        Type::Func {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn app(ctor: Type, arg: Type) -> Self {
        Type::App(Box::new(ctor), Box::new(arg))
    }

    /// Replace every occurrence of `var` with `replacement`.
    pub fn substitute(&self, var: &TypeVar, replacement: &Type) -> Type {
        match self {
            Type::Base(_) => self.clone(),
            Type::Var(v) if v == var => replacement.clone(),
            Type::Var(_) => self.clone(),
            Type::Func { params, ret } => Type::func(
                params
                    .iter()
                    .map(|p| p.substitute(var, replacement))
                    .collect(),
                ret.substitute(var, replacement),
            ),
            Type::App(ctor, arg) => Type::app(
                ctor.substitute(var, replacement),
                arg.substitute(var, replacement),
            ),
        }
    }

    pub fn occurs(&self, var: &TypeVar) -> bool {
        match self {
            Type::Base(_) => false,
            Type::Var(v) => v == var,
            Type::Func { params, ret } => params.iter().any(|p| p.occurs(var)) || ret.occurs(var),
            Type::App(ctor, arg) => ctor.occurs(var) || arg.occurs(var),
        }
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        match self {
            Type::Base(_) => HashSet::new(),
            Type::Var(v) => HashSet::from([*v]),
            Type::Func { params, ret } => {
                let mut set = ret.free_type_vars();
                for param in params {
                    set.extend(param.free_type_vars());
                }
                set
            }
            Type::App(ctor, arg) => {
                let mut set = ctor.free_type_vars();
                set.extend(arg.free_type_vars());
                set
            }
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Base(base) => base.name().to_string(),
            Type::Var(v) => format!("'t{}", v.id),
            Type::Func { params, ret } => {
                let params: Vec<_> = params.iter().map(Type::pretty).collect();
                format!("({}) -> {}", params.join(", "), ret.pretty())
            }
            Type::App(ctor, arg) => format!("{}<{}>", ctor.pretty(), arg.pretty()),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
