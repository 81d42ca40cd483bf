use super::env::TypeEnv;
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::{Type, TypeVarSupply};
use super::unify::{Constraint, unify};
use crate::ast::{SExp, SExpKind};
use crate::desugar::{Form, classify};
use crate::lexer::Span;

/// State of one inference run: the type variable supply and the constraints
/// collected so far.
///
/// Runs are independent: two `Infer` values never share variables.
#[derive(Debug, Default)]
pub struct Infer {
    supply: TypeVarSupply,
    constraints: Vec<Constraint>,
}

impl Infer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_var(&mut self) -> Type {
        Type::Var(self.supply.fresh())
    }

    /// Standard environment whose type variables come from this run.
    pub fn standard_env(&mut self) -> TypeEnv<'static> {
        TypeEnv::standard(&mut self.supply)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn constrain(&mut self, left: Type, right: Type, origin: Span) {
        self.constraints.push(Constraint::new(left, right, origin));
    }

    /// Type `node` and its children, recording the type in each node's slot
    /// and collecting the equalities the types must satisfy.
    pub fn infer(&mut self, env: &TypeEnv<'_>, node: &mut SExp) -> Result<Type, TypeError> {
        let position = node.position;

        let ty = match &mut node.kind {
            SExpKind::Symbol(name) => env
                .lookup(name)
                .cloned()
                .ok_or_else(|| TypeError::unbound_symbol(name.clone(), position))?,

            SExpKind::String(_) => Type::string(),

            SExpKind::Number(_) => Type::number(),

            SExpKind::Vector(elements) => self.infer_vector(env, elements)?,

            SExpKind::List(elements) => match classify(elements) {
                Form::Empty => {
                    return Err(TypeError::no_type("empty list has no callee", position));
                }
                Form::Function => self.infer_function(env, elements, position)?,
                Form::MethodCall { callee } => {
                    self.infer_method_call(env, elements, &callee, position)?
                }
                Form::Application => self.infer_application(env, elements, position)?,
            },
        };

        node.ty = Some(ty.clone());
        Ok(ty)
    }

    /// All elements share one element type.
    fn infer_vector(
        &mut self,
        env: &TypeEnv<'_>,
        elements: &mut [SExp],
    ) -> Result<Type, TypeError> {
        let elem_ty = self.fresh_var();

        for element in elements {
            let ty = self.infer(env, element)?;
            self.constrain(elem_ty.clone(), ty, element.position);
        }

        Ok(Type::array(elem_ty))
    }

    /// `(fn [params...] body...)`: the result is the type of the last body
    /// element.
    fn infer_function(
        &mut self,
        env: &TypeEnv<'_>,
        elements: &mut [SExp],
        position: Span,
    ) -> Result<Type, TypeError> {
        let Some((params, body)) = elements.get_mut(1..).and_then(|rest| rest.split_first_mut())
        else {
            return Err(TypeError::malformed_form(
                "fn expects a parameter vector",
                position,
            ));
        };

        let SExpKind::Vector(params) = &params.kind else {
            return Err(TypeError::malformed_form(
                "fn parameters must be a vector",
                params.position,
            ));
        };

        let mut scope = TypeEnv::with_parent(env);
        let mut names = Vec::with_capacity(params.len());
        for param in params {
            let Some(name) = param.as_symbol() else {
                return Err(TypeError::malformed_form(
                    "fn parameters must be symbols",
                    param.position,
                ));
            };
            let ty = self.fresh_var();
            scope.insert(name.to_string(), ty);
            names.push(name);
        }

        // a repeated parameter name refers to its last binding
        let param_types = names
            .iter()
            .filter_map(|name| scope.lookup(name).cloned())
            .collect();

        let mut result = None;
        for expr in body {
            result = Some(self.infer(&scope, expr)?);
        }
        let ret = result.ok_or_else(|| TypeError::no_type("fn has an empty body", position))?;

        Ok(Type::func(param_types, ret))
    }

    /// `(.method target args...)` calls `target.method`. The callee type is
    /// recorded on both the head and the target node.
    fn infer_method_call(
        &mut self,
        env: &TypeEnv<'_>,
        elements: &mut [SExp],
        callee: &str,
        position: Span,
    ) -> Result<Type, TypeError> {
        let (head, rest) = elements
            .split_first_mut()
            .ok_or_else(|| TypeError::no_type("empty list has no callee", position))?;
        let (target, args) = rest
            .split_first_mut()
            .ok_or_else(|| TypeError::no_type("method call has no target", position))?;

        let callee_span = head.position.merge(&target.position);
        let callee_ty = env
            .lookup(callee)
            .cloned()
            .ok_or_else(|| TypeError::unbound_symbol(callee.to_string(), callee_span))?;
        head.ty = Some(callee_ty.clone());
        target.ty = Some(callee_ty.clone());

        self.infer_call(env, callee_ty, args, position)
    }

    /// `(head args...)`: every element is typed first, then the head must be a
    /// function from the argument types to a fresh result.
    fn infer_application(
        &mut self,
        env: &TypeEnv<'_>,
        elements: &mut [SExp],
        position: Span,
    ) -> Result<Type, TypeError> {
        let (head, args) = elements
            .split_first_mut()
            .ok_or_else(|| TypeError::no_type("empty list has no callee", position))?;
        let head_ty = self.infer(env, head)?;

        self.infer_call(env, head_ty, args, position)
    }

    fn infer_call(
        &mut self,
        env: &TypeEnv<'_>,
        callee_ty: Type,
        args: &mut [SExp],
        position: Span,
    ) -> Result<Type, TypeError> {
        let arg_types = args
            .iter_mut()
            .map(|arg| self.infer(env, arg))
            .collect::<Result<Vec<_>, _>>()?;

        let result_ty = self.fresh_var();
        self.constrain(
            callee_ty,
            Type::func(arg_types, result_ty.clone()),
            position,
        );

        Ok(result_ty)
    }

    /// Unify every collected constraint. The constraint list is left empty.
    pub fn solve(&mut self) -> Result<Substitution, TypeError> {
        unify(std::mem::take(&mut self.constraints))
    }

    /// Infer, solve and write the resolved types back into the tree.
    ///
    /// On error the run is abandoned: no substitution is applied and pending
    /// constraints are dropped.
    pub fn check(&mut self, env: &TypeEnv<'_>, node: &mut SExp) -> Result<Substitution, TypeError> {
        self.constraints.clear();
        let result = self.infer(env, node).and_then(|_| self.solve());
        self.constraints.clear();

        let subst = result?;
        subst.apply_to_node(node);
        Ok(subst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> SExp {
        SExp::symbol(name, Span::default())
    }

    fn num(value: f64) -> SExp {
        SExp::new(SExpKind::Number(value), Span::default())
    }

    fn string(value: &str) -> SExp {
        SExp::new(SExpKind::String(value.to_string()), Span::default())
    }

    fn list(elements: Vec<SExp>) -> SExp {
        SExp::new(SExpKind::List(elements), Span::default())
    }

    fn vector(elements: Vec<SExp>) -> SExp {
        SExp::new(SExpKind::Vector(elements), Span::default())
    }

    #[test]
    fn test_infer_literals() {
        let mut infer = Infer::new();
        let env = TypeEnv::empty();

        let mut node = num(1.0);
        assert_eq!(infer.infer(&env, &mut node), Ok(Type::number()));
        assert_eq!(node.ty, Some(Type::number()));

        let mut node = string("x");
        assert_eq!(infer.infer(&env, &mut node), Ok(Type::string()));
        assert!(infer.constraints().is_empty());
    }

    #[test]
    fn test_infer_symbol_from_env() {
        let mut infer = Infer::new();
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Type::string())]);
        let mut node = sym("x");
        assert_eq!(infer.infer(&env, &mut node), Ok(Type::string()));
    }

    #[test]
    fn test_infer_unbound_symbol() {
        let mut infer = Infer::new();
        let mut node = sym("nope");
        let result = infer.infer(&TypeEnv::empty(), &mut node);
        assert!(matches!(
            result,
            Err(TypeError::UnboundSymbol { name, .. }) if name == "nope"
        ));
        assert_eq!(node.ty, None);
    }

    #[test]
    fn test_vector_constrains_every_element() {
        let mut infer = Infer::new();
        let mut node = vector(vec![num(1.0), num(2.0), num(3.0)]);
        let ty = infer.infer(&TypeEnv::empty(), &mut node).unwrap();

        assert!(matches!(ty, Type::App(..)));
        assert_eq!(infer.constraints().len(), 3);
    }

    #[test]
    fn test_application_constraint_shape() {
        let mut infer = Infer::new();
        let env = TypeEnv::with_bindings(vec![(
            "f".to_string(),
            Type::func(vec![Type::number()], Type::string()),
        )]);
        let mut node = list(vec![sym("f"), num(1.0)]);
        let ty = infer.infer(&env, &mut node).unwrap();

        let constraint = &infer.constraints()[0];
        assert_eq!(constraint.left, Type::func(vec![Type::number()], Type::string()));
        assert_eq!(constraint.right, Type::func(vec![Type::number()], ty));
    }

    #[test]
    fn test_function_params_share_body_types() {
        let mut infer = Infer::new();
        let mut node = list(vec![sym("fn"), vector(vec![sym("x")]), sym("x")]);
        let ty = infer.infer(&TypeEnv::empty(), &mut node).unwrap();

        match ty {
            Type::Func { params, ret } => {
                assert_eq!(params.len(), 1);
                assert_eq!(params[0], *ret);
            }
            other => panic!("expected function type, got {other}"),
        }
    }

    #[test]
    fn test_function_leaves_params_untyped() {
        let mut infer = Infer::new();
        let mut node = list(vec![sym("fn"), vector(vec![sym("x")]), sym("x")]);
        infer.infer(&TypeEnv::empty(), &mut node).unwrap();

        let SExpKind::List(elements) = &node.kind else {
            unreachable!()
        };
        assert_eq!(elements[0].ty, None);
        assert_eq!(elements[1].ty, None);
        assert!(elements[2].ty.is_some());
    }

    #[test]
    fn test_function_params_not_visible_outside() {
        let mut infer = Infer::new();
        let env = TypeEnv::with_bindings(vec![(
            "pair".to_string(),
            Type::func(vec![Type::number(), Type::number()], Type::number()),
        )]);
        let mut node = list(vec![
            sym("pair"),
            list(vec![sym("fn"), vector(vec![sym("x")]), sym("x")]),
            sym("x"),
        ]);
        let result = infer.infer(&env, &mut node);
        assert!(matches!(result, Err(TypeError::UnboundSymbol { .. })));
    }

    #[test]
    fn test_function_without_params_is_malformed() {
        let mut infer = Infer::new();
        let mut node = list(vec![sym("fn"), sym("x")]);
        let result = infer.infer(&TypeEnv::empty(), &mut node);
        assert!(matches!(result, Err(TypeError::MalformedForm { .. })));

        let mut node = list(vec![sym("fn")]);
        let result = infer.infer(&TypeEnv::empty(), &mut node);
        assert!(matches!(result, Err(TypeError::MalformedForm { .. })));
    }

    #[test]
    fn test_function_with_empty_body() {
        let mut infer = Infer::new();
        let mut node = list(vec![sym("fn"), vector(vec![sym("x")])]);
        let result = infer.infer(&TypeEnv::empty(), &mut node);
        assert!(matches!(result, Err(TypeError::NoType { .. })));
    }

    #[test]
    fn test_empty_list_has_no_type() {
        let mut infer = Infer::new();
        let mut node = list(vec![]);
        let result = infer.infer(&TypeEnv::empty(), &mut node);
        assert!(matches!(result, Err(TypeError::NoType { .. })));
    }

    #[test]
    fn test_check_resolves_tree() {
        let mut infer = Infer::new();
        let env = infer.standard_env();
        let mut node = list(vec![sym("+"), num(1.0), num(2.0)]);
        infer.check(&env, &mut node).unwrap();

        assert_eq!(node.ty, Some(Type::number()));
        assert!(infer.constraints().is_empty());
    }

    #[test]
    fn test_check_clears_constraints_on_error() {
        let mut infer = Infer::new();
        let env = infer.standard_env();
        let mut node = list(vec![sym("+"), num(1.0), string("x")]);
        assert!(infer.check(&env, &mut node).is_err());
        assert!(infer.constraints().is_empty());
    }
}
