//! Static analyzer: two-phase installation (`install_statics`,
//! `install_values`) followed by type-checking validation over the whole
//! module before any product runs.

use simplex_parser::ast::{
    BinOp, Definition, Expr, Literal, Module, TypeExpr, UnOp,
};

use crate::env::Environment;
use crate::error::AnalysisError;
use crate::types::{self, TypeId};
use crate::value::function::{Alternative, Callable, FunctionValue, UserBody};
use crate::value::Value;
use std::rc::Rc;

/// Resolves a parsed [`TypeExpr`] into an interned [`TypeId`]. Simple names
/// intern directly — whether a built-in atom or a user data type.
pub fn resolve_type_expr(ty: &TypeExpr) -> Option<TypeId> {
    Some(match ty {
        TypeExpr::Simple(name, _) => types::simple(name.clone()),
        TypeExpr::Vector(elem, _) => types::vector(resolve_type_expr(elem)?),
        TypeExpr::Function(args, ret, _) => {
            let alt: Vec<TypeId> = args
                .iter()
                .map(resolve_type_expr)
                .collect::<Option<Vec<_>>>()?;
            types::function(vec![alt], resolve_type_expr(ret)?)
        }
        TypeExpr::Method(target, args, ret, _) => {
            let alt: Vec<TypeId> = args
                .iter()
                .map(resolve_type_expr)
                .collect::<Option<Vec<_>>>()?;
            types::method_type(resolve_type_expr(target)?, vec![alt], resolve_type_expr(ret)?)
        }
    })
}

pub struct Analyzer {
    errors: Vec<AnalysisError>,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer { errors: Vec::new() }
    }

    /// Runs install_statics, install_values, then validation over every
    /// definition and product in `module`, binding everything into `env`.
    pub fn analyze_module(&mut self, module: &Module, env: &Environment) {
        self.install_statics(module, env);
        self.install_values(module, env);
        self.validate(module, env);
    }

    pub fn into_errors(self) -> Vec<AnalysisError> {
        self.errors
    }

    /// Pass 1: declare static type bindings and register data
    /// types / method signatures, so forward references type-check before
    /// any value exists.
    fn install_statics(&mut self, module: &Module, env: &Environment) {
        let mut seen = std::collections::HashSet::new();
        for def in &module.definitions {
            log::info!("install_statics: {}", def.name());
            if !seen.insert(def.name().to_string()) {
                self.errors.push(AnalysisError::DuplicateDefinition {
                    name: def.name().to_string(),
                    span: def.span(),
                });
                continue;
            }
            match def {
                Definition::Let(d) => {
                    if let Some(ty) = &d.declared_type {
                        if let Some(tid) = resolve_type_expr(ty) {
                            env.declare_type(d.name.clone(), tid);
                        }
                    }
                }
                Definition::Fun(d) => {
                    let params: Vec<TypeId> = d
                        .params
                        .iter()
                        .filter_map(|p| resolve_type_expr(&p.ty))
                        .collect();
                    let Some(ret) = resolve_type_expr(&d.return_type) else { continue };
                    let fn_type = types::function(vec![params], ret);
                    env.declare_type(d.name.clone(), fn_type);
                }
                Definition::Data(d) => {
                    let tid = types::simple(d.name.clone());
                    env.register_local_type(tid);
                    types::records::register(&d.name, d.fields.iter().map(|f| f.name.clone()).collect());
                    let field_types: Vec<TypeId> = d
                        .fields
                        .iter()
                        .filter_map(|f| resolve_type_expr(&f.ty))
                        .collect();
                    let ctor_type = types::function(vec![field_types], tid);
                    env.declare_type(d.name.clone(), ctor_type);
                }
                Definition::Meth(d) => {
                    let Some(target) = resolve_type_expr(&d.target) else { continue };
                    let params: Vec<TypeId> = d
                        .params
                        .iter()
                        .filter_map(|p| resolve_type_expr(&p.ty))
                        .collect();
                    let Some(ret) = resolve_type_expr(&d.return_type) else { continue };
                    // registered in install_values once the body's closure environment exists
                    let _ = (target, params, ret);
                }
            }
        }
    }

    /// Pass 2: evaluate initializers and build the closures for
    /// functions/methods/data constructors against the now-fully-declared
    /// environment.
    fn install_values(&mut self, module: &Module, env: &Environment) {
        for def in &module.definitions {
            log::info!("install_values: {}", def.name());
            match def {
                Definition::Let(d) => match crate::eval::eval_expr(&d.init, env) {
                    Ok(v) => {
                        let ty = d
                            .declared_type
                            .as_ref()
                            .and_then(resolve_type_expr)
                            .unwrap_or_else(|| v.type_id());
                        env.define(d.name.clone(), v, Some(ty));
                    }
                    Err(e) => self.errors.push(AnalysisError::TypeMismatch {
                        expected: "a value".to_string(),
                        found: e.to_string(),
                        span: d.span,
                    }),
                },
                Definition::Fun(d) => {
                    let params: Vec<TypeId> = d
                        .params
                        .iter()
                        .filter_map(|p| resolve_type_expr(&p.ty))
                        .collect();
                    let Some(ret) = resolve_type_expr(&d.return_type) else { continue };
                    let alternative = Alternative {
                        params,
                        return_type: ret,
                        callable: Callable::UserDefined(Rc::new(UserBody {
                            param_names: d.params.iter().map(|p| p.name.clone()).collect(),
                            body: (*d.body).clone(),
                            closure: env.clone(),
                        })),
                    };
                    env.define(
                        d.name.clone(),
                        Value::Function(Rc::new(FunctionValue {
                            name: d.name.clone(),
                            alternatives: vec![alternative],
                        })),
                        env.get_declared_type(&d.name),
                    );
                }
                Definition::Data(d) => {
                    let tid = types::simple(d.name.clone());
                    let field_names: Vec<String> = d.fields.iter().map(|f| f.name.clone()).collect();
                    let field_types: Vec<TypeId> = d
                        .fields
                        .iter()
                        .filter_map(|f| resolve_type_expr(&f.ty))
                        .collect();
                    let type_name = d.name.clone();
                    let ctor = Callable::Primitive(Rc::new(move |_self, args, _env| {
                        Ok(Value::Record(Rc::new(crate::value::record::DataRecord {
                            type_name: type_name.clone(),
                            field_names: field_names.clone(),
                            fields: args.to_vec(),
                        })))
                    }));
                    let alternative = Alternative {
                        params: field_types,
                        return_type: tid,
                        callable: ctor,
                    };
                    env.define(
                        d.name.clone(),
                        Value::Function(Rc::new(FunctionValue {
                            name: d.name.clone(),
                            alternatives: vec![alternative],
                        })),
                        env.get_declared_type(&d.name),
                    );
                }
                Definition::Meth(d) => {
                    let Some(target) = resolve_type_expr(&d.target) else { continue };
                    let params: Vec<TypeId> = d
                        .params
                        .iter()
                        .filter_map(|p| resolve_type_expr(&p.ty))
                        .collect();
                    let Some(ret) = resolve_type_expr(&d.return_type) else { continue };
                    let alternative = Alternative {
                        params,
                        return_type: ret,
                        callable: Callable::UserDefined(Rc::new(UserBody {
                            param_names: d.params.iter().map(|p| p.name.clone()).collect(),
                            body: (*d.body).clone(),
                            closure: env.clone(),
                        })),
                    };
                    types::method_table::register(target, &d.name, alternative, true);
                }
            }
        }
    }

    fn validate(&mut self, module: &Module, env: &Environment) {
        for def in &module.definitions {
            if let Definition::Fun(d) = def {
                let scope = env.child();
                self.check_duplicate_params(&d.params);
                for p in &d.params {
                    if let Some(tid) = resolve_type_expr(&p.ty) {
                        scope.define(p.name.clone(), placeholder_for(tid), Some(tid));
                    }
                }
                match self.check_expr(&d.body, &scope) {
                    Ok(()) => self.check_return_type(&d.name, &d.return_type, &d.body, &scope),
                    Err(e) => self.errors.push(e),
                }
            }
            if let Definition::Meth(d) = def {
                let scope = env.child();
                if let Some(tid) = resolve_type_expr(&d.target) {
                    scope.define("self", placeholder_for(tid), Some(tid));
                }
                self.check_duplicate_params(&d.params);
                for p in &d.params {
                    if let Some(tid) = resolve_type_expr(&p.ty) {
                        scope.define(p.name.clone(), placeholder_for(tid), Some(tid));
                    }
                }
                match self.check_expr(&d.body, &scope) {
                    Ok(()) => self.check_return_type(&d.name, &d.return_type, &d.body, &scope),
                    Err(e) => self.errors.push(e),
                }
            }
        }
        for product in &module.products {
            let scope = env.child();
            for expr in &product.body {
                if let Err(e) = self.check_expr(expr, &scope) {
                    self.errors.push(e);
                }
            }
        }
    }

    fn check_duplicate_params(&mut self, params: &[simplex_parser::ast::Param]) {
        let mut seen = std::collections::HashSet::new();
        for p in params {
            if !seen.insert(p.name.clone()) {
                self.errors.push(AnalysisError::DuplicateDefinition {
                    name: p.name.clone(),
                    span: p.span,
                });
            }
        }
    }

    /// Compares a function/method body's inferred result type against its
    /// declared return type. Skipped (not an error) when the body's type
    /// can't be statically inferred — runtime dispatch remains authoritative
    /// for anything `infer_static_type` doesn't cover.
    fn check_return_type(&mut self, name: &str, declared: &TypeExpr, body: &Expr, scope: &Environment) {
        let Some(declared_tid) = resolve_type_expr(declared) else { return };
        let Some(found_tid) = infer_static_type(body, scope) else { return };
        if declared_tid != found_tid && declared_tid != types::any() {
            self.errors.push(AnalysisError::ReturnTypeMismatch {
                name: name.to_string(),
                declared: declared_tid.display_name(),
                found: found_tid.display_name(),
                span: body.span(),
            });
        }
    }

    /// Best-effort bottom-up type check: reference resolution, arity, and
    /// method existence. Not a full type reconstruction — runtime dispatch
    /// remains authoritative, matching a tree-walking evaluator's usual
    /// division of labor between analyzer and evaluator.
    fn check_expr(&mut self, expr: &Expr, env: &Environment) -> Result<(), AnalysisError> {
        match expr {
            Expr::Literal(_, _) => Ok(()),
            Expr::Variable(name, span) => {
                if env.get(name).is_some() || env.get_declared_type(name).is_some() {
                    Ok(())
                } else {
                    Err(AnalysisError::UnresolvedReference {
                        name: name.clone(),
                        span: *span,
                    })
                }
            }
            Expr::ScopedRef(scope, name, span) => {
                if env.import_scope(scope).is_some() {
                    Ok(())
                } else {
                    Err(AnalysisError::UnresolvedReference {
                        name: format!("{scope}::{name}"),
                        span: *span,
                    })
                }
            }
            Expr::VectorLit(items, _) => items.iter().try_for_each(|e| self.check_expr(e, env)),
            Expr::RecordConstruct(name, args, span) => {
                if types::records::get(name).is_none() {
                    return Err(AnalysisError::UnresolvedReference {
                        name: name.clone(),
                        span: *span,
                    });
                }
                args.iter().try_for_each(|e| self.check_expr(e, env))
            }
            Expr::FieldAccess(target, _, _) | Expr::FieldUpdate(target, _, _, _) => {
                self.check_expr(target, env)?;
                if let Expr::FieldUpdate(_, _, value, _) = expr {
                    self.check_expr(value, env)?;
                }
                Ok(())
            }
            Expr::Index(target, index, _) | Expr::IndexUpdate(target, index, _, _) => {
                self.check_expr(target, env)?;
                self.check_expr(index, env)?;
                if let Expr::IndexUpdate(_, _, value, _) = expr {
                    self.check_expr(value, env)?;
                }
                Ok(())
            }
            Expr::Call(callee, args, span) => {
                self.check_expr(callee, env)?;
                args.iter().try_for_each(|e| self.check_expr(e, env))?;
                if let Expr::Variable(name, _) = callee.as_ref() {
                    let declared = env.get_declared_type(name);
                    if env.get(name).is_none() && declared.is_none() {
                        return Err(AnalysisError::NotCallable {
                            name: name.clone(),
                            span: *span,
                        });
                    }
                    if let Some(tid) = declared {
                        if let types::TypeDescriptor::Function(alts, _) = tid.descriptor() {
                            if !alts.iter().any(|alt| alt.len() == args.len()) {
                                return Err(AnalysisError::ArityMismatch {
                                    name: name.clone(),
                                    arity: args.len(),
                                    span: *span,
                                });
                            }
                        }
                    }
                }
                Ok(())
            }
            Expr::MethodCall(receiver, _name, args, _span) => {
                self.check_expr(receiver, env)?;
                // Explicit `receiver->name(args)` calls are left to runtime
                // dispatch: method resolution is
                // late-bound on the receiver's actual runtime type, and a
                // literal's static type is not always its dispatch type once
                // user-defined methods are layered in after this pass runs.
                args.iter().try_for_each(|e| self.check_expr(e, env))
            }
            Expr::Unary(_, operand, _) => self.check_expr(operand, env),
            Expr::Binary(op, lhs, rhs, span) => {
                self.check_expr(lhs, env)?;
                self.check_expr(rhs, env)?;
                if !matches!(op, BinOp::And | BinOp::Or) {
                    if let Some(tid) = infer_static_type(lhs, env) {
                        let method = op.method_name();
                        if !has_method_with_vector_fallback(tid, method) {
                            return Err(AnalysisError::MissingMethod {
                                method: method.to_string(),
                                receiver: tid.display_name(),
                                span: *span,
                            });
                        }
                    }
                }
                Ok(())
            }
            Expr::Let(name, declared_type, init, span) => {
                self.check_expr(init, env)?;
                if let Some(tid) = declared_type.as_ref().and_then(resolve_type_expr) {
                    if let Some(found) = infer_static_type(init, env) {
                        if found != tid && tid != types::any() {
                            return Err(AnalysisError::TypeMismatch {
                                expected: tid.display_name(),
                                found: found.display_name(),
                                span: *span,
                            });
                        }
                    }
                    env.define(name.clone(), placeholder_for(tid), Some(tid));
                } else if let Some(tid) = infer_static_type(init, env) {
                    env.define(name.clone(), placeholder_for(tid), Some(tid));
                }
                Ok(())
            }
            Expr::If(branches, else_branch, _) => {
                for (cond, body) in branches {
                    self.check_expr(cond, env)?;
                    self.check_expr(body, env)?;
                }
                if let Some(body) = else_branch {
                    self.check_expr(body, env)?;
                }
                Ok(())
            }
            Expr::For(name, iterable, body, _) => {
                self.check_expr(iterable, env)?;
                let scope = env.child();
                let elem_type = infer_static_type(iterable, &scope).and_then(|t| match t.descriptor() {
                    types::TypeDescriptor::Vector(e) => Some(e),
                    _ => None,
                });
                scope.define(name.clone(), placeholder_for(elem_type.unwrap_or_else(types::any)), elem_type);
                self.check_expr(body, &scope)
            }
            Expr::While(cond, body, _) => {
                self.check_expr(cond, env)?;
                self.check_expr(body, env)
            }
            Expr::Block(exprs, _) => {
                let scope = env.child();
                exprs.iter().try_for_each(|e| self.check_expr(e, &scope))
            }
            Expr::Lambda(def, _) => {
                let scope = env.child();
                for p in &def.params {
                    if let Some(tid) = resolve_type_expr(&p.ty) {
                        scope.define(p.name.clone(), placeholder_for(tid), Some(tid));
                    }
                }
                self.check_expr(&def.body, &scope)
            }
            Expr::Assign(name, value, span) => {
                self.check_expr(value, env)?;
                if env.get(name).is_none() {
                    return Err(AnalysisError::UnresolvedReference {
                        name: name.clone(),
                        span: *span,
                    });
                }
                Ok(())
            }
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// A cheap stand-in value used only so declared-type bindings exist in the
/// analyzer's trial environment; never evaluated.
fn placeholder_for(_tid: TypeId) -> Value {
    Value::None
}

/// Vector methods are registered once on the canonical `Vector(Any)` key;
/// a `Vector(Int)` receiver falls back to it, mirroring the evaluator's
/// dispatch fallback in `eval::dispatch::dispatch_method`.
fn has_method_with_vector_fallback(tid: TypeId, name: &str) -> bool {
    types::method_table::has_method(tid, name)
        || (tid.is_vector() && types::method_table::has_method(types::vector(types::any()), name))
}

/// Best-effort static type inference, used only to decide whether an
/// operator/method name exists on the receiver; falls back to `None` (skip
/// the check) when the expression's type can't be determined without full
/// evaluation, which keeps the analyzer sound but intentionally incomplete
/// on dynamic expressions (e.g. the result of a call).
fn infer_static_type(expr: &Expr, env: &Environment) -> Option<TypeId> {
    match expr {
        Expr::Literal(lit, _) => Some(match lit {
            Literal::Int(_) => types::int(),
            Literal::Float(_) => types::float(),
            Literal::Str(_) => types::string(),
            Literal::Bool(_) => types::boolean(),
            Literal::None => types::none_type(),
        }),
        Expr::Variable(name, _) => env.get_declared_type(name),
        Expr::VectorLit(items, _) => {
            let elem = items.first().and_then(|e| infer_static_type(e, env))?;
            Some(types::vector(elem))
        }
        Expr::RecordConstruct(name, _, _) => Some(types::simple(name.clone())),
        Expr::Unary(UnOp::Not, _, _) => Some(types::boolean()),
        Expr::Binary(op, lhs, _, _) if matches!(op, BinOp::And | BinOp::Or | BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq) => {
            let _ = lhs;
            Some(types::boolean())
        }
        Expr::Let(_, _, init, _) => infer_static_type(init, env),
        Expr::Block(exprs, _) => exprs.last().and_then(|e| infer_static_type(e, env)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplex_parser::parse_module;

    fn analyze(src: &str) -> Vec<AnalysisError> {
        let module = parse_module(src).expect("source should parse");
        let env = crate::builtins::root_environment();
        let mut analyzer = Analyzer::new();
        analyzer.analyze_module(&module, &env);
        analyzer.into_errors()
    }

    #[test]
    fn unresolved_reference_is_reported() {
        let errors = analyze("produce(\"p\"){ nope }");
        assert!(errors.iter().any(|e| matches!(e, AnalysisError::UnresolvedReference { .. })));
    }

    #[test]
    fn data_record_construction_resolves() {
        let errors = analyze("data P{x:Int y:Int} produce(\"p\"){ #P(1,2) }");
        assert!(errors.is_empty(), "{errors:?}");
    }
}
