//! Tree-walking evaluator. `eval_expr` is the single entry
//! point; every AST expression variant has a match arm.

pub mod dispatch;

use simplex_parser::ast::{BinOp, Expr, Literal, UnOp};

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::function::{Alternative, Callable, FunctionValue, UserBody};
use crate::value::record::DataRecord;
use crate::value::Value;
use std::rc::Rc;

pub fn eval_expr(expr: &Expr, env: &Environment) -> Result<Value, EvalError> {
    log::trace!("eval {:?} at {:?}", std::mem::discriminant(expr), expr.span());
    match expr {
        Expr::Literal(lit, _) => Ok(eval_literal(lit)),

        Expr::Variable(name, span) => env.get(name).ok_or_else(|| {
            // A name with a declared type but no binding yet is a `let`
            // whose static type was installed ahead of its initializer
            // running; referencing it before that point is a forward
            // reference, distinct from a name that was never declared.
            if env.get_declared_type(name).is_some() {
                EvalError::UninitializedBinding {
                    name: name.clone(),
                    span: *span,
                }
            } else {
                EvalError::Undefined {
                    name: name.clone(),
                    span: *span,
                }
            }
        }),

        Expr::ScopedRef(scope, name, span) => {
            let scope_env = env.import_scope(scope).ok_or_else(|| EvalError::Undefined {
                name: scope.clone(),
                span: *span,
            })?;
            scope_env.get(name).ok_or_else(|| EvalError::Undefined {
                name: format!("{scope}::{name}"),
                span: *span,
            })
        }

        Expr::VectorLit(elements, _) => {
            let mut values = Vec::with_capacity(elements.len());
            for e in elements {
                values.push(eval_expr(e, env)?);
            }
            Ok(Value::Vector(Rc::new(values)))
        }

        Expr::RecordConstruct(type_name, args, span) => {
            let fields = args
                .iter()
                .map(|a| eval_expr(a, env))
                .collect::<Result<Vec<_>, _>>()?;
            let names = crate::types::records::get(type_name).ok_or_else(|| EvalError::Undefined {
                name: type_name.clone(),
                span: *span,
            })?;
            Ok(Value::Record(Rc::new(DataRecord {
                type_name: type_name.clone(),
                field_names: names,
                fields,
            })))
        }

        Expr::FieldAccess(target, field, span) => {
            let value = eval_expr(target, env)?;
            match &value {
                Value::Record(r) => r.get(field).cloned().ok_or_else(|| EvalError::UnknownField {
                    field: field.clone(),
                    span: *span,
                }),
                Value::Vec2(v) => match field.as_str() {
                    "x" => Ok(Value::Float(v.x)),
                    "y" => Ok(Value::Float(v.y)),
                    _ => Err(EvalError::UnknownField { field: field.clone(), span: *span }),
                },
                Value::Vec3(v) => match field.as_str() {
                    "x" => Ok(Value::Float(v.x)),
                    "y" => Ok(Value::Float(v.y)),
                    "z" => Ok(Value::Float(v.z)),
                    _ => Err(EvalError::UnknownField { field: field.clone(), span: *span }),
                },
                other => Err(EvalError::UnsupportedOperation {
                    op: format!(".{field}"),
                    ty: other.type_id().display_name(),
                    span: *span,
                }),
            }
        }

        Expr::FieldUpdate(target, field, value_expr, span) => {
            let receiver = eval_expr(target, env)?;
            let new_value = eval_expr(value_expr, env)?;
            let updated = match &receiver {
                Value::Record(r) => {
                    r.with_field(field, new_value).ok_or_else(|| EvalError::UnknownField {
                        field: field.clone(),
                        span: *span,
                    })?
                }
                other => {
                    return Err(EvalError::UnsupportedOperation {
                        op: format!(".{field} :="),
                        ty: other.type_id().display_name(),
                        span: *span,
                    })
                }
            };
            let updated_value = Value::Record(updated);
            if let Expr::Variable(name, _) = target.as_ref() {
                env.assign(name, updated_value.clone());
            }
            Ok(updated_value)
        }

        Expr::Index(target, index, span) => {
            let receiver = eval_expr(target, env)?;
            let idx = eval_expr(index, env)?;
            index_vector(&receiver, &idx, *span)
        }

        Expr::IndexUpdate(target, index, value_expr, span) => {
            let receiver = eval_expr(target, env)?;
            let idx = eval_expr(index, env)?;
            let new_value = eval_expr(value_expr, env)?;
            let Value::Vector(v) = &receiver else {
                return Err(EvalError::UnsupportedOperation {
                    op: "[] :=".to_string(),
                    ty: receiver.type_id().display_name(),
                    span: *span,
                });
            };
            let Value::Int(i) = idx else {
                return Err(EvalError::UnsupportedOperation {
                    op: "[] :=".to_string(),
                    ty: idx.type_id().display_name(),
                    span: *span,
                });
            };
            let mut items = (**v).clone();
            let len = items.len();
            let pos = resolve_index(i, len).ok_or(EvalError::IndexOutOfBounds {
                index: i,
                length: len,
                span: *span,
            })?;
            items[pos] = new_value;
            let updated = Value::Vector(Rc::new(items));
            if let Expr::Variable(name, _) = target.as_ref() {
                env.assign(name, updated.clone());
            }
            Ok(updated)
        }

        Expr::Call(callee, args, span) => {
            let callee_value = eval_expr(callee, env)?;
            let arg_values = args.iter().map(|a| eval_expr(a, env)).collect::<Result<Vec<_>, _>>()?;
            match callee_value {
                Value::Function(f) => dispatch::dispatch_function(&f, &arg_values, *span),
                other => Err(EvalError::UnsupportedOperation {
                    op: "call".to_string(),
                    ty: other.type_id().display_name(),
                    span: *span,
                }),
            }
        }

        Expr::MethodCall(receiver, name, args, span) => {
            let receiver_value = eval_expr(receiver, env)?;
            let arg_values = args.iter().map(|a| eval_expr(a, env)).collect::<Result<Vec<_>, _>>()?;
            dispatch::dispatch_method(&receiver_value, name, &arg_values, *span)
        }

        Expr::Unary(op, operand, span) => {
            let value = eval_expr(operand, env)?;
            match op {
                UnOp::Not => Ok(Value::Bool(!value.is_truthy())),
                UnOp::Neg => dispatch::dispatch_method(&value, "neg", &[], *span),
            }
        }

        Expr::Binary(op, lhs, rhs, span) => eval_binary(*op, lhs, rhs, env, *span),

        Expr::Let(name, declared_type, init, _) => {
            let value = eval_expr(init, env)?;
            let ty = declared_type
                .as_ref()
                .map(|t| crate::analyzer::resolve_type_expr(t))
                .unwrap_or_else(|| Some(value.type_id()));
            env.define(name.clone(), value.clone(), ty);
            Ok(value)
        }

        Expr::If(branches, else_branch, _) => {
            for (cond, body) in branches {
                if eval_expr(cond, env)?.is_truthy() {
                    return eval_expr(body, env);
                }
            }
            match else_branch {
                Some(body) => eval_expr(body, env),
                None => Ok(Value::None),
            }
        }

        Expr::For(name, iterable, body, span) => {
            let iter_value = eval_expr(iterable, env)?;
            let Value::Vector(items) = iter_value else {
                return Err(EvalError::UnsupportedOperation {
                    op: "for .. in".to_string(),
                    ty: iter_value.type_id().display_name(),
                    span: *span,
                });
            };
            let mut results = Vec::with_capacity(items.len());
            for item in items.iter() {
                let scope = env.child();
                scope.define(name.clone(), item.clone(), Some(item.type_id()));
                results.push(eval_expr(body, &scope)?);
            }
            Ok(Value::Vector(Rc::new(results)))
        }

        Expr::While(cond, body, _) => {
            while eval_expr(cond, env)?.is_truthy() {
                let scope = env.child();
                eval_expr(body, &scope)?;
            }
            Ok(Value::None)
        }

        Expr::Block(exprs, _) => {
            let scope = env.child();
            let mut result = Value::None;
            for e in exprs {
                result = eval_expr(e, &scope)?;
            }
            Ok(result)
        }

        Expr::Lambda(def, _) => {
            let params: Vec<_> = def
                .params
                .iter()
                .map(|p| crate::analyzer::resolve_type_expr(&p.ty).unwrap_or_else(crate::types::any))
                .collect();
            let return_type = crate::analyzer::resolve_type_expr(&def.return_type).unwrap_or_else(crate::types::any);
            let alternative = Alternative {
                params,
                return_type,
                callable: Callable::UserDefined(Rc::new(UserBody {
                    param_names: def.params.iter().map(|p| p.name.clone()).collect(),
                    body: (*def.body).clone(),
                    closure: env.clone(),
                })),
            };
            Ok(Value::Function(Rc::new(FunctionValue {
                name: "<lambda>".to_string(),
                alternatives: vec![alternative],
            })))
        }

        Expr::Assign(name, value_expr, span) => {
            let value = eval_expr(value_expr, env)?;
            if !env.assign(name, value.clone()) {
                return Err(EvalError::Undefined {
                    name: name.clone(),
                    span: *span,
                });
            }
            Ok(value)
        }
    }
}

fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Int(i) => Value::Int(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Str(s) => Value::Str(s.clone()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::None => Value::None,
    }
}

fn eval_binary(
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
    env: &Environment,
    span: simplex_parser::Span,
) -> Result<Value, EvalError> {
    if op == BinOp::And {
        let l = eval_expr(lhs, env)?;
        return if !l.is_truthy() {
            Ok(Value::Bool(false))
        } else {
            Ok(Value::Bool(eval_expr(rhs, env)?.is_truthy()))
        };
    }
    if op == BinOp::Or {
        let l = eval_expr(lhs, env)?;
        return if l.is_truthy() {
            Ok(Value::Bool(true))
        } else {
            Ok(Value::Bool(eval_expr(rhs, env)?.is_truthy()))
        };
    }

    let left = eval_expr(lhs, env)?;
    let right = eval_expr(rhs, env)?;

    if matches!(op, BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq) {
        if matches!(left, Value::None) || matches!(right, Value::None) {
            return Err(EvalError::UnsupportedOperation {
                op: "compare".to_string(),
                ty: "None".to_string(),
                span,
            });
        }
        let ordering = dispatch::dispatch_method(&left, "compare", &[right], span)?;
        let Value::Int(sign) = ordering else {
            return Err(EvalError::UnsupportedOperation {
                op: "compare".to_string(),
                ty: left.type_id().display_name(),
                span,
            });
        };
        let result = match op {
            BinOp::NotEq => sign != 0,
            BinOp::Lt => sign < 0,
            BinOp::LtEq => sign <= 0,
            BinOp::Gt => sign > 0,
            BinOp::GtEq => sign >= 0,
            _ => unreachable!(),
        };
        return Ok(Value::Bool(result));
    }

    if op == BinOp::Eq {
        if matches!(left, Value::None) || matches!(right, Value::None) {
            return Err(EvalError::UnsupportedOperation {
                op: "eq".to_string(),
                ty: "None".to_string(),
                span,
            });
        }
    }

    dispatch::dispatch_method(&left, op.method_name(), &[right], span)
}

fn index_vector(receiver: &Value, index: &Value, span: simplex_parser::Span) -> Result<Value, EvalError> {
    let Value::Vector(items) = receiver else {
        return Err(EvalError::UnsupportedOperation {
            op: "index".to_string(),
            ty: receiver.type_id().display_name(),
            span,
        });
    };
    let Value::Int(i) = index else {
        return Err(EvalError::UnsupportedOperation {
            op: "index".to_string(),
            ty: index.type_id().display_name(),
            span,
        });
    };
    let len = items.len();
    let pos = resolve_index(*i, len).ok_or(EvalError::IndexOutOfBounds {
        index: *i,
        length: len,
        span,
    })?;
    Ok(items[pos].clone())
}

fn resolve_index(i: i64, len: usize) -> Option<usize> {
    if i < 0 || i as usize >= len {
        None
    } else {
        Some(i as usize)
    }
}
