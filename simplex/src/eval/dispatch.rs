//! The single dispatch algorithm shared by operator
//! desugaring, explicit method calls, and plain function calls.

use simplex_parser::Span;

use crate::env::Environment;
use crate::error::EvalError;
use crate::types::{self, method_table};
use crate::value::function::{Alternative, Callable};
use crate::value::Value;

use super::eval_expr;

/// Runs the body of `alternative` with `self_value` (for methods) and
/// `args` bound in a fresh child environment.
fn invoke(
    alternative: &Alternative,
    self_value: Option<&Value>,
    args: &[Value],
    span: Span,
) -> Result<Value, EvalError> {
    match &alternative.callable {
        Callable::Primitive(f) => {
            let scratch = Environment::root();
            f(self_value, args, &scratch)
        }
        Callable::UserDefined(body) => {
            let call_env = body.closure.child();
            if let Some(v) = self_value {
                call_env.define("self", v.clone(), Some(types::any()));
            }
            for (name, (value, ty)) in body
                .param_names
                .iter()
                .zip(args.iter().zip(alternative.params.iter()))
            {
                call_env.define(name.clone(), value.clone(), Some(*ty));
            }
            eval_expr(&body.body, &call_env).map_err(|e| match e {
                EvalError::Undefined { name, .. } => EvalError::Undefined { name, span },
                other => other,
            })
        }
    }
}

/// Dispatches a method call `receiver->name(args)` or operator desugaring.
pub fn dispatch_method(
    receiver: &Value,
    name: &str,
    args: &[Value],
    span: Span,
) -> Result<Value, EvalError> {
    let receiver_type = receiver.type_id();
    // Vector methods are registered once on the canonical `Vector(Any)` key
    // (the element-agnostic vector methods); a `Vector(Int)` receiver
    // falls back to it when no exact-type entry exists.
    let method = method_table::lookup(receiver_type, name)
        .or_else(|| {
            if receiver_type.is_vector() {
                method_table::lookup(types::vector(types::any()), name)
            } else {
                None
            }
        })
        .ok_or_else(|| EvalError::InvalidParameter {
            name: name.to_string(),
            receiver: Some(receiver_type.display_name()),
            span,
        })?;
    let arg_types: Vec<_> = args.iter().map(Value::type_id).collect();
    let idx = types::find_alternative(
        &method.alternatives.iter().map(|a| a.params.clone()).collect::<Vec<_>>(),
        &arg_types,
    )
    .ok_or_else(|| EvalError::InvalidParameter {
        name: name.to_string(),
        receiver: Some(receiver_type.display_name()),
        span,
    })?;
    invoke(&method.alternatives[idx], Some(receiver), args, span)
}

/// Dispatches a plain function call: no receiver-type lookup, no `self`
/// binding.
pub fn dispatch_function(
    function: &crate::value::function::FunctionValue,
    args: &[Value],
    span: Span,
) -> Result<Value, EvalError> {
    let arg_types: Vec<_> = args.iter().map(Value::type_id).collect();
    let idx = types::find_alternative(
        &function.alternatives.iter().map(|a| a.params.clone()).collect::<Vec<_>>(),
        &arg_types,
    )
    .ok_or_else(|| EvalError::InvalidParameter {
        name: function.name.clone(),
        receiver: None,
        span,
    })?;
    invoke(&function.alternatives[idx], None, args, span)
}
