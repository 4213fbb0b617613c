//! Primitive methods for `Int`, `Float`, `String`, `Boolean`.
//!
//! Integer arithmetic overflow discipline (question, resolved
//! here): **wrapping**, via `i64::wrapping_*`. Only division/modulo by zero
//! raise `EvalError::DivideByZero`; overflow never panics or errors.

use std::rc::Rc;

use crate::error::EvalError;
use crate::types;
use crate::value::Value;

use super::method;

fn self_span() -> simplex_parser::Span {
    simplex_parser::Span::empty()
}

macro_rules! int_binop {
    ($name:expr, $op:ident) => {
        method(types::int(), $name, vec![types::int()], types::int(), Rc::new(|recv, args, _env| {
            let Some(Value::Int(a)) = recv else { unreachable!("receiver must be Int") };
            let Value::Int(b) = &args[0] else {
                return Err(EvalError::InvalidParameter {
                    name: $name.to_string(),
                    receiver: Some("Int".to_string()),
                    span: self_span(),
                });
            };
            Ok(Value::Int(a.$op(*b)))
        }));
    };
}

macro_rules! float_binop {
    ($name:expr, $op:tt) => {
        method(types::float(), $name, vec![types::float()], types::float(), Rc::new(|recv, args, _env| {
            let Some(Value::Float(a)) = recv else { unreachable!("receiver must be Float") };
            let b = match &args[0] {
                Value::Float(b) => *b,
                Value::Int(b) => *b as f64,
                _ => return Err(EvalError::InvalidParameter {
                    name: $name.to_string(),
                    receiver: Some("Float".to_string()),
                    span: self_span(),
                }),
            };
            Ok(Value::Float(*a $op b))
        }));
    };
}

pub fn install() {
    install_int();
    install_float();
    install_string();
    install_boolean();
}

fn install_int() {
    int_binop!("plus", wrapping_add);
    int_binop!("minus", wrapping_sub);
    int_binop!("times", wrapping_mul);

    method(types::int(), "div", vec![types::int()], types::int(), Rc::new(|recv, args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        let Value::Int(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "div".to_string(), receiver: Some("Int".to_string()), span: self_span() });
        };
        if *b == 0 {
            return Err(EvalError::DivideByZero { span: self_span() });
        }
        Ok(Value::Int(a.wrapping_div(*b)))
    }));

    method(types::int(), "mod", vec![types::int()], types::int(), Rc::new(|recv, args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        let Value::Int(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "mod".to_string(), receiver: Some("Int".to_string()), span: self_span() });
        };
        if *b == 0 {
            return Err(EvalError::DivideByZero { span: self_span() });
        }
        Ok(Value::Int(a.wrapping_rem(*b)))
    }));

    method(types::int(), "pow", vec![types::int()], types::int(), Rc::new(|recv, args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        let Value::Int(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "pow".to_string(), receiver: Some("Int".to_string()), span: self_span() });
        };
        Ok(Value::Int(a.wrapping_pow((*b).max(0) as u32)))
    }));

    method(types::int(), "neg", vec![], types::int(), Rc::new(|recv, _args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        Ok(Value::Int(a.wrapping_neg()))
    }));

    method(types::int(), "eq", vec![types::int()], types::boolean(), Rc::new(|recv, args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        Ok(Value::Bool(matches!(&args[0], Value::Int(b) if a == b)))
    }));

    method(types::int(), "compare", vec![types::int()], types::int(), Rc::new(|recv, args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        let Value::Int(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "compare".to_string(), receiver: Some("Int".to_string()), span: self_span() });
        };
        Ok(Value::Int(a.cmp(b) as i64))
    }));

    method(types::int(), "to_float", vec![], types::float(), Rc::new(|recv, _args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        Ok(Value::Float(*a as f64))
    }));

    // `1->to(3)` builds the inclusive vector `[1,2,3]`.
    method(types::int(), "to", vec![types::int()], types::vector(types::int()), Rc::new(|recv, args, _env| {
        let Some(Value::Int(a)) = recv else { unreachable!() };
        let Value::Int(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "to".to_string(), receiver: Some("Int".to_string()), span: self_span() });
        };
        let items: Vec<Value> = if a <= b {
            (*a..=*b).map(Value::Int).collect()
        } else {
            Vec::new()
        };
        Ok(Value::Vector(Rc::new(items)))
    }));
}

fn install_float() {
    float_binop!("plus", +);
    float_binop!("minus", -);
    float_binop!("times", *);

    method(types::float(), "div", vec![types::float()], types::float(), Rc::new(|recv, args, _env| {
        let Some(Value::Float(a)) = recv else { unreachable!() };
        let b = match &args[0] {
            Value::Float(b) => *b,
            Value::Int(b) => *b as f64,
            _ => return Err(EvalError::InvalidParameter { name: "div".to_string(), receiver: Some("Float".to_string()), span: self_span() }),
        };
        if b == 0.0 {
            return Err(EvalError::DivideByZero { span: self_span() });
        }
        Ok(Value::Float(a / b))
    }));

    method(types::float(), "mod", vec![types::float()], types::float(), Rc::new(|recv, args, _env| {
        let Some(Value::Float(a)) = recv else { unreachable!() };
        let b = match &args[0] {
            Value::Float(b) => *b,
            Value::Int(b) => *b as f64,
            _ => return Err(EvalError::InvalidParameter { name: "mod".to_string(), receiver: Some("Float".to_string()), span: self_span() }),
        };
        if b == 0.0 {
            return Err(EvalError::DivideByZero { span: self_span() });
        }
        Ok(Value::Float(a % b))
    }));

    method(types::float(), "pow", vec![types::float()], types::float(), Rc::new(|recv, args, _env| {
        let Some(Value::Float(a)) = recv else { unreachable!() };
        let b = match &args[0] {
            Value::Float(b) => *b,
            Value::Int(b) => *b as f64,
            _ => return Err(EvalError::InvalidParameter { name: "pow".to_string(), receiver: Some("Float".to_string()), span: self_span() }),
        };
        Ok(Value::Float(a.powf(b)))
    }));

    method(types::float(), "neg", vec![], types::float(), Rc::new(|recv, _args, _env| {
        let Some(Value::Float(a)) = recv else { unreachable!() };
        Ok(Value::Float(-a))
    }));

    method(types::float(), "eq", vec![types::float()], types::boolean(), Rc::new(|recv, args, _env| {
        let Some(Value::Float(a)) = recv else { unreachable!() };
        Ok(Value::Bool(matches!(&args[0], Value::Float(b) if a == b)))
    }));

    method(types::float(), "compare", vec![types::float()], types::int(), Rc::new(|recv, args, _env| {
        let Some(Value::Float(a)) = recv else { unreachable!() };
        let b = match &args[0] {
            Value::Float(b) => *b,
            Value::Int(b) => *b as f64,
            _ => return Err(EvalError::InvalidParameter { name: "compare".to_string(), receiver: Some("Float".to_string()), span: self_span() }),
        };
        Ok(Value::Int(a.partial_cmp(&b).map(|o| o as i64).unwrap_or(0)))
    }));
}

fn install_string() {
    method(types::string(), "plus", vec![types::string()], types::string(), Rc::new(|recv, args, _env| {
        let Some(Value::Str(a)) = recv else { unreachable!() };
        let Value::Str(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "plus".to_string(), receiver: Some("String".to_string()), span: self_span() });
        };
        Ok(Value::Str(format!("{a}{b}")))
    }));

    method(types::string(), "eq", vec![types::string()], types::boolean(), Rc::new(|recv, args, _env| {
        let Some(Value::Str(a)) = recv else { unreachable!() };
        Ok(Value::Bool(matches!(&args[0], Value::Str(b) if a == b)))
    }));

    method(types::string(), "compare", vec![types::string()], types::int(), Rc::new(|recv, args, _env| {
        let Some(Value::Str(a)) = recv else { unreachable!() };
        let Value::Str(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "compare".to_string(), receiver: Some("String".to_string()), span: self_span() });
        };
        Ok(Value::Int(a.cmp(b) as i64))
    }));

    method(types::string(), "length", vec![], types::int(), Rc::new(|recv, _args, _env| {
        let Some(Value::Str(a)) = recv else { unreachable!() };
        Ok(Value::Int(a.chars().count() as i64))
    }));
}

fn install_boolean() {
    method(types::boolean(), "eq", vec![types::boolean()], types::boolean(), Rc::new(|recv, args, _env| {
        let Some(Value::Bool(a)) = recv else { unreachable!() };
        Ok(Value::Bool(matches!(&args[0], Value::Bool(b) if a == b)))
    }));

    method(types::boolean(), "compare", vec![types::boolean()], types::int(), Rc::new(|recv, args, _env| {
        let Some(Value::Bool(a)) = recv else { unreachable!() };
        let Value::Bool(b) = &args[0] else {
            return Err(EvalError::InvalidParameter { name: "compare".to_string(), receiver: Some("Boolean".to_string()), span: self_span() });
        };
        Ok(Value::Int(a.cmp(b) as i64))
    }));
}
