//! Primitive methods on `Vector(T)`: length, concatenation, membership,
//! equality. Element-type-specific behavior (e.g. sum/map) is left to
//! user-defined methods and `for`-expressions; these are the handful
//! every vector carries regardless of element type.

use std::rc::Rc;

use simplex_parser::Span;

use crate::error::EvalError;
use crate::types;
use crate::value::Value;

use super::method;

fn receiver_items(recv: Option<&Value>) -> Rc<Vec<Value>> {
    match recv {
        Some(Value::Vector(items)) => items.clone(),
        _ => unreachable!("receiver must be Vector"),
    }
}

pub fn install() {
    let any_vector = types::vector(types::any());

    method(any_vector, "length", vec![], types::int(), Rc::new(|recv, _args, _env| {
        Ok(Value::Int(receiver_items(recv).len() as i64))
    }));

    method(any_vector, "plus", vec![any_vector], any_vector, Rc::new(|recv, args, _env| {
        let a = receiver_items(recv);
        let Value::Vector(b) = &args[0] else {
            return Err(EvalError::InvalidParameter {
                name: "plus".to_string(),
                receiver: Some("Vector".to_string()),
                span: Span::empty(),
            });
        };
        let mut combined = (*a).clone();
        combined.extend(b.iter().cloned());
        Ok(Value::Vector(Rc::new(combined)))
    }));

    method(any_vector, "eq", vec![any_vector], types::boolean(), Rc::new(|recv, args, _env| {
        let a = receiver_items(recv);
        let Value::Vector(b) = &args[0] else {
            return Ok(Value::Bool(false));
        };
        Ok(Value::Bool(*a == **b))
    }));

    method(any_vector, "is_empty", vec![], types::boolean(), Rc::new(|recv, _args, _env| {
        Ok(Value::Bool(receiver_items(recv).is_empty()))
    }));

    method(any_vector, "reverse", vec![], any_vector, Rc::new(|recv, _args, _env| {
        let mut items = (*receiver_items(recv)).clone();
        items.reverse();
        Ok(Value::Vector(Rc::new(items)))
    }));
}
