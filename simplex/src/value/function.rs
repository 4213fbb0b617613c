//! Callable bodies shared by function values, method-table entries, and
//! lambdas.

use std::fmt;
use std::rc::Rc;

use simplex_parser::ast::Expr;

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;

pub type PrimitiveFn =
    Rc<dyn Fn(Option<&Value>, &[Value], &Environment) -> Result<Value, EvalError>>;

#[derive(Clone)]
pub enum Callable {
    Primitive(PrimitiveFn),
    UserDefined(Rc<UserBody>),
}

pub struct UserBody {
    pub param_names: Vec<String>,
    pub body: Expr,
    pub closure: Environment,
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Primitive(_) => write!(f, "Callable::Primitive"),
            Callable::UserDefined(u) => {
                write!(f, "Callable::UserDefined({:?})", u.param_names)
            }
        }
    }
}

/// A single dispatchable shape: parameter types, return type, and the body
/// to run when this alternative is selected.
#[derive(Debug, Clone)]
pub struct Alternative {
    pub params: Vec<crate::types::TypeId>,
    pub return_type: crate::types::TypeId,
    pub callable: Callable,
}

/// A plain function value (bound via `let`/`fun`, or a `lambda`). Carries
/// its alternatives directly; dispatch skips the receiver-type lookup and
/// `self` binding that methods require.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    pub name: String,
    pub alternatives: Vec<Alternative>,
}

/// A method value produced by `meth`, bound to a receiver type and
/// installed into that type's method table.
#[derive(Debug, Clone)]
pub struct MethodValue {
    pub name: String,
    pub target: crate::types::TypeId,
    pub alternatives: Vec<Alternative>,
}
