//! Root-scope constants and primitive methods, installed once per process
//! into the global method tables and handed out per-module via a fresh
//! child [`Environment`].

mod geometry_fns;
mod numeric;
mod vector;

use std::cell::Cell;
use std::rc::Rc;

use nalgebra::{Vector2, Vector3};

use crate::env::Environment;
use crate::types::{self, TypeId};
use crate::value::function::{Alternative, Callable, FunctionValue, PrimitiveFn};
use crate::value::Value;

thread_local! {
    static INSTALLED: Cell<bool> = Cell::new(false);
}

/// Registers every built-in method and constructor into the global type
/// method tables. Safe to call repeatedly — only the first call has effect,
/// since the tables are process-global (the shared read state).
pub fn install_primitives() {
    INSTALLED.with(|installed| {
        if !installed.get() {
            installed.set(true);
            numeric::install();
            vector::install();
            geometry_fns::install();
        }
    });
}

/// Builds a fresh root [`Environment`] with every built-in constant and
/// constructor function bound.
pub fn root_environment() -> Environment {
    install_primitives();
    let env = Environment::root();

    env.define("pi", Value::Float(std::f64::consts::PI), Some(types::float()));
    env.define("MAXINT", Value::Int(i64::MAX), Some(types::int()));
    env.define("MININT", Value::Int(i64::MIN), Some(types::int()));
    env.define("zero_v2", Value::Vec2(Vector2::zeros()), Some(types::vec2()));
    env.define("zero_v3", Value::Vec3(Vector3::zeros()), Some(types::vec3()));

    for (name, params, ret, f) in geometry_fns::constructors() {
        define_function(&env, name, params, ret, f);
    }

    env
}

fn define_function(env: &Environment, name: &str, params: Vec<TypeId>, ret: TypeId, f: PrimitiveFn) {
    let alternative = Alternative {
        params,
        return_type: ret,
        callable: Callable::Primitive(f),
    };
    let fn_type = types::function(vec![alternative.params.clone()], ret);
    env.define(
        name,
        Value::Function(Rc::new(FunctionValue {
            name: name.to_string(),
            alternatives: vec![alternative],
        })),
        Some(fn_type),
    );
}

/// Registers one built-in method alternative on `target`'s method table.
pub(crate) fn method(target: TypeId, name: &str, params: Vec<TypeId>, ret: TypeId, f: PrimitiveFn) {
    types::method_table::register(
        target,
        name,
        Alternative {
            params,
            return_type: ret,
            callable: Callable::Primitive(f),
        },
        false,
    );
}
