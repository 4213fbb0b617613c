//! The runtime value model: one closed `Value` enum, one per-variant
//! behavior (truthiness, primitive methods) registered at startup into the
//! type system's method tables.

pub mod function;
pub mod record;

use std::rc::Rc;

use nalgebra::{Vector2, Vector3};

use crate::geometry::{BoundingBox, BoundingRect, Slice, Solid};
use crate::types::TypeId;
use function::{FunctionValue, MethodValue};
use record::DataRecord;

#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
    Vec2(Vector2<f64>),
    Vec3(Vector3<f64>),
    Vector(Rc<Vec<Value>>),
    Record(Rc<DataRecord>),
    Function(Rc<FunctionValue>),
    Method(Rc<MethodValue>),
    Solid(Rc<Solid>),
    Slice(Rc<Slice>),
    Polygon(Rc<crate::geometry::Polygon>),
    BoundingBox(BoundingBox),
    BoundingRect(BoundingRect),
}

impl Value {
    /// Truthiness: every `ValueType` exposes `is_truthy`.
    /// `None` and `false` are falsy; empty vectors/strings are falsy;
    /// everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Vector(v) => !v.is_empty(),
            _ => true,
        }
    }

    /// The runtime `Type` this value carries (invariant: "every
    /// live value has a `ValueType` whose `asType` is the interned `Type`
    /// used during analysis").
    pub fn type_id(&self) -> TypeId {
        use crate::types;
        match self {
            Value::Int(_) => types::int(),
            Value::Float(_) => types::float(),
            Value::Str(_) => types::string(),
            Value::Bool(_) => types::boolean(),
            Value::None => types::none_type(),
            Value::Vec2(_) => types::vec2(),
            Value::Vec3(_) => types::vec3(),
            Value::Vector(v) => {
                let elem = v.first().map(Value::type_id).unwrap_or_else(types::any);
                types::vector(elem)
            }
            Value::Record(r) => types::simple(r.type_name.clone()),
            Value::Function(f) => types::function(
                f.alternatives
                    .iter()
                    .map(|a| a.params.clone())
                    .collect(),
                f.alternatives
                    .first()
                    .map(|a| a.return_type)
                    .unwrap_or_else(types::any),
            ),
            Value::Method(m) => types::method_type(
                m.target,
                m.alternatives.iter().map(|a| a.params.clone()).collect(),
                m.alternatives
                    .first()
                    .map(|a| a.return_type)
                    .unwrap_or_else(types::any),
            ),
            Value::Solid(_) => types::solid(),
            Value::Slice(_) => types::slice(),
            Value::Polygon(_) => types::polygon(),
            Value::BoundingBox(_) => types::bounding_box(),
            Value::BoundingRect(_) => types::bounding_rect(),
        }
    }

    /// Values eligible for the product driver's text-output group. Solids
    /// are excluded (they go to STL); everything else that has a sensible
    /// flat textual form renders here.
    pub fn is_text_renderable(&self) -> bool {
        matches!(self, Value::Str(_) | Value::Int(_) | Value::Float(_) | Value::Bool(_))
    }

    pub fn render_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Value::Solid(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::Vec2(a), Value::Vec2(b)) => a == b,
            (Value::Vec3(a), Value::Vec3(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}
