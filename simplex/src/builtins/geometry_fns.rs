//! Root-scope solid/slice constructors and the primitive methods that wrap
//! the geometry kernel stand-in: boolean
//! ops, affine transforms, extrusion/revolution, bounding queries.

use std::rc::Rc;

use nalgebra::{Matrix4, Vector2, Vector3};
use simplex_parser::Span;

use crate::error::EvalError;
use crate::geometry::{self, Solid};
use crate::types::{self, TypeId};
use crate::value::function::PrimitiveFn;
use crate::value::Value;

use super::method;

fn invalid(name: &str, receiver: &str) -> EvalError {
    EvalError::InvalidParameter {
        name: name.to_string(),
        receiver: Some(receiver.to_string()),
        span: Span::empty(),
    }
}

fn as_solid<'a>(recv: Option<&'a Value>, method_name: &str) -> Result<&'a Rc<Solid>, EvalError> {
    match recv {
        Some(Value::Solid(s)) => Ok(s),
        _ => Err(invalid(method_name, "Solid")),
    }
}

fn as_float(v: &Value) -> Option<f64> {
    match v {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        _ => None,
    }
}

/// Root-scope constructor functions: `cuboid`, `cylinder`, `sphere`,
/// `slice`.
pub fn constructors() -> Vec<(&'static str, Vec<TypeId>, TypeId, PrimitiveFn)> {
    vec![
        (
            "cuboid",
            vec![types::float(), types::float(), types::float()],
            types::solid(),
            Rc::new(|_self, args, _env| {
                let (sx, sy, sz) = (
                    as_float(&args[0]).ok_or_else(|| invalid("cuboid", "Float"))?,
                    as_float(&args[1]).ok_or_else(|| invalid("cuboid", "Float"))?,
                    as_float(&args[2]).ok_or_else(|| invalid("cuboid", "Float"))?,
                );
                Ok(Value::Solid(Rc::new(geometry::solid::cuboid(sx, sy, sz))))
            }),
        ),
        (
            "cylinder",
            vec![types::float(), types::float(), types::float()],
            types::solid(),
            Rc::new(|_self, args, _env| {
                let h = as_float(&args[0]).ok_or_else(|| invalid("cylinder", "Float"))?;
                let r1 = as_float(&args[1]).ok_or_else(|| invalid("cylinder", "Float"))?;
                let r2 = as_float(&args[2]).ok_or_else(|| invalid("cylinder", "Float"))?;
                Ok(Value::Solid(Rc::new(geometry::solid::cylinder(h, r1, r2, 32))))
            }),
        ),
        (
            "sphere",
            vec![types::float()],
            types::solid(),
            Rc::new(|_self, args, _env| {
                let r = as_float(&args[0]).ok_or_else(|| invalid("sphere", "Float"))?;
                Ok(Value::Solid(Rc::new(geometry::solid::sphere(r, 16))))
            }),
        ),
        (
            "slice",
            vec![types::vector(types::vec2())],
            types::slice(),
            Rc::new(|_self, args, _env| {
                let Value::Vector(points) = &args[0] else {
                    return Err(invalid("slice", "Vector(Vec2)"));
                };
                let outline = points
                    .iter()
                    .map(|p| match p {
                        Value::Vec2(v) => Ok(*v),
                        _ => Err(invalid("slice", "Vec2")),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Slice(Rc::new(geometry::slice::Slice::new(outline))))
            }),
        ),
        (
            "vec2",
            vec![types::float(), types::float()],
            types::vec2(),
            Rc::new(|_self, args, _env| {
                let x = as_float(&args[0]).ok_or_else(|| invalid("vec2", "Float"))?;
                let y = as_float(&args[1]).ok_or_else(|| invalid("vec2", "Float"))?;
                Ok(vec2_from(Vector2::new(x, y)))
            }),
        ),
        (
            "vec3",
            vec![types::float(), types::float(), types::float()],
            types::vec3(),
            Rc::new(|_self, args, _env| {
                let x = as_float(&args[0]).ok_or_else(|| invalid("vec3", "Float"))?;
                let y = as_float(&args[1]).ok_or_else(|| invalid("vec3", "Float"))?;
                let z = as_float(&args[2]).ok_or_else(|| invalid("vec3", "Float"))?;
                Ok(vec3_from(Vector3::new(x, y, z)))
            }),
        ),
    ]
}

pub fn install() {
    install_solid_methods();
    install_slice_methods();
    install_bounding_methods();
    install_vec_methods();
}

fn install_solid_methods() {
    let solid = types::solid();

    method(solid, "union", vec![solid], solid, Rc::new(|recv, args, _env| {
        let a = as_solid(recv, "union")?;
        let Value::Solid(b) = &args[0] else { return Err(invalid("union", "Solid")) };
        Ok(Value::Solid(Rc::new(a.union(b))))
    }));

    method(solid, "difference", vec![solid], solid, Rc::new(|recv, args, _env| {
        let a = as_solid(recv, "difference")?;
        let Value::Solid(b) = &args[0] else { return Err(invalid("difference", "Solid")) };
        Ok(Value::Solid(Rc::new(a.difference(b))))
    }));

    method(solid, "intersection", vec![solid], solid, Rc::new(|recv, args, _env| {
        let a = as_solid(recv, "intersection")?;
        let Value::Solid(b) = &args[0] else { return Err(invalid("intersection", "Solid")) };
        Ok(Value::Solid(Rc::new(a.intersection(b))))
    }));

    method(solid, "translate", vec![types::vec3()], solid, Rc::new(|recv, args, _env| {
        let s = as_solid(recv, "translate")?;
        let Value::Vec3(v) = &args[0] else { return Err(invalid("translate", "Vec3")) };
        Ok(Value::Solid(Rc::new(s.transform(&Matrix4::new_translation(v)))))
    }));

    method(solid, "scale", vec![types::vec3()], solid, Rc::new(|recv, args, _env| {
        let s = as_solid(recv, "scale")?;
        let Value::Vec3(v) = &args[0] else { return Err(invalid("scale", "Vec3")) };
        Ok(Value::Solid(Rc::new(s.transform(&Matrix4::new_nonuniform_scaling(v)))))
    }));

    method(solid, "rotate", vec![types::vec3(), types::float()], solid, Rc::new(|recv, args, _env| {
        let s = as_solid(recv, "rotate")?;
        let Value::Vec3(axis) = &args[0] else { return Err(invalid("rotate", "Vec3")) };
        let degrees = as_float(&args[1]).ok_or_else(|| invalid("rotate", "Float"))?;
        let scaled_axis = axis.normalize() * degrees.to_radians();
        let rotation = nalgebra::Rotation3::from_scaled_axis(scaled_axis).to_homogeneous();
        Ok(Value::Solid(Rc::new(s.transform(&rotation))))
    }));

    method(solid, "bounding_box", vec![], types::bounding_box(), Rc::new(|recv, _args, _env| {
        let s = as_solid(recv, "bounding_box")?;
        Ok(Value::BoundingBox(s.bounding_box()))
    }));

    method(solid, "hull", vec![], solid, Rc::new(|recv, _args, _env| {
        let s = as_solid(recv, "hull")?;
        Ok(Value::Solid(Rc::new(s.hull())))
    }));
}

fn install_slice_methods() {
    let slice = types::slice();

    method(slice, "extrude", vec![types::float()], types::solid(), Rc::new(|recv, args, _env| {
        let Some(Value::Slice(s)) = recv else { return Err(invalid("extrude", "Slice")) };
        let height = as_float(&args[0]).ok_or_else(|| invalid("extrude", "Float"))?;
        Ok(Value::Solid(Rc::new(s.extrude(height))))
    }));

    method(
        slice,
        "revolve",
        vec![types::float(), types::int()],
        types::solid(),
        Rc::new(|recv, args, _env| {
            let Some(Value::Slice(s)) = recv else { return Err(invalid("revolve", "Slice")) };
            let angle = as_float(&args[0]).ok_or_else(|| invalid("revolve", "Float"))?;
            let Value::Int(segments) = &args[1] else { return Err(invalid("revolve", "Int")) };
            Ok(Value::Solid(Rc::new(s.revolve(angle, *segments as usize))))
        }),
    );

    method(slice, "bounding_rect", vec![], types::bounding_rect(), Rc::new(|recv, _args, _env| {
        let Some(Value::Slice(s)) = recv else { return Err(invalid("bounding_rect", "Slice")) };
        Ok(Value::BoundingRect(s.bounding_rect()))
    }));
}

fn install_bounding_methods() {
    method(types::bounding_box(), "low", vec![], types::vec3(), Rc::new(|recv, _args, _env| {
        let Some(Value::BoundingBox(b)) = recv else { return Err(invalid("low", "BoundingBox")) };
        Ok(Value::Vec3(b.low))
    }));
    method(types::bounding_box(), "high", vec![], types::vec3(), Rc::new(|recv, _args, _env| {
        let Some(Value::BoundingBox(b)) = recv else { return Err(invalid("high", "BoundingBox")) };
        Ok(Value::Vec3(b.high))
    }));

    method(types::bounding_rect(), "low", vec![], types::vec2(), Rc::new(|recv, _args, _env| {
        let Some(Value::BoundingRect(b)) = recv else { return Err(invalid("low", "BoundingRect")) };
        Ok(Value::Vec2(b.low))
    }));
    method(types::bounding_rect(), "high", vec![], types::vec2(), Rc::new(|recv, _args, _env| {
        let Some(Value::BoundingRect(b)) = recv else { return Err(invalid("high", "BoundingRect")) };
        Ok(Value::Vec2(b.high))
    }));
}

fn install_vec_methods() {
    let vec2 = types::vec2();

    method(vec2, "plus", vec![vec2], vec2, Rc::new(|recv, args, _env| {
        let Some(Value::Vec2(a)) = recv else { return Err(invalid("plus", "Vec2")) };
        let Value::Vec2(b) = &args[0] else { return Err(invalid("plus", "Vec2")) };
        Ok(vec2_from(a + b))
    }));

    method(vec2, "minus", vec![vec2], vec2, Rc::new(|recv, args, _env| {
        let Some(Value::Vec2(a)) = recv else { return Err(invalid("minus", "Vec2")) };
        let Value::Vec2(b) = &args[0] else { return Err(invalid("minus", "Vec2")) };
        Ok(vec2_from(a - b))
    }));

    method(vec2, "eq", vec![vec2], types::boolean(), Rc::new(|recv, args, _env| {
        let Some(Value::Vec2(a)) = recv else { return Err(invalid("eq", "Vec2")) };
        let Value::Vec2(b) = &args[0] else { return Err(invalid("eq", "Vec2")) };
        Ok(Value::Bool(a == b))
    }));

    let vec3 = types::vec3();

    method(vec3, "plus", vec![vec3], vec3, Rc::new(|recv, args, _env| {
        let Some(Value::Vec3(a)) = recv else { return Err(invalid("plus", "Vec3")) };
        let Value::Vec3(b) = &args[0] else { return Err(invalid("plus", "Vec3")) };
        Ok(vec3_from(a + b))
    }));

    method(vec3, "minus", vec![vec3], vec3, Rc::new(|recv, args, _env| {
        let Some(Value::Vec3(a)) = recv else { return Err(invalid("minus", "Vec3")) };
        let Value::Vec3(b) = &args[0] else { return Err(invalid("minus", "Vec3")) };
        Ok(vec3_from(a - b))
    }));

    method(vec3, "eq", vec![vec3], types::boolean(), Rc::new(|recv, args, _env| {
        let Some(Value::Vec3(a)) = recv else { return Err(invalid("eq", "Vec3")) };
        let Value::Vec3(b) = &args[0] else { return Err(invalid("eq", "Vec3")) };
        Ok(Value::Bool(a == b))
    }));
}

fn vec3_from(v: Vector3<f64>) -> Value {
    Value::Vec3(v)
}

fn vec2_from(v: Vector2<f64>) -> Value {
    Value::Vec2(v)
}
