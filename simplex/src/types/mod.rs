//! The Simplex nominal type system: interned, identity-compared types with
//! per-type mutable method tables.

pub mod descriptor;
pub mod display;
pub mod dispatch_error;
pub mod interner;
pub mod matching;
pub mod method_table;
pub mod records;

pub use descriptor::TypeDescriptor;
pub use dispatch_error::DispatchError;
pub use matching::{find_alternative, matches};

/// An identity-comparable handle to an interned [`TypeDescriptor`]. Two
/// structurally identical types always share the same `TypeId` (
/// "type uniqueness" invariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    pub fn descriptor(self) -> TypeDescriptor {
        interner::descriptor(self)
    }

    pub fn display_name(self) -> String {
        interner::display_name(self)
    }

    pub fn is_vector(self) -> bool {
        matches!(self.descriptor(), TypeDescriptor::Vector(_))
    }

    pub fn as_simple_name(self) -> Option<String> {
        match self.descriptor() {
            TypeDescriptor::Simple(name) => Some(name),
            _ => None,
        }
    }
}

pub fn simple(name: impl Into<String>) -> TypeId {
    interner::intern(TypeDescriptor::Simple(name.into()))
}

pub fn vector(element: TypeId) -> TypeId {
    interner::intern(TypeDescriptor::Vector(element))
}

pub fn function(alternatives: Vec<Vec<TypeId>>, ret: TypeId) -> TypeId {
    interner::intern(TypeDescriptor::Function(alternatives, ret))
}

pub fn method_type(target: TypeId, alternatives: Vec<Vec<TypeId>>, ret: TypeId) -> TypeId {
    interner::intern(TypeDescriptor::Method(target, alternatives, ret))
}

pub fn any() -> TypeId {
    simple("Any")
}

pub fn int() -> TypeId {
    simple("Int")
}

pub fn float() -> TypeId {
    simple("Float")
}

pub fn string() -> TypeId {
    simple("String")
}

pub fn boolean() -> TypeId {
    simple("Boolean")
}

pub fn none_type() -> TypeId {
    simple("None")
}

pub fn vec2() -> TypeId {
    simple("Vec2")
}

pub fn vec3() -> TypeId {
    simple("Vec3")
}

pub fn solid() -> TypeId {
    simple("Solid")
}

pub fn slice() -> TypeId {
    simple("Slice")
}

pub fn polygon() -> TypeId {
    simple("Polygon")
}

pub fn bounding_box() -> TypeId {
    simple("BoundingBox")
}

pub fn bounding_rect() -> TypeId {
    simple("BoundingRect")
}
