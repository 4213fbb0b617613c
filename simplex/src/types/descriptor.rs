//! The type descriptor shapes: `Simple`, `Vector`, `Function`,
//! `Method`. Descriptors are immutable once interned.

use super::TypeId;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Simple(String),
    Vector(TypeId),
    Function(Vec<Vec<TypeId>>, TypeId),
    Method(TypeId, Vec<Vec<TypeId>>, TypeId),
}

impl TypeDescriptor {
    /// The canonical structural name this descriptor interns under
    /// (`"Int"`, `"[Int]"`, `"(Int,Float):Solid"`, `"Int->(Int):Int"`).
    pub fn structural_name(&self, display: impl Fn(TypeId) -> String) -> String {
        match self {
            TypeDescriptor::Simple(name) => name.clone(),
            TypeDescriptor::Vector(elem) => format!("[{}]", display(*elem)),
            TypeDescriptor::Function(alts, ret) => {
                format!("{}:{}", format_alternatives(alts, &display), display(*ret))
            }
            TypeDescriptor::Method(target, alts, ret) => format!(
                "{}->{}:{}",
                display(*target),
                format_alternatives(alts, &display),
                display(*ret)
            ),
        }
    }
}

fn format_alternatives(alts: &[Vec<TypeId>], display: &impl Fn(TypeId) -> String) -> String {
    alts.iter()
        .map(|alt| {
            format!(
                "({})",
                alt.iter().map(|t| display(*t)).collect::<Vec<_>>().join(",")
            )
        })
        .collect::<Vec<_>>()
        .join("|")
}
