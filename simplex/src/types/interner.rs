//! Process-global interning table mapping structural type names to
//! identity-comparable [`TypeId`]s, stored separately from each type's
//! immutable descriptor.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use super::descriptor::TypeDescriptor;
use super::TypeId;

struct Interner {
    by_name: HashMap<String, TypeId>,
    descriptors: Vec<TypeDescriptor>,
    names: Vec<String>,
}

impl Interner {
    fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            descriptors: Vec::new(),
            names: Vec::new(),
        }
    }
}

static INTERNER: Lazy<Mutex<Interner>> = Lazy::new(|| Mutex::new(Interner::new()));

fn structural_name(descriptor: &TypeDescriptor) -> String {
    descriptor.structural_name(display_name)
}

/// Returns the structural display name for an already-interned type.
pub fn display_name(id: TypeId) -> String {
    let guard = INTERNER.lock().unwrap();
    guard
        .names
        .get(id.0)
        .cloned()
        .unwrap_or_else(|| "<unknown>".to_string())
}

pub fn descriptor(id: TypeId) -> TypeDescriptor {
    let guard = INTERNER.lock().unwrap();
    guard.descriptors[id.0].clone()
}

/// Interns a descriptor, returning its (possibly pre-existing) [`TypeId`].
/// Two structurally identical descriptors always yield the same id.
pub fn intern(descriptor: TypeDescriptor) -> TypeId {
    let name = structural_name(&descriptor);
    let mut guard = INTERNER.lock().unwrap();
    if let Some(id) = guard.by_name.get(&name) {
        return *id;
    }
    let id = TypeId(guard.descriptors.len());
    guard.descriptors.push(descriptor);
    guard.names.push(name.clone());
    guard.by_name.insert(name, id);
    id
}

pub fn lookup_simple(name: &str) -> Option<TypeId> {
    let guard = INTERNER.lock().unwrap();
    guard.by_name.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::simple;

    #[test]
    fn structurally_identical_types_share_identity() {
        let a = simple("Int");
        let b = simple("Int");
        assert_eq!(a, b);
    }

    #[test]
    fn different_names_are_distinct() {
        assert_ne!(simple("Int"), simple("Float"));
    }
}
