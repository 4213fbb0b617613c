//! Per-type method tables, populated only during the two-phase install of
//! definitions and read-only during evaluation.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::value::function::{Alternative, MethodValue};

use super::TypeId;

type Table = HashMap<TypeId, HashMap<String, MethodValue>>;

thread_local! {
    static METHOD_TABLES: RefCell<Table> = RefCell::new(HashMap::new());
}

/// Registers one dispatch alternative for `name` on `target`. If the method
/// already exists (from an earlier registration), the alternative is
/// appended; user-defined registrations should run after primitives are
/// installed so that user-defined methods take precedence, by inserting
/// them at the front of the alternative list.
pub fn register(target: TypeId, name: &str, alternative: Alternative, user_defined: bool) {
    METHOD_TABLES.with(|table| {
        let mut guard = table.borrow_mut();
        let per_type = guard.entry(target).or_default();
        let entry = per_type.entry(name.to_string()).or_insert_with(|| MethodValue {
            name: name.to_string(),
            target,
            alternatives: Vec::new(),
        });
        if user_defined {
            entry.alternatives.insert(0, alternative);
        } else {
            entry.alternatives.push(alternative);
        }
    });
}

pub fn lookup(target: TypeId, name: &str) -> Option<MethodValue> {
    METHOD_TABLES.with(|table| table.borrow().get(&target).and_then(|t| t.get(name)).cloned())
}

pub fn has_method(target: TypeId, name: &str) -> bool {
    METHOD_TABLES.with(|table| table.borrow().get(&target).map(|t| t.contains_key(name)).unwrap_or(false))
}

#[cfg(test)]
pub fn clear_for_tests() {
    METHOD_TABLES.with(|table| table.borrow_mut().clear());
}
