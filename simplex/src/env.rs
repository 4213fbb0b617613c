//! Lexically-scoped environment: a parent-linked chain of
//! scopes. Function/method values capture an [`Environment`] handle, not a
//! snapshot, so later assignments in an enclosing scope are observed by the
//! closure.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::types::TypeId;
use crate::value::Value;

struct ScopeData {
    parent: Option<Environment>,
    bindings: HashMap<String, Value>,
    declared_types: HashMap<String, TypeId>,
    local_types: Vec<TypeId>,
    import_scopes: HashMap<String, Environment>,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<ScopeData>>);

impl Environment {
    pub fn root() -> Self {
        Environment(Rc::new(RefCell::new(ScopeData {
            parent: None,
            bindings: HashMap::new(),
            declared_types: HashMap::new(),
            local_types: Vec::new(),
            import_scopes: HashMap::new(),
        })))
    }

    /// Pushes a new scope sharing this environment as its parent. Dropping
    /// the returned `Environment` pops it (nothing else references it).
    pub fn child(&self) -> Self {
        Environment(Rc::new(RefCell::new(ScopeData {
            parent: Some(self.clone()),
            bindings: HashMap::new(),
            declared_types: HashMap::new(),
            local_types: Vec::new(),
            import_scopes: HashMap::new(),
        })))
    }

    pub fn define(&self, name: impl Into<String>, value: Value, ty: Option<TypeId>) {
        let name = name.into();
        let mut scope = self.0.borrow_mut();
        if let Some(ty) = ty {
            scope.declared_types.insert(name.clone(), ty);
        }
        scope.bindings.insert(name, value);
    }

    pub fn declare_type(&self, name: impl Into<String>, ty: TypeId) {
        self.0.borrow_mut().declared_types.insert(name.into(), ty);
    }

    pub fn register_local_type(&self, ty: TypeId) {
        self.0.borrow_mut().local_types.push(ty);
    }

    pub fn register_import(&self, scope_name: impl Into<String>, env: Environment) {
        self.0.borrow_mut().import_scopes.insert(scope_name.into(), env);
    }

    pub fn import_scope(&self, scope_name: &str) -> Option<Environment> {
        if let Some(env) = self.0.borrow().import_scopes.get(scope_name) {
            return Some(env.clone());
        }
        self.0.borrow().parent.as_ref().and_then(|p| p.import_scope(scope_name))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.0.borrow().bindings.get(name) {
            return Some(v.clone());
        }
        self.0.borrow().parent.clone().and_then(|p| p.get(name))
    }

    pub fn get_declared_type(&self, name: &str) -> Option<TypeId> {
        if let Some(t) = self.0.borrow().declared_types.get(name) {
            return Some(*t);
        }
        self.0.borrow().parent.clone().and_then(|p| p.get_declared_type(name))
    }

    pub fn has_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Mutates the nearest enclosing binding with this name (`:=`
    /// assignment semantics). Returns `false` if no such binding exists
    /// anywhere in the chain.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        if self.0.borrow().bindings.contains_key(name) {
            self.0.borrow_mut().bindings.insert(name.to_string(), value);
            return true;
        }
        let parent = self.0.borrow().parent.clone();
        match parent {
            Some(p) => p.assign(name, value),
            None => false,
        }
    }

    pub fn is_same(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment(..)")
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_scope_sees_parent_bindings() {
        let root = Environment::root();
        root.define("x", Value::Int(1), None);
        let child = root.child();
        assert_eq!(child.get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn shadowing_in_child_does_not_affect_parent() {
        let root = Environment::root();
        root.define("x", Value::Int(1), None);
        let child = root.child();
        child.define("x", Value::Int(2), None);
        assert_eq!(child.get("x"), Some(Value::Int(2)));
        assert_eq!(root.get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn assign_mutates_nearest_enclosing_binding() {
        let root = Environment::root();
        root.define("x", Value::Int(1), None);
        let child = root.child();
        assert!(child.assign("x", Value::Int(9)));
        assert_eq!(root.get("x"), Some(Value::Int(9)));
    }

    #[test]
    fn closures_observe_later_assignment() {
        let root = Environment::root();
        root.define("x", Value::Int(1), None);
        let captured = root.clone();
        root.assign("x", Value::Int(42));
        assert_eq!(captured.get("x"), Some(Value::Int(42)));
    }
}
