//! Global registry of data-record field names, keyed by type name. Field
//! order is the declaration order, since `.twist` dumps must follow source
//! order.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

static FIELDS: Lazy<Mutex<HashMap<String, Vec<String>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

pub fn register(type_name: &str, fields: Vec<String>) {
    FIELDS.lock().unwrap().insert(type_name.to_string(), fields);
}

pub fn get(type_name: &str) -> Option<Vec<String>> {
    FIELDS.lock().unwrap().get(type_name).cloned()
}

#[cfg(test)]
pub fn clear_for_tests() {
    FIELDS.lock().unwrap().clear();
}
