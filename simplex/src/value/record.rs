//! `DataRecord`: a user-declared nominal tuple of named, typed fields
//! . Immutable except through field-update expressions, which
//! produce a new record (copy-on-write, ).

use std::rc::Rc;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    pub type_name: String,
    pub field_names: Vec<String>,
    pub fields: Vec<Value>,
}

impl DataRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.field_names
            .iter()
            .position(|f| f == field)
            .map(|i| &self.fields[i])
    }

    /// Returns a new record with `field` replaced by `value`, sharing the
    /// rest of the field vector structurally until actually mutated.
    pub fn with_field(self: &Rc<Self>, field: &str, value: Value) -> Option<Rc<DataRecord>> {
        let idx = self.field_names.iter().position(|f| f == field)?;
        let mut fields = self.fields.clone();
        fields[idx] = value;
        Some(Rc::new(DataRecord {
            type_name: self.type_name.clone(),
            field_names: self.field_names.clone(),
            fields,
        }))
    }
}
