//! Extension trait for typed access to engine response fields
//!
//! Field names are passed as anything implementing `AsRef<str>`, so both wire constants and
//! [`ParamKey`](crate::params::ParamKey) variants work.

use serde_json::{Map, Value};

/// Extension trait for type-safe JSON field access
pub trait JsonObjectAccess {
    /// Get field value using any type that can be a string reference
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value>;

    /// Get field value as string
    fn get_field_str<T: AsRef<str>>(&self, field: T) -> Option<&str> {
        self.get_field(field).and_then(Value::as_str)
    }

    /// Get field value as a number, accepting integers and floats alike
    fn get_field_f64<T: AsRef<str>>(&self, field: T) -> Option<f64> {
        self.get_field(field).and_then(Value::as_f64)
    }

    /// Insert field with value using any type that converts to String and any value that can
    /// become JSON
    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>;
}

impl JsonObjectAccess for Value {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Self> {
        self.get(field.as_ref())
    }

    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Self>,
    {
        if let Some(obj) = self.as_object_mut() {
            obj.insert(field.into(), value.into());
        }
    }
}

impl JsonObjectAccess for Map<String, Value> {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value> {
        self.get(field.as_ref())
    }

    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>,
    {
        self.insert(field.into(), value.into());
    }
}
