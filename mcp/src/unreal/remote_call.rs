use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{EDITOR_ACTOR_SUBSYSTEM, FIELD_RETURN_VALUE, FN_GET_ALL_LEVEL_ACTORS};
use crate::json_object::JsonObjectAccess;

/// Body of a `PUT /remote/object/call` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCall {
    pub object_path:          String,
    pub function_name:        String,
    pub parameters:           Map<String, Value>,
    pub generate_transaction: bool,
}

impl RemoteCall {
    /// A call that records an undo transaction, like every editor edit should
    pub fn new(object_path: &str, function_name: &str, parameters: Value) -> Self {
        let parameters = match parameters {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            object_path: object_path.to_string(),
            function_name: function_name.to_string(),
            parameters,
            generate_transaction: true,
        }
    }

    /// The liveness probe; read-only so it skips the transaction
    pub fn probe() -> Self {
        Self {
            generate_transaction: false,
            ..Self::new(EDITOR_ACTOR_SUBSYSTEM, FN_GET_ALL_LEVEL_ACTORS, Value::Null)
        }
    }

    #[cfg(test)]
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }
}

/// Decoded response mapping of a remote call
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse(Value);

impl RemoteResponse {
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The function's return value, if it produced a non-null one
    pub fn return_value(&self) -> Option<&Value> {
        self.0
            .get_field(FIELD_RETURN_VALUE)
            .filter(|value| !value.is_null())
    }

    /// Return value as a non-empty string (object references, labels, class paths)
    pub fn return_str(&self) -> Option<&str> {
        self.0
            .get_field_str(FIELD_RETURN_VALUE)
            .filter(|s| !s.is_empty())
    }

    /// Return value as a list of strings; non-string entries are skipped
    pub fn return_strings(&self) -> Vec<String> {
        self.return_value()
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// An out-parameter or other sibling field of `ReturnValue`
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get_field(name)
    }
}
