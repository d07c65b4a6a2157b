use error_stack::Report;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::keys::ParamKey;
use crate::error::{Error, Result};

/// Tool arguments as they arrive from the caller
///
/// Either a JSON object, or text holding a JSON object or `key=value` pairs separated by
/// whitespace (`actor_label=Crate location=0,0,100 visible=true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ParamInput {
    Structured(Map<String, Value>),
    Text(String),
}

impl Default for ParamInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for ParamInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Map<String, Value>> for ParamInput {
    fn from(map: Map<String, Value>) -> Self {
        Self::Structured(map)
    }
}

impl ParamInput {
    /// Work out which of the three accepted shapes this input has
    pub fn classify(self) -> ParamSource {
        match self {
            Self::Structured(map) => ParamSource::Structured(map),
            Self::Text(text) => match serde_json::from_str::<Map<String, Value>>(text.trim()) {
                Ok(map) => ParamSource::JsonText(map),
                Err(_) => ParamSource::FlatText(text),
            },
        }
    }

    /// Classify and resolve in one step
    pub fn resolve(self) -> Result<ParamMap> {
        self.classify().resolve()
    }
}

/// The three accepted parameter shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSource {
    /// Already a mapping, used unchanged
    Structured(Map<String, Value>),
    /// Text that decoded as a JSON object
    JsonText(Map<String, Value>),
    /// Whitespace separated `key=value` tokens
    FlatText(String),
}

impl ParamSource {
    /// Normalize into a [`ParamMap`]
    pub fn resolve(self) -> Result<ParamMap> {
        match self {
            Self::Structured(map) | Self::JsonText(map) => Ok(ParamMap(map)),
            Self::FlatText(text) => parse_flat(&text),
        }
    }
}

fn parse_flat(text: &str) -> Result<ParamMap> {
    let mut map = Map::new();
    for token in text.split_whitespace() {
        let Some((key, raw)) = token.split_once('=') else {
            debug!("Ignoring parameter token without '=': {token}");
            continue;
        };
        map.insert(key.to_string(), parse_flat_value(key, raw)?);
    }
    Ok(ParamMap(map))
}

fn parse_flat_value(key: &str, raw: &str) -> Result<Value> {
    if raw.contains(',') && ParamKey::is_vector_name(key) {
        return parse_float_list(key, raw).map(Value::from);
    }
    if raw.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if is_integer_literal(raw)
        && let Ok(int) = raw.parse::<i64>()
    {
        return Ok(Value::from(int));
    }
    if is_decimal_literal(raw)
        && let Ok(float) = raw.parse::<f64>()
    {
        return Ok(Value::from(float));
    }
    Ok(Value::String(raw.to_string()))
}

fn parse_float_list(key: &str, raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| {
                    Report::new(Error::ParameterParse(format!(
                        "invalid number '{part}' in '{key}={raw}'"
                    )))
                })
        })
        .collect()
}

/// Digits only; a sign keeps the value as text
fn is_integer_literal(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Digits with exactly one decimal point; no sign, no exponents, no `inf`/`nan`
fn is_decimal_literal(raw: &str) -> bool {
    raw.bytes().filter(|b| *b == b'.').count() == 1
        && raw.bytes().any(|b| b.is_ascii_digit())
        && raw.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

/// Normalized parameters for one tool call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap(Map<String, Value>);

impl ParamMap {
    pub fn get(&self, key: ParamKey) -> Option<&Value> {
        self.0.get(key.as_ref()).filter(|value| !value.is_null())
    }

    pub fn insert(&mut self, key: ParamKey, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Non-empty text value; numbers and booleans are rendered as text
    pub fn text(&self, key: ParamKey) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// First non-empty text value among `keys`
    pub fn first_text(&self, keys: &[ParamKey]) -> Option<String> {
        keys.iter().find_map(|key| self.text(*key))
    }

    /// Boolean value, accepting `true`/`false` text and 0/1 numbers
    pub fn bool(&self, key: ParamKey) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(Value::Number(n)) if n.as_u64() == Some(0) => Ok(Some(false)),
            Some(Value::Number(n)) if n.as_u64() == Some(1) => Ok(Some(true)),
            Some(other) => Err(Report::new(Error::invalid(
                key.as_ref(),
                format!("expected a boolean, got {other}"),
            ))),
        }
    }

    /// Non-negative integer value, accepting numeric text
    pub fn count(&self, key: ParamKey) -> Result<Option<usize>> {
        let parsed = match self.get(key) {
            None => return Ok(None),
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            Some(_) => None,
        };
        parsed
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                Report::new(Error::invalid(
                    key.as_ref(),
                    "expected a non-negative integer",
                ))
            })
    }

    /// Float list value
    ///
    /// Accepts a JSON array of numbers, comma separated text, or a single number. An empty
    /// list counts as absent.
    pub fn vector(&self, key: ParamKey) -> Result<Option<Vec<f64>>> {
        let values = match self.get(key) {
            None => return Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_f64().ok_or_else(|| {
                        Report::new(Error::ParameterParse(format!(
                            "'{key}' must contain only numbers, got {item}"
                        )))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => parse_float_list(key.as_ref(), s)?,
            Some(Value::Number(n)) => n.as_f64().into_iter().collect(),
            Some(other) => {
                return Err(Report::new(Error::ParameterParse(format!(
                    "'{key}' must be a list of numbers, got {other}"
                ))));
            },
        };
        Ok(Some(values).filter(|values| !values.is_empty()))
    }

    /// First present float list among `keys`
    pub fn first_vector(&self, keys: &[ParamKey]) -> Result<Option<Vec<f64>>> {
        for key in keys {
            if let Some(values) = self.vector(*key)? {
                return Ok(Some(values));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "test assertions")]

    use serde_json::json;

    use super::*;

    fn flat(text: &str) -> ParamMap {
        ParamInput::from(text).resolve().unwrap()
    }

    #[test]
    fn structured_input_is_returned_unchanged() {
        let map = json!({ "actor_label": "Crate", "location": [1, 2, 3], "nested": { "a": 1 } })
            .as_object()
            .cloned()
            .unwrap();
        let resolved = ParamInput::Structured(map.clone()).resolve().unwrap();
        assert_eq!(resolved.as_map(), &map);
    }

    #[test]
    fn json_text_is_decoded() {
        let input = ParamInput::from(r#"{"actor_label": "Crate", "visible": false}"#);
        assert!(matches!(input.clone().classify(), ParamSource::JsonText(_)));

        let params = input.resolve().unwrap();
        assert_eq!(params.text(ParamKey::ActorLabel).as_deref(), Some("Crate"));
        assert_eq!(params.bool(ParamKey::Visible).unwrap(), Some(false));
    }

    #[test]
    fn malformed_json_falls_through_to_flat_parsing() {
        let input = ParamInput::from("{actor_label=Crate");
        assert!(matches!(input.clone().classify(), ParamSource::FlatText(_)));
        assert_eq!(
            input.resolve().unwrap().as_map().get("{actor_label"),
            Some(&json!("Crate"))
        );
    }

    #[test]
    fn vector_keys_parse_comma_lists() {
        for key in ["location", "rotation", "scale", "color", "material_color"] {
            let params = flat(&format!("{key}=1,2,3"));
            assert_eq!(params.as_map().get(key), Some(&json!([1.0, 2.0, 3.0])), "{key}");
        }
    }

    #[test]
    fn commas_in_other_keys_stay_text() {
        let params = flat("actor_label=a,b");
        assert_eq!(params.as_map().get("actor_label"), Some(&json!("a,b")));
    }

    #[test]
    fn booleans_ignore_case() {
        let params = flat("visible=true hidden=FALSE other=True");
        assert_eq!(params.as_map().get("visible"), Some(&json!(true)));
        assert_eq!(params.as_map().get("hidden"), Some(&json!(false)));
        assert_eq!(params.as_map().get("other"), Some(&json!(true)));
    }

    #[test]
    fn scalars_are_typed_by_shape() {
        let params = flat("count=42 ratio=3.5 name=foo version=1.2.3 offset=-7 dip=-0.5 exp=1e5");
        let map = params.as_map();
        assert_eq!(map.get("count"), Some(&json!(42)));
        assert!(map.get("count").unwrap().is_i64());
        assert_eq!(map.get("ratio"), Some(&json!(3.5)));
        assert_eq!(map.get("name"), Some(&json!("foo")));
        assert_eq!(map.get("version"), Some(&json!("1.2.3")));
        assert_eq!(map.get("offset"), Some(&json!("-7")));
        assert_eq!(map.get("dip"), Some(&json!("-0.5")));
        assert_eq!(map.get("exp"), Some(&json!("1e5")));
    }

    #[test]
    fn tokens_without_equals_are_ignored() {
        let params = flat("hello actor_label=Crate world");
        assert_eq!(params.as_map().len(), 1);
    }

    #[test]
    fn value_splits_on_first_equals_only() {
        let params = flat("search_term=a=b");
        assert_eq!(params.as_map().get("search_term"), Some(&json!("a=b")));
    }

    #[test]
    fn malformed_vector_component_is_a_parse_error() {
        let error = ParamInput::from("location=1,abc,3").resolve().unwrap_err();
        assert!(matches!(error.current_context(), Error::ParameterParse(_)));
        assert!(ParamInput::from("scale=1,,3").resolve().is_err());
    }

    #[test]
    fn empty_text_resolves_to_empty_map() {
        assert_eq!(ParamInput::default().resolve().unwrap(), ParamMap::default());
    }

    #[test]
    fn vector_accessor_accepts_lists_text_and_scalars() {
        let params = ParamInput::Structured(
            json!({ "location": "1, 2, 3", "scale": [2, 2.5], "size": 4, "color": [] })
                .as_object()
                .cloned()
                .unwrap(),
        )
        .resolve()
        .unwrap();

        assert_eq!(params.vector(ParamKey::Location).unwrap(), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(params.vector(ParamKey::Scale).unwrap(), Some(vec![2.0, 2.5]));
        assert_eq!(params.vector(ParamKey::Size).unwrap(), Some(vec![4.0]));
        assert_eq!(params.vector(ParamKey::Color).unwrap(), None);
        assert_eq!(
            params
                .first_vector(&[ParamKey::Color, ParamKey::Scale])
                .unwrap(),
            Some(vec![2.0, 2.5])
        );
    }

    #[test]
    fn first_text_honors_alias_order() {
        let params = flat("name=Second label=Third");
        assert_eq!(
            params.first_text(&[ParamKey::ActorLabel, ParamKey::Name, ParamKey::Label]),
            Some("Second".to_string())
        );
    }

    #[test]
    fn count_rejects_negative_values() {
        let params = flat("max_results=-3");
        assert!(params.count(ParamKey::MaxResults).is_err());
        assert_eq!(flat("max_results=5").count(ParamKey::MaxResults).unwrap(), Some(5));
    }
}
