//! Data mapping consumed by [`Template::apply`](crate::Template::apply)
//!
//! Keys are token names without the prefix. A value is either plain text or a
//! sequence of records used to expand `@for:<key>{...}` blocks.
//!
//! # Example
//!
//! ```ignore
//! use keyplate::{DataMap, Record};
//!
//! let mut data = DataMap::new();
//! data.with_text("title", "Fruit")
//!     .with_sequence("rows", vec![Record::from([("k", "apple")]), Record::from([("k", "pear")])]);
//! ```

use crate::error::{TemplateError, TemplateResult};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// One element of a sequence value: field name to text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub HashMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Record(HashMap::new())
    }

    pub fn with_field(&mut self, name: &str, value: &str) -> &mut Self {
        self.0.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn from_json(value: &JsonValue) -> Self {
        match value.as_object() {
            Some(obj) => Record(
                obj.iter()
                    .map(|(name, field)| (name.clone(), coerce_to_text(field)))
                    .collect(),
            ),
            None => Record::new(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Record {
    fn from(fields: [(K, V); N]) -> Self {
        Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A value in the data mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Scalar value, already coerced to text
    Text(String),
    /// Records for loop expansion; never substituted as a plain token
    Sequence(Vec<Record>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Record]> {
        match self {
            Value::Sequence(records) => Some(records),
            Value::Text(_) => None,
        }
    }

    /// Convert a JSON value, coercing scalars to their text form
    ///
    /// Strings are taken as-is, numbers/booleans/null use their JSON spelling
    /// and objects are kept as compact JSON text. Arrays become sequences in
    /// which non-object elements are empty records.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Array(items) => {
                Value::Sequence(items.iter().map(Record::from_json).collect())
            }
            other => Value::Text(coerce_to_text(other)),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<Record>> for Value {
    fn from(records: Vec<Record>) -> Self {
        Value::Sequence(records)
    }
}

fn coerce_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Key to value mapping supplied to a substitution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataMap(pub HashMap<String, Value>);

impl DataMap {
    pub fn new() -> Self {
        DataMap(HashMap::new())
    }

    pub fn with_value(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.to_owned(), value.into());
        self
    }

    pub fn with_text(&mut self, key: &str, text: &str) -> &mut Self {
        self.with_value(key, text)
    }

    pub fn with_sequence(&mut self, key: &str, records: Vec<Record>) -> &mut Self {
        self.with_value(key, records)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Text for a plain token; sequence-valued keys yield `None`
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_text)
    }

    /// Records for a loop block; text-valued keys yield `None`
    pub fn get_sequence(&self, key: &str) -> Option<&[Record]> {
        self.0.get(key).and_then(Value::as_sequence)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a data mapping from a JSON document
    ///
    /// # Errors
    /// - `DataError` if the root is not a JSON object
    pub fn from_json(json: &JsonValue) -> TemplateResult<Self> {
        let obj = json.as_object().ok_or_else(|| {
            TemplateError::DataError("root of data document must be an object".to_string())
        })?;

        Ok(DataMap(
            obj.iter()
                .map(|(key, value)| (key.clone(), Value::from_json(value)))
                .collect(),
        ))
    }

    /// Parse a JSON string into a data mapping
    pub fn from_json_str(content: &str) -> TemplateResult<Self> {
        let json: JsonValue = serde_json::from_str(content)
            .map_err(|e| TemplateError::DataError(format!("Failed to parse JSON: {}", e)))?;
        Self::from_json(&json)
    }
}

impl TryFrom<JsonValue> for DataMap {
    type Error = TemplateError;

    fn try_from(json: JsonValue) -> TemplateResult<Self> {
        DataMap::from_json(&json)
    }
}
