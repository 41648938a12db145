//! Graph objects produced by the collection steps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Relationship class; the GoDaddy graph only uses ownership edges.
pub const RELATIONSHIP_CLASS_HAS: &str = "HAS";

/// A collected resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub entity_type: String,
    #[serde(rename = "_class")]
    pub class: String,
    /// Flat properties, serialized next to `_key`/`_type`/`_class`.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
    /// The API payload the entity was built from.
    #[serde(rename = "_rawData")]
    pub raw_data: Value,
}

impl Entity {
    pub fn new(
        key: impl Into<String>,
        entity_type: impl Into<String>,
        class: impl Into<String>,
        raw_data: Value,
    ) -> Self {
        Self {
            key: key.into(),
            entity_type: entity_type.into(),
            class: class.into(),
            properties: Map::new(),
            raw_data,
        }
    }

    /// Set a property. `None` and `null` values are not stored.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        if value.is_null() {
            self.properties.remove(name);
        } else {
            self.properties.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Copy the top-level scalar fields of `source` into the properties.
    ///
    /// Strings, numbers and booleans are copied as-is, arrays only when every
    /// element is a scalar. Nested objects are left to `_rawData`.
    #[must_use]
    pub fn with_scalars_of(mut self, source: &Value) -> Self {
        if let Value::Object(fields) = source {
            for (name, value) in fields {
                if is_flat(value) {
                    self.properties.insert(name.clone(), value.clone());
                }
            }
        }
        self
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn is_flat(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(is_scalar),
        other => is_scalar(other),
    }
}

/// A directed edge between two collected entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub relationship_type: String,
    #[serde(rename = "_class")]
    pub class: String,
    #[serde(rename = "_fromEntityKey")]
    pub from_key: String,
    #[serde(rename = "_toEntityKey")]
    pub to_key: String,
}

impl Relationship {
    /// `from HAS to`; the type is `{from_type}_has_{to_type minus the shared prefix}`.
    ///
    /// `godaddy_account` + `godaddy_domain` gives `godaddy_account_has_domain`.
    pub fn has(from: &Entity, to: &Entity) -> Self {
        let class = RELATIONSHIP_CLASS_HAS.to_lowercase();
        Self {
            key: format!("{}|{class}|{}", from.key, to.key),
            relationship_type: relationship_type(&from.entity_type, &class, &to.entity_type),
            class: RELATIONSHIP_CLASS_HAS.to_string(),
            from_key: from.key.clone(),
            to_key: to.key.clone(),
        }
    }
}

fn relationship_type(from_type: &str, verb: &str, to_type: &str) -> String {
    let from: Vec<&str> = from_type.split('_').collect();
    let to: Vec<&str> = to_type.split('_').collect();
    let shared = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let target = if shared == 0 || shared == to.len() {
        to_type.to_string()
    } else {
        to[shared..].join("_")
    };
    format!("{from_type}_{verb}_{target}")
}
