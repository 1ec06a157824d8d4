//! Sensor model configuration records.
//!
//! A model definition is what the registry stores for each model:
//! `{"name": "<measurement>_<suffix>", "tags": {"component": "...", ...}}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::defaults::COMPONENT_TAG;
use crate::error::{Error, Result};

/// Identifies a sensor by the measurement it reports and the component it sits on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SensorKey {
    pub measurement: String,
    pub component: String,
}

impl SensorKey {
    pub fn new(measurement: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            component: component.into(),
        }
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.measurement, self.component)
    }
}

/// A stored sensor model configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    pub tags: BTreeMap<String, String>,
}

impl ModelDefinition {
    /// Build the definition for a new model of `measurement` on `component`.
    ///
    /// The name follows the `<measurement>_<suffix>` convention so the
    /// measurement can be recovered from it.
    pub fn new(
        measurement: impl AsRef<str>,
        suffix: impl AsRef<str>,
        component: impl Into<String>,
    ) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert(COMPONENT_TAG.to_string(), component.into());
        Self {
            name: format!("{}_{}", measurement.as_ref(), suffix.as_ref()),
            tags,
        }
    }

    /// Validate a raw configuration mapping.
    pub fn from_value(def: &Value) -> Result<Self> {
        let obj = def
            .as_object()
            .ok_or_else(|| Error::invalid_field("modelDef", "expected an object"))?;

        let name = match obj.get("name") {
            None => return Err(Error::missing_field("name")),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(Error::invalid_field(
                    "name",
                    format!("expected a string, found {}", other),
                ))
            }
        };

        let raw_tags = match obj.get("tags") {
            None => return Err(Error::missing_field("tags")),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(Error::invalid_field(
                    "tags",
                    format!("expected an object, found {}", other),
                ))
            }
        };

        let mut tags = BTreeMap::new();
        for (key, value) in raw_tags {
            let value = value.as_str().ok_or_else(|| {
                Error::invalid_field(format!("tags.{}", key), "expected a string")
            })?;
            tags.insert(key.clone(), value.to_string());
        }

        let definition = Self { name, tags };
        definition.validate()?;
        Ok(definition)
    }

    /// Check the invariants every stored definition must hold.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_field("name", "must not be empty"));
        }
        if !self.tags.contains_key(COMPONENT_TAG) {
            return Err(Error::missing_field(format!("tags.{}", COMPONENT_TAG)));
        }
        Ok(())
    }

    /// The component tag, if present.
    pub fn component(&self) -> Option<&str> {
        self.tags.get(COMPONENT_TAG).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_valid() {
        let def = ModelDefinition::from_value(&json!({
            "name": "power_fridge",
            "tags": {"component": "Mini Fridge", "room": "garage"}
        }))
        .unwrap();
        assert_eq!(def.name, "power_fridge");
        assert_eq!(def.component(), Some("Mini Fridge"));
        assert_eq!(def.tags.len(), 2);
    }

    #[test]
    fn test_from_value_missing_name() {
        let err = ModelDefinition::from_value(&json!({"tags": {"component": "x"}})).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field } if field == "name"));
    }

    #[test]
    fn test_from_value_missing_tags() {
        let err = ModelDefinition::from_value(&json!({"name": "power_x"})).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field } if field == "tags"));
    }

    #[test]
    fn test_from_value_missing_component() {
        let err = ModelDefinition::from_value(&json!({
            "name": "power_x",
            "tags": {"room": "garage"}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field } if field == "tags.component"));
    }

    #[test]
    fn test_from_value_rejects_wrong_types() {
        assert!(ModelDefinition::from_value(&json!([])).is_err());
        assert!(ModelDefinition::from_value(&json!({"name": 3, "tags": {}})).is_err());
        let err = ModelDefinition::from_value(&json!({
            "name": "power_x",
            "tags": {"component": 7}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "tags.component"));
    }

    #[test]
    fn test_from_value_rejects_empty_name() {
        let err = ModelDefinition::from_value(&json!({
            "name": "",
            "tags": {"component": "Kitchen"}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidField { .. }));
    }

    #[test]
    fn test_new_follows_naming_convention() {
        let def = ModelDefinition::new("power", "local_mini_fridge", "Mini Fridge");
        assert_eq!(def.name, "power_local_mini_fridge");
        assert_eq!(def.component(), Some("Mini Fridge"));
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_sensor_key_display() {
        assert_eq!(SensorKey::new("temp", "Kitchen").to_string(), "temp/Kitchen");
    }
}
