//! Model parameter files.
//!
//! A parameter file is a JSON document of the form `{"modelParams": {...}}`.
//! The inner object is handed to the model runtime untouched.

use std::path::Path;

use serde_json::{Map, Value};

use crate::config::defaults::PREDICTED_FIELD;
use crate::error::{Error, Result};

const MODEL_PARAMS_KEY: &str = "modelParams";

/// Parameters used to create a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    params: Map<String, Value>,
    predicted_field: String,
}

impl ModelParams {
    /// Read and validate a parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded model parameter file");
        Self::from_json(&contents)
    }

    /// Parse a parameter document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(contents)?;
        Self::from_value(doc)
    }

    pub fn from_value(doc: Value) -> Result<Self> {
        let Value::Object(mut root) = doc else {
            return Err(Error::invalid_field("parameter file", "expected an object"));
        };
        let params = match root.remove(MODEL_PARAMS_KEY) {
            None => return Err(Error::missing_field(MODEL_PARAMS_KEY)),
            Some(Value::Object(params)) => params,
            Some(other) => {
                return Err(Error::invalid_field(
                    MODEL_PARAMS_KEY,
                    format!("expected an object, found {}", other),
                ))
            }
        };
        Ok(Self {
            params,
            predicted_field: PREDICTED_FIELD.to_string(),
        })
    }

    /// Predict a different input field.
    pub fn with_predicted_field(mut self, field: impl Into<String>) -> Self {
        self.predicted_field = field.into();
        self
    }

    pub fn predicted_field(&self) -> &str {
        &self.predicted_field
    }

    /// The opaque runtime configuration.
    pub fn model_params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn into_model_params(self) -> Map<String, Value> {
        self.params
    }
}
