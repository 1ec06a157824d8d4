//! Sensor-model descriptor.
//!
//! An immutable view over one model definition: which measurement and
//! component the model watches, and how it is labelled for display.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::client::DynSensorModelClient;
use crate::config::defaults::MODEL_LABEL;
use crate::definition::{ModelDefinition, SensorKey};
use crate::error::{Error, Result};
use crate::point::{OutputRecord, StoredResult};

/// Measurement part of a model name: everything before the first `_`.
pub fn measurement_of(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

/// A sensor model as listed by the registry.
#[derive(Clone)]
pub struct SensorModel {
    definition: ModelDefinition,
    component: String,
    client: DynSensorModelClient,
}

impl SensorModel {
    /// Build a descriptor from a validated definition.
    pub fn new(definition: ModelDefinition, client: DynSensorModelClient) -> Result<Self> {
        definition.validate()?;
        let component = definition
            .component()
            .ok_or_else(|| Error::missing_field("tags.component"))?
            .to_string();
        Ok(Self {
            definition,
            component,
            client,
        })
    }

    /// Build a descriptor from a raw configuration mapping.
    pub fn from_value(def: &Value, client: DynSensorModelClient) -> Result<Self> {
        Self::new(ModelDefinition::from_value(def)?, client)
    }

    /// Descriptors for every model the registry holds for `sensor`.
    pub fn load_all(client: &DynSensorModelClient, sensor: &SensorKey) -> Result<Vec<Self>> {
        client
            .list_models(sensor)?
            .into_iter()
            .map(|definition| Self::new(definition, client.clone()))
            .collect()
    }

    /// The tags as stored.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.definition.tags
    }

    pub fn measurement(&self) -> &str {
        measurement_of(&self.definition.name)
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Display name, e.g. `Mini Fridge power HTM Model`.
    pub fn name(&self) -> String {
        format!("{} {} {}", self.component(), self.measurement(), MODEL_LABEL)
    }

    /// Name the model is stored under.
    pub fn key(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &ModelDefinition {
        &self.definition
    }

    pub fn sensor(&self) -> SensorKey {
        SensorKey::new(self.measurement(), self.component())
    }

    pub fn client(&self) -> &DynSensorModelClient {
        &self.client
    }

    /// Persist one output record in this model's storage space.
    pub fn write_result(
        &self,
        timestamp: NaiveDateTime,
        value: Option<f64>,
        record: &OutputRecord,
    ) -> Result<()> {
        let stored = StoredResult::new(timestamp, value, record.clone());
        self.client.write_result(self.key(), &stored)
    }

    /// Everything written to this model so far, oldest first.
    pub fn results(&self) -> Result<Vec<StoredResult>> {
        self.client.read_results(self.key())
    }
}

impl fmt::Display for SensorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl fmt::Debug for SensorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorModel")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}
