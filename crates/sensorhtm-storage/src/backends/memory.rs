//! In-memory model store.
//!
//! Same behaviour as the redb store without persistence. Useful for tests
//! and dry runs.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use sensorhtm_core::{
    measurement_of, ModelDefinition, Result as CoreResult, SensorKey, SensorModelClient,
    StoredResult,
};

use crate::error::Error;

#[derive(Default)]
struct Inner {
    models: BTreeMap<String, ModelDefinition>,
    // model -> unix seconds -> rows in write order
    results: BTreeMap<String, BTreeMap<i64, Vec<StoredResult>>>,
}

/// Non-persistent sensor model registry and result store.
#[derive(Default)]
pub struct MemoryModelStore {
    inner: RwLock<Inner>,
}

impl MemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.inner.read().models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().models.is_empty()
    }
}

fn belongs_to(definition: &ModelDefinition, sensor: &SensorKey) -> bool {
    measurement_of(&definition.name) == sensor.measurement
        && definition.component() == Some(sensor.component.as_str())
}

impl SensorModelClient for MemoryModelStore {
    fn list_models(&self, sensor: &SensorKey) -> CoreResult<Vec<ModelDefinition>> {
        let inner = self.inner.read();
        Ok(inner
            .models
            .values()
            .filter(|d| belongs_to(d, sensor))
            .cloned()
            .collect())
    }

    fn create_model(&self, sensor: &SensorKey, suffix: &str) -> CoreResult<ModelDefinition> {
        let definition =
            ModelDefinition::new(&sensor.measurement, suffix, sensor.component.clone());
        let mut inner = self.inner.write();
        if inner.models.contains_key(&definition.name) {
            return Err(Error::AlreadyExists(definition.name).into());
        }
        inner
            .models
            .insert(definition.name.clone(), definition.clone());
        tracing::info!(model = %definition.name, sensor = %sensor, "Created HTM model");
        Ok(definition)
    }

    fn delete_models(&self, sensor: &SensorKey) -> CoreResult<usize> {
        let mut inner = self.inner.write();
        let names: Vec<String> = inner
            .models
            .values()
            .filter(|d| belongs_to(d, sensor))
            .map(|d| d.name.clone())
            .collect();
        for name in &names {
            inner.models.remove(name);
            inner.results.remove(name);
        }
        tracing::info!(sensor = %sensor, removed = names.len(), "Deleted HTM models");
        Ok(names.len())
    }

    fn write_result(&self, model: &str, result: &StoredResult) -> CoreResult<()> {
        let mut inner = self.inner.write();
        if !inner.models.contains_key(model) {
            return Err(Error::NotFound(model.to_string()).into());
        }
        inner
            .results
            .entry(model.to_string())
            .or_default()
            .entry(result.timestamp.and_utc().timestamp())
            .or_default()
            .push(result.clone());
        Ok(())
    }

    fn read_results(&self, model: &str) -> CoreResult<Vec<StoredResult>> {
        let inner = self.inner.read();
        Ok(inner
            .results
            .get(model)
            .map(|rows| rows.values().flatten().cloned().collect())
            .unwrap_or_default())
    }
}
