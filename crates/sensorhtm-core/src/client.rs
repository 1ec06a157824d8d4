//! Sensor model storage capability.
//!
//! A descriptor holds a handle that can resolve and mutate the storage
//! behind its sensor. Implementations live in `sensorhtm-storage`; tests
//! can provide their own.

use std::sync::Arc;

use crate::definition::{ModelDefinition, SensorKey};
use crate::error::Result;
use crate::point::StoredResult;

/// Access to the model registry and per-model result storage.
pub trait SensorModelClient: Send + Sync {
    /// All model definitions registered for a sensor.
    fn list_models(&self, sensor: &SensorKey) -> Result<Vec<ModelDefinition>>;

    /// Create an empty storage space named `<measurement>_<suffix>`.
    ///
    /// Fails with `AlreadyExists` if a model of that name is registered.
    fn create_model(&self, sensor: &SensorKey, suffix: &str) -> Result<ModelDefinition>;

    /// Remove every model of a sensor together with its results.
    ///
    /// Returns the number of models removed.
    fn delete_models(&self, sensor: &SensorKey) -> Result<usize>;

    /// Append one output row to a model's storage space.
    fn write_result(&self, model: &str, result: &StoredResult) -> Result<()>;

    /// All output rows of a model, oldest first.
    fn read_results(&self, model: &str) -> Result<Vec<StoredResult>>;
}

/// Shared client handle.
pub type DynSensorModelClient = Arc<dyn SensorModelClient>;
