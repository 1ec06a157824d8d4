//! Redb model store.
//!
//! Persists model definitions, a per-sensor index and the output rows each
//! model produced, in one redb file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use sensorhtm_core::{
    ModelDefinition, Result as CoreResult, SensorKey, SensorModelClient, StoredResult,
};

use crate::error::{Error, Result};

// Models table: key = model name, value = ModelDefinition (JSON)
const MODELS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("htm_models");

// Sensor index table: key = (measurement, component), value = model names (JSON array)
const SENSOR_INDEX_TABLE: TableDefinition<(&str, &str), &str> =
    TableDefinition::new("htm_sensor_index");

// Results table: key = (model name, unix seconds, sequence within the second),
// value = StoredResult (JSON)
const RESULTS_TABLE: TableDefinition<(&str, i64, u32), &str> =
    TableDefinition::new("htm_results");

/// Configuration for [`ModelStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStoreConfig {
    /// Path to the database file.
    pub path: String,

    /// Create parent directories if they don't exist.
    #[serde(default = "default_create_dirs")]
    pub create_dirs: bool,
}

fn default_create_dirs() -> bool {
    true
}

impl ModelStoreConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            create_dirs: true,
        }
    }

    /// Set whether to create parent directories.
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }
}

/// Redb-backed sensor model registry and result store.
pub struct ModelStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl ModelStore {
    /// Open or create a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(ModelStoreConfig::new(path.as_ref().to_string_lossy()))
    }

    /// Open or create a store with the given configuration.
    pub fn new(config: ModelStoreConfig) -> Result<Self> {
        let path = PathBuf::from(&config.path);
        if config.create_dirs {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let db = if path.exists() {
            Database::open(&path)?
        } else {
            Database::create(&path)?
        };

        // Make sure every table exists so read transactions never miss one
        let write_txn = db.begin_write()?;
        {
            let _models = write_txn.open_table(MODELS_TABLE)?;
            let _index = write_txn.open_table(SENSOR_INDEX_TABLE)?;
            let _results = write_txn.open_table(RESULTS_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(path = %path.display(), "Opened model store");
        Ok(Self {
            db: Arc::new(db),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ========== Model Registry ==========

    /// Load one model definition by name.
    pub fn load_model(&self, name: &str) -> Result<Option<ModelDefinition>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MODELS_TABLE)?;
        match table.get(name)? {
            Some(value) => Ok(Some(serde_json::from_str(value.value())?)),
            None => Ok(None),
        }
    }

    /// All registered model definitions, across sensors.
    pub fn list_all_models(&self) -> Result<Vec<ModelDefinition>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MODELS_TABLE)?;

        let mut models = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            match serde_json::from_str::<ModelDefinition>(value.value()) {
                Ok(definition) => models.push(definition),
                Err(e) => tracing::warn!(model = key.value(), "Skipping undecodable model: {}", e),
            }
        }
        Ok(models)
    }

    fn models_for(&self, sensor: &SensorKey) -> Result<Vec<ModelDefinition>> {
        let read_txn = self.db.begin_read()?;

        let names: Vec<String> = {
            let index = read_txn.open_table(SENSOR_INDEX_TABLE)?;
            match index.get((sensor.measurement.as_str(), sensor.component.as_str()))? {
                Some(value) => serde_json::from_str(value.value())?,
                None => return Ok(Vec::new()),
            }
        };

        let table = read_txn.open_table(MODELS_TABLE)?;
        let mut models = Vec::with_capacity(names.len());
        for name in names {
            if let Some(value) = table.get(name.as_str())? {
                models.push(serde_json::from_str(value.value())?);
            }
        }
        Ok(models)
    }

    fn insert_model(&self, sensor: &SensorKey, suffix: &str) -> Result<ModelDefinition> {
        let definition =
            ModelDefinition::new(&sensor.measurement, suffix, sensor.component.clone());
        let index_key = (sensor.measurement.as_str(), sensor.component.as_str());

        let write_txn = self.db.begin_write()?;
        {
            let mut models = write_txn.open_table(MODELS_TABLE)?;
            if models.get(definition.name.as_str())?.is_some() {
                return Err(Error::AlreadyExists(definition.name));
            }
            let json = serde_json::to_string(&definition)?;
            models.insert(definition.name.as_str(), json.as_str())?;

            let mut index = write_txn.open_table(SENSOR_INDEX_TABLE)?;
            let mut names: Vec<String> = match index.get(index_key)? {
                Some(value) => serde_json::from_str(value.value())?,
                None => Vec::new(),
            };
            if !names.contains(&definition.name) {
                names.push(definition.name.clone());
            }
            let names_json = serde_json::to_string(&names)?;
            index.insert(index_key, names_json.as_str())?;
        }
        write_txn.commit()?;

        tracing::info!(model = %definition.name, sensor = %sensor, "Created HTM model");
        Ok(definition)
    }

    fn remove_models(&self, sensor: &SensorKey) -> Result<usize> {
        let index_key = (sensor.measurement.as_str(), sensor.component.as_str());

        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut index = write_txn.open_table(SENSOR_INDEX_TABLE)?;
            let names: Vec<String> = match index.remove(index_key)? {
                Some(value) => serde_json::from_str(value.value())?,
                None => Vec::new(),
            };

            let mut models = write_txn.open_table(MODELS_TABLE)?;
            let mut results = write_txn.open_table(RESULTS_TABLE)?;
            let mut removed = 0;
            for name in &names {
                if models.remove(name.as_str())?.is_some() {
                    removed += 1;
                }
                let stale = result_keys(&results, name)?;
                for (ts, seq) in stale {
                    results.remove((name.as_str(), ts, seq))?;
                }
            }
            removed
        };
        write_txn.commit()?;

        tracing::info!(sensor = %sensor, removed, "Deleted HTM models");
        Ok(removed)
    }

    // ========== Results ==========

    fn insert_result(&self, model: &str, result: &StoredResult) -> Result<()> {
        let ts = result.timestamp.and_utc().timestamp();

        let write_txn = self.db.begin_write()?;
        {
            let models = write_txn.open_table(MODELS_TABLE)?;
            if models.get(model)?.is_none() {
                return Err(Error::NotFound(model.to_string()));
            }

            let mut results = write_txn.open_table(RESULTS_TABLE)?;
            // Rows within the same second keep their write order
            let seq = {
                let last = results
                    .range((model, ts, 0u32)..=(model, ts, u32::MAX))?
                    .next_back();
                match last {
                    Some(item) => item?.0.value().2 + 1,
                    None => 0,
                }
            };
            let json = serde_json::to_string(result)?;
            results.insert((model, ts, seq), json.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn load_results(&self, model: &str) -> Result<Vec<StoredResult>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESULTS_TABLE)?;

        let mut rows = Vec::new();
        for item in table.range((model, i64::MIN, 0u32)..=(model, i64::MAX, u32::MAX))? {
            let (key, value) = item?;
            match serde_json::from_str::<StoredResult>(value.value()) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    let (name, ts, _) = key.value();
                    tracing::warn!(model = name, ts, "Skipping undecodable result: {}", e);
                }
            }
        }
        Ok(rows)
    }

    /// Number of stored results for a model.
    pub fn result_count(&self, model: &str) -> Result<usize> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESULTS_TABLE)?;
        Ok(result_keys(&table, model)?.len())
    }
}

/// `(timestamp, sequence)` keys of every stored result of `model`.
fn result_keys<T>(table: &T, model: &str) -> Result<Vec<(i64, u32)>>
where
    T: ReadableTable<(&'static str, i64, u32), &'static str>,
{
    let mut keys = Vec::new();
    for item in table.range((model, i64::MIN, 0u32)..=(model, i64::MAX, u32::MAX))? {
        let (key, _) = item?;
        let (_, ts, seq) = key.value();
        keys.push((ts, seq));
    }
    Ok(keys)
}

impl SensorModelClient for ModelStore {
    fn list_models(&self, sensor: &SensorKey) -> CoreResult<Vec<ModelDefinition>> {
        Ok(self.models_for(sensor)?)
    }

    fn create_model(&self, sensor: &SensorKey, suffix: &str) -> CoreResult<ModelDefinition> {
        Ok(self.insert_model(sensor, suffix)?)
    }

    fn delete_models(&self, sensor: &SensorKey) -> CoreResult<usize> {
        Ok(self.remove_models(sensor)?)
    }

    fn write_result(&self, model: &str, result: &StoredResult) -> CoreResult<()> {
        Ok(self.insert_result(model, result)?)
    }

    fn read_results(&self, model: &str) -> CoreResult<Vec<StoredResult>> {
        Ok(self.load_results(model)?)
    }
}
