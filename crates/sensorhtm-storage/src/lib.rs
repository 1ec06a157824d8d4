//! SensorHTM storage crate.
//!
//! Model registries and result stores behind the `SensorModelClient`
//! capability of `sensorhtm-core`.
//!
//! ## Features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `redb` | ✅ | Persistent store using redb |
//!
//! The in-memory store is always available.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sensorhtm_core::prelude::*;
//! use sensorhtm_storage::ModelStore;
//!
//! # fn main() -> Result<()> {
//! let client: DynSensorModelClient = Arc::new(ModelStore::open("./data/sensorhtm.redb")?);
//! let fridge = SensorKey::new("power", "Mini Fridge");
//!
//! client.delete_models(&fridge)?;
//! let definition = client.create_model(&fridge, "local_mini_fridge")?;
//! let model = SensorModel::new(definition, client.clone())?;
//! println!("{}", model); // Mini Fridge power HTM Model
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod error;

pub use backends::MemoryModelStore;
#[cfg(feature = "redb")]
pub use backends::{ModelStore, ModelStoreConfig};
pub use error::{Error, Result};
