//! Model store implementations.
//!
//! Every store implements [`SensorModelClient`](sensorhtm_core::SensorModelClient),
//! so descriptors can be backed by either one.

// Redb store (feature-gated)
#[cfg(feature = "redb")]
pub mod redb;

pub mod memory;

#[cfg(feature = "redb")]
pub use self::redb::{ModelStore, ModelStoreConfig};

pub use memory::MemoryModelStore;
