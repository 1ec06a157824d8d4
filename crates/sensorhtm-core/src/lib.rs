//! Core types for SensorHTM.
//!
//! Bridges stored sensor readings and an external HTM model runtime:
//! sensor-model descriptors, timestamp normalization, the point processor
//! and the ports to the model, shifter, likelihood estimator and storage.

pub mod client;
pub mod config;
pub mod definition;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod params;
pub mod point;
pub mod processor;
pub mod replay;
pub mod timestamp;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{DynSensorModelClient, SensorModelClient};
pub use definition::{ModelDefinition, SensorKey};
pub use descriptor::{measurement_of, SensorModel};
pub use error::{Error, Result};
pub use model::{
    AnomalyLikelihood, InferenceShifter, ModelInput, ModelResult, PassthroughShifter,
    PredictiveModel,
};
pub use params::ModelParams;
pub use point::{OutputRecord, Point, StoredResult};
pub use processor::{HtmProcessor, ProcessorStats};
pub use replay::{replay, ReplaySummary};
pub use timestamp::normalize_timestamp;

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::client::{DynSensorModelClient, SensorModelClient};
    pub use crate::definition::{ModelDefinition, SensorKey};
    pub use crate::descriptor::SensorModel;
    pub use crate::error::{Error, Result};
    pub use crate::model::{
        AnomalyLikelihood, InferenceShifter, PassthroughShifter, PredictiveModel,
    };
    pub use crate::point::{OutputRecord, Point, StoredResult};
    pub use crate::processor::HtmProcessor;
    pub use crate::replay::replay;
}
