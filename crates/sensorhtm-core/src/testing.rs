//! Deterministic collaborators for tests.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for downstream crates' test suites.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::config::defaults::ANOMALY_SCORE_KEY;
use crate::error::{Error, Result};
use crate::model::{AnomalyLikelihood, ModelInput, ModelResult, PredictiveModel};

/// Model that replays a fixed list of anomaly scores and records its inputs.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    scores: std::collections::VecDeque<Option<f64>>,
    inputs: Vec<ModelInput>,
}

impl ScriptedModel {
    pub fn new(scores: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            scores: scores.into_iter().collect(),
            inputs: Vec::new(),
        }
    }

    pub fn inputs(&self) -> &[ModelInput] {
        &self.inputs
    }
}

impl PredictiveModel for ScriptedModel {
    fn run(&mut self, input: &ModelInput) -> Result<ModelResult> {
        let score = self
            .scores
            .pop_front()
            .ok_or_else(|| Error::Model("script exhausted".to_string()))?;
        self.inputs.push(*input);

        let mut inferences = Map::new();
        inferences.insert(
            ANOMALY_SCORE_KEY.to_string(),
            score.map(Value::from).unwrap_or(Value::Null),
        );
        Ok(ModelResult::new(inferences))
    }
}

/// Likelihood that reports the running mean of all scores seen.
#[derive(Debug, Default)]
pub struct MeanLikelihood {
    calls: Vec<(f64, f64, NaiveDateTime)>,
}

impl MeanLikelihood {
    /// `(value, anomaly_score, timestamp)` for every call, in order.
    pub fn calls(&self) -> &[(f64, f64, NaiveDateTime)] {
        &self.calls
    }
}

impl AnomalyLikelihood for MeanLikelihood {
    fn anomaly_probability(
        &mut self,
        value: f64,
        anomaly_score: f64,
        timestamp: NaiveDateTime,
    ) -> Result<f64> {
        self.calls.push((value, anomaly_score, timestamp));
        let sum: f64 = self.calls.iter().map(|(_, score, _)| score).sum();
        Ok(sum / self.calls.len() as f64)
    }
}
