//! Ports to the external model runtime.
//!
//! The predictive model, the inference shifter and the anomaly-likelihood
//! estimator all carry state across calls. They are owned by an
//! [`HtmProcessor`](crate::processor::HtmProcessor) session and driven with
//! `&mut self`, one point at a time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::defaults::ANOMALY_SCORE_KEY;
use crate::error::{Error, Result};

/// One input row handed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

/// Output of one model step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub inferences: Map<String, Value>,
}

impl ModelResult {
    pub fn new(inferences: Map<String, Value>) -> Self {
        Self { inferences }
    }

    /// Raw anomaly score, if the model produced one.
    ///
    /// Absent and `null` scores are both reported as `None`. Any other
    /// non-numeric score is an [`Error::Model`].
    pub fn anomaly_score(&self) -> Result<Option<f64>> {
        match self.inferences.get(ANOMALY_SCORE_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                Error::Model(format!("{} is not a number: {}", ANOMALY_SCORE_KEY, value))
            }),
        }
    }
}

/// A predictive model that learns from every row it sees.
pub trait PredictiveModel {
    fn run(&mut self, input: &ModelInput) -> Result<ModelResult>;
}

/// Realigns multi-step-ahead predictions with the timestamps they target.
pub trait InferenceShifter {
    fn shift(&mut self, result: ModelResult) -> ModelResult;
}

/// Turns anomaly scores into likelihoods given the history seen so far.
///
/// Calls must arrive in chronological order for one sensor.
pub trait AnomalyLikelihood {
    fn anomaly_probability(
        &mut self,
        value: f64,
        anomaly_score: f64,
        timestamp: NaiveDateTime,
    ) -> Result<f64>;
}

/// Shifter that leaves results untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughShifter;

impl InferenceShifter for PassthroughShifter {
    fn shift(&mut self, result: ModelResult) -> ModelResult {
        result
    }
}

impl<T: PredictiveModel + ?Sized> PredictiveModel for Box<T> {
    fn run(&mut self, input: &ModelInput) -> Result<ModelResult> {
        (**self).run(input)
    }
}

impl<T: InferenceShifter + ?Sized> InferenceShifter for Box<T> {
    fn shift(&mut self, result: ModelResult) -> ModelResult {
        (**self).shift(result)
    }
}

impl<T: AnomalyLikelihood + ?Sized> AnomalyLikelihood for Box<T> {
    fn anomaly_probability(
        &mut self,
        value: f64,
        anomaly_score: f64,
        timestamp: NaiveDateTime,
    ) -> Result<f64> {
        (**self).anomaly_probability(value, anomaly_score, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(inferences: Value) -> ModelResult {
        ModelResult::new(inferences.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn test_anomaly_score_present() {
        assert_eq!(
            result(json!({"anomalyScore": 0.4})).anomaly_score().unwrap(),
            Some(0.4)
        );
    }

    #[test]
    fn test_anomaly_score_absent_or_null() {
        assert_eq!(result(json!({})).anomaly_score().unwrap(), None);
        assert_eq!(result(json!({"anomalyScore": null})).anomaly_score().unwrap(), None);
    }

    #[test]
    fn test_anomaly_score_not_a_number() {
        let err = result(json!({"anomalyScore": "0.4"})).anomaly_score().unwrap_err();
        assert!(matches!(err, Error::Model(_)));
        assert!(err.to_string().contains("anomalyScore"));
    }

    #[test]
    fn test_passthrough_shifter() {
        let mut shifter = PassthroughShifter;
        let original = result(json!({"anomalyScore": 1.0, "multiStepBestPredictions": {"1": 3.5}}));
        assert_eq!(shifter.shift(original.clone()), original);
    }

    #[test]
    fn test_boxed_shifter() {
        let mut shifter: Box<dyn InferenceShifter> = Box::new(PassthroughShifter);
        let original = result(json!({"anomalyScore": 0.0}));
        assert_eq!(shifter.shift(original.clone()), original);
    }
}
