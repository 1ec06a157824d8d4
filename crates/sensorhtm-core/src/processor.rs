//! Point processor.
//!
//! Feeds stored readings through the model, the shifter and the likelihood
//! estimator, one point at a time, and turns each into an output record.
//! A session owns all three collaborators so their cross-call state cannot
//! be shared or reordered behind its back.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{AnomalyLikelihood, InferenceShifter, ModelInput, PredictiveModel};
use crate::point::{OutputRecord, Point};
use crate::timestamp::normalize_timestamp;

/// Counters for one processing session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessorStats {
    /// Points handed to the model.
    pub processed: u64,
    /// Points that produced no record.
    pub skipped: u64,
    /// Points that produced a record.
    pub emitted: u64,
}

/// A processing session for one sensor model.
pub struct HtmProcessor<M, S, L> {
    model: M,
    shifter: S,
    likelihood: L,
    last_timestamp: Option<NaiveDateTime>,
    stats: ProcessorStats,
}

impl<M, S, L> HtmProcessor<M, S, L>
where
    M: PredictiveModel,
    S: InferenceShifter,
    L: AnomalyLikelihood,
{
    pub fn new(model: M, shifter: S, likelihood: L) -> Self {
        Self {
            model,
            shifter,
            likelihood,
            last_timestamp: None,
            stats: ProcessorStats::default(),
        }
    }

    /// Process one stored point.
    ///
    /// Returns `Ok(None)` when the point has no value or the model produced
    /// no anomaly score.
    pub fn process(&mut self, point: &Point) -> Result<Option<OutputRecord>> {
        let timestamp = normalize_timestamp(&point.timestamp)?;
        self.process_at(timestamp, point.value)
    }

    /// Process a point whose timestamp is already parsed.
    pub fn process_at(
        &mut self,
        timestamp: NaiveDateTime,
        value: Option<f64>,
    ) -> Result<Option<OutputRecord>> {
        // Timestamps are truncated to the second, so equal ones are allowed.
        if let Some(previous) = self.last_timestamp {
            if timestamp < previous {
                return Err(Error::OutOfOrder {
                    previous,
                    current: timestamp,
                });
            }
        }

        // The model sees every point, including empty ones.
        let result = self.model.run(&ModelInput { timestamp, value })?;
        self.last_timestamp = Some(timestamp);
        self.stats.processed += 1;

        let result = self.shifter.shift(result);
        let score = result.anomaly_score()?;

        let (value, anomaly_score) = match (value, score) {
            (Some(value), Some(score)) => (value, score),
            (value, score) => {
                tracing::debug!(
                    %timestamp,
                    has_value = value.is_some(),
                    has_score = score.is_some(),
                    "Skipping point"
                );
                self.stats.skipped += 1;
                return Ok(None);
            }
        };

        let anomaly_likelihood = self
            .likelihood
            .anomaly_probability(value, anomaly_score, timestamp)?;
        self.stats.emitted += 1;
        tracing::trace!(%timestamp, value, anomaly_score, anomaly_likelihood, "Point processed");

        Ok(Some(OutputRecord {
            inferences: result.inferences,
            anomaly_likelihood,
        }))
    }

    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }

    /// Timestamp of the most recent point the model has seen.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.last_timestamp
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn likelihood(&self) -> &L {
        &self.likelihood
    }

    /// Hand back the collaborators, e.g. to persist model state.
    pub fn into_parts(self) -> (M, S, L) {
        (self.model, self.shifter, self.likelihood)
    }
}
