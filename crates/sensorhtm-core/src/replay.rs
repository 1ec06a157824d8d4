//! Replays stored points through a processor into a model's storage space.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::descriptor::SensorModel;
use crate::error::Result;
use crate::model::{AnomalyLikelihood, InferenceShifter, PredictiveModel};
use crate::point::Point;
use crate::processor::HtmProcessor;
use crate::timestamp::normalize_timestamp;

/// Outcome of a replay run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub processed: u64,
    pub skipped: u64,
    pub written: u64,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}

/// Feed `points` through `processor` and write every record to `target`.
///
/// Points must already be in chronological order. The first failure stops
/// the run; everything written before it stays written.
pub fn replay<M, S, L, I>(
    processor: &mut HtmProcessor<M, S, L>,
    target: &SensorModel,
    points: I,
) -> Result<ReplaySummary>
where
    M: PredictiveModel,
    S: InferenceShifter,
    L: AnomalyLikelihood,
    I: IntoIterator<Item = Point>,
{
    tracing::info!(model = %target, key = target.key(), "Starting replay");
    let mut summary = ReplaySummary::default();

    for point in points {
        let timestamp = normalize_timestamp(&point.timestamp)?;
        let output = processor.process_at(timestamp, point.value)?;

        summary.processed += 1;
        summary.first.get_or_insert(timestamp);
        summary.last = Some(timestamp);

        match output {
            Some(record) => {
                target.write_result(timestamp, point.value, &record)?;
                summary.written += 1;
            }
            None => summary.skipped += 1,
        }
    }

    tracing::info!(
        model = %target,
        processed = summary.processed,
        skipped = summary.skipped,
        written = summary.written,
        "Replay finished"
    );
    Ok(summary)
}
