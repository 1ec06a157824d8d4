//! Time-series points and the records produced from them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single reading as retrieved from the time-series store.
///
/// On the wire this is the ordered pair `[timestamp, value]`, where the value
/// may be `null` for buckets with no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, Option<f64>)", into = "(String, Option<f64>)")]
pub struct Point {
    pub timestamp: String,
    pub value: Option<f64>,
}

impl Point {
    pub fn new(timestamp: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

impl From<(String, Option<f64>)> for Point {
    fn from((timestamp, value): (String, Option<f64>)) -> Self {
        Self { timestamp, value }
    }
}

impl From<Point> for (String, Option<f64>) {
    fn from(point: Point) -> Self {
        (point.timestamp, point.value)
    }
}

/// Output of the point processor for one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub inferences: Map<String, Value>,
    pub anomaly_likelihood: f64,
}

/// An output record persisted in a model's storage space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
    #[serde(flatten)]
    pub record: OutputRecord,
}

impl StoredResult {
    pub fn new(timestamp: NaiveDateTime, value: Option<f64>, record: OutputRecord) -> Self {
        Self {
            timestamp,
            value,
            record,
        }
    }
}
