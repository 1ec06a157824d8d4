//! Shared configuration defaults.
//!
//! Constants and environment variable names used across the workspace, so
//! the CLI and the storage crate agree on formats and locations.

/// Default values.
pub mod defaults {
    /// Format point timestamps are parsed with once their suffix is stripped.
    pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    /// Field the model predicts.
    pub const PREDICTED_FIELD: &str = "value";
    /// Inference key holding the raw anomaly score.
    pub const ANOMALY_SCORE_KEY: &str = "anomalyScore";
    /// Tag key naming a sensor's component.
    pub const COMPONENT_TAG: &str = "component";
    /// Suffix of every model display name.
    pub const MODEL_LABEL: &str = "HTM Model";
    /// Default model store location.
    pub const DB_PATH: &str = "./data/sensorhtm.redb";
}

/// Environment variable names.
pub mod env_vars {
    /// Overrides the model store location.
    pub const DB_PATH: &str = "SENSORHTM_DB";
    /// Emit JSON logs when set to `true`.
    pub const LOG_JSON: &str = "SENSORHTM_LOG_JSON";
}

/// Resolve the model store path from the environment, or the default.
pub fn db_path() -> String {
    std::env::var(env_vars::DB_PATH)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| defaults::DB_PATH.to_string())
}

/// Whether JSON log output was requested.
pub fn json_logging() -> bool {
    std::env::var(env_vars::LOG_JSON)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}
