//! Errors surfaced by the simulation driver.
//!
//! The bridge monitor itself never fails; everything here comes from reading
//! configuration, writing output, or a vehicle task that died.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write crossing log: {0}")]
    Csv(#[from] csv::Error),

    /// A group failed validation; `index` is 1-based.
    #[error("group #{index}: {reason}")]
    InvalidGroup { index: usize, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A vehicle task panicked or was cancelled before it left the bridge.
    #[error("vehicle task failed: {0}")]
    VehicleTask(#[from] tokio::task::JoinError),
}

impl SimulationError {
    /// Short stable label for log lines.
    pub fn as_label(&self) -> &'static str {
        match self {
            SimulationError::Io(_) => "io",
            SimulationError::Json(_) => "scenario_json",
            SimulationError::Csv(_) => "crossing_csv",
            SimulationError::InvalidGroup { .. } => "invalid_group",
            SimulationError::InvalidInput(_) => "invalid_input",
            SimulationError::VehicleTask(_) => "vehicle_task",
        }
    }
}
