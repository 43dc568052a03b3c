pub mod bridge;
pub mod config;
pub mod error;
pub mod global_variables;
pub mod monitoring;
pub mod shared_data;
pub mod simulation_engine;

pub use bridge::monitor::{Admission, BridgeMonitor};
pub use config::{GroupConfig, SimulationConfig};
pub use error::SimulationError;
pub use simulation_engine::dispatcher::Dispatcher;
