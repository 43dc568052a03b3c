// simulation_engine/mod.rs
pub mod dispatcher;
pub mod journey;
pub mod vehicles;
