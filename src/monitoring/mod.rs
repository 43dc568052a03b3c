// monitoring/mod.rs
pub mod crossing_log;
pub mod status;
