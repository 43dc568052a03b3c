// bridge/mod.rs
pub mod lane;
pub mod monitor;
pub mod state;
