use std::time::Duration;

/// Maximum total weight the bridge carries at once.
pub const BRIDGE_CAPACITY: u32 = 12;

/// Weights at which the monitor publishes a status snapshot.
pub const STATUS_THRESHOLDS: [u32; 2] = [BRIDGE_CAPACITY / 2, BRIDGE_CAPACITY];

/// Time a vehicle spends on the bridge between entry and departure.
pub const DEFAULT_CROSSING_TIME: Duration = Duration::from_secs(3);
