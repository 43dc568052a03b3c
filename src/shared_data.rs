// src/shared_data.rs

use crate::bridge::lane::LaneId;
use crate::simulation_engine::vehicles::{Direction, WeightClass};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction and occupancy of one lane at the time of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub direction: Option<Direction>,
    pub occupants: u32,
}

/// Bridge status published when the total weight hits a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSnapshot {
    pub weight: u32,
    pub capacity: u32,
    pub lane_one: LaneSnapshot,
    pub lane_two: LaneSnapshot,
    /// Vehicles of the current group that have not yet left the bridge.
    pub in_transit: usize,
}

impl BridgeSnapshot {
    pub fn lane(&self, id: LaneId) -> LaneSnapshot {
        match id {
            LaneId::One => self.lane_one,
            LaneId::Two => self.lane_two,
        }
    }
}

impl fmt::Display for BridgeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in [LaneId::One, LaneId::Two] {
            let lane = self.lane(id);
            match lane.direction {
                Some(direction) => writeln!(
                    f,
                    "{} direction and quantity: {}bound with {} vehicles",
                    id, direction, lane.occupants
                )?,
                None => writeln!(f, "{} direction and quantity: unassigned", id)?,
            }
        }
        write!(
            f,
            "Bridge weight {}/{}; {} vehicles still in transit.",
            self.weight, self.capacity, self.in_transit
        )
    }
}

/// One row of the crossing log, written when a vehicle leaves the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingRecord {
    /// 1-based group number.
    pub group: usize,
    pub vehicle_id: u32,
    pub weight_class: WeightClass,
    pub direction: Direction,
    /// Lane the vehicle was admitted to.
    pub lane: LaneId,
    /// Time spent blocked in `request_entry`.
    pub waited_ms: u64,
    /// Milliseconds since the simulation started, taken at departure.
    pub departed_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_text_lists_both_lanes() {
        let snapshot = BridgeSnapshot {
            weight: 6,
            capacity: 12,
            lane_one: LaneSnapshot {
                direction: Some(Direction::Forward),
                occupants: 1,
            },
            lane_two: LaneSnapshot {
                direction: None,
                occupants: 0,
            },
            in_transit: 4,
        };

        let text = snapshot.to_string();
        assert!(text.contains("Lane 1 direction and quantity: Northbound with 1 vehicles"));
        assert!(text.contains("Lane 2 direction and quantity: unassigned"));
        assert!(text.ends_with("4 vehicles still in transit."));
    }
}
