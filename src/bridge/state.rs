use crate::bridge::lane::{Lane, LaneId};
use crate::global_variables::BRIDGE_CAPACITY;
use crate::shared_data::{BridgeSnapshot, LaneSnapshot};
use crate::simulation_engine::vehicles::{Direction, Vehicle, WeightClass};
use std::fmt;

/// Why an entry request could not be granted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    /// Admitting the vehicle would push the bridge over capacity.
    Capacity,
    /// No lane carries the requested direction and neither lane has drained.
    LanesBusy,
}

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocked::Capacity => write!(f, "bridge is too heavy"),
            Blocked::LanesBusy => write!(f, "both lanes are busy in the other direction"),
        }
    }
}

/// Shared record of what is on the bridge.
///
/// Only [`BridgeMonitor`](crate::bridge::monitor::BridgeMonitor) touches this,
/// always with its lock held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeState {
    weight: u32,
    lane_one: Lane,
    lane_two: Lane,
    in_transit: usize,
}

impl BridgeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state with the given lanes already occupied.
    ///
    /// `weight` must be consistent with the occupants; this is checked.
    pub fn with_lanes(weight: u32, lane_one: Lane, lane_two: Lane) -> Self {
        let state = Self {
            weight,
            lane_one,
            lane_two,
            in_transit: 0,
        };
        state.check_invariants();
        state
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn lane(&self, id: LaneId) -> &Lane {
        match id {
            LaneId::One => &self.lane_one,
            LaneId::Two => &self.lane_two,
        }
    }

    fn lane_mut(&mut self, id: LaneId) -> &mut Lane {
        match id {
            LaneId::One => &mut self.lane_one,
            LaneId::Two => &mut self.lane_two,
        }
    }

    pub fn in_transit(&self) -> usize {
        self.in_transit
    }

    pub fn begin_batch(&mut self, vehicles: usize) {
        self.in_transit = vehicles;
    }

    /// Grants entry to `vehicle` if the bridge can take it right now.
    ///
    /// Capacity is checked first. A lane already carrying the vehicle's
    /// direction is preferred (lane 1 before lane 2); otherwise the first
    /// drained lane is rebound. Nothing changes when entry is refused.
    pub fn try_admit(&mut self, vehicle: &Vehicle) -> Result<LaneId, Blocked> {
        if self.weight + vehicle.weight() > BRIDGE_CAPACITY {
            return Err(Blocked::Capacity);
        }

        let lane = self.pick_lane(vehicle.direction)?;
        if self.lane(lane).carries(vehicle.direction) {
            self.lane_mut(lane).join();
        } else {
            self.lane_mut(lane).bind(vehicle.direction);
        }
        self.weight += vehicle.weight();

        self.check_invariants();
        Ok(lane)
    }

    fn pick_lane(&self, direction: Direction) -> Result<LaneId, Blocked> {
        [LaneId::One, LaneId::Two]
            .into_iter()
            .find(|&id| self.lane(id).carries(direction))
            .or_else(|| {
                [LaneId::One, LaneId::Two]
                    .into_iter()
                    .find(|&id| self.lane(id).is_free())
            })
            .ok_or(Blocked::LanesBusy)
    }

    /// Removes `vehicle` from the bridge and returns the lane that was
    /// decremented.
    ///
    /// When both lanes are bound to the same direction the fuller lane is
    /// decremented, lane 1 on a tie. Otherwise the lane bound to the
    /// vehicle's direction is.
    pub fn depart(&mut self, vehicle: &Vehicle) -> LaneId {
        assert!(
            self.weight >= vehicle.weight(),
            "{} left a bridge carrying only {}",
            vehicle,
            self.weight
        );
        self.weight -= vehicle.weight();

        let lane = match (self.lane_one.direction, self.lane_two.direction) {
            (Some(one), Some(two)) if one == two => {
                if self.lane_one.occupants >= self.lane_two.occupants {
                    LaneId::One
                } else {
                    LaneId::Two
                }
            }
            (Some(one), _) if one == vehicle.direction => LaneId::One,
            _ => LaneId::Two,
        };
        self.lane_mut(lane).leave();
        self.in_transit = self.in_transit.saturating_sub(1);

        self.check_invariants();
        lane
    }

    /// Panics if the state could not have been reached by admitting and
    /// removing whole vehicles.
    pub fn check_invariants(&self) {
        assert!(
            self.weight <= BRIDGE_CAPACITY,
            "bridge weight {} exceeds capacity {}",
            self.weight,
            BRIDGE_CAPACITY
        );
        for id in [LaneId::One, LaneId::Two] {
            let lane = self.lane(id);
            assert!(
                lane.occupants == 0 || lane.direction.is_some(),
                "{} is occupied without a direction",
                id
            );
        }
        let vehicles = self.lane_one.occupants + self.lane_two.occupants;
        assert!(
            (WeightClass::Light.weight() * vehicles..=WeightClass::Heavy.weight() * vehicles)
                .contains(&self.weight),
            "bridge weight {} does not match {} vehicles on board",
            self.weight,
            vehicles
        );
    }

    pub fn snapshot(&self) -> BridgeSnapshot {
        let lane = |lane: &Lane| LaneSnapshot {
            direction: lane.direction,
            occupants: lane.occupants,
        };
        BridgeSnapshot {
            weight: self.weight,
            capacity: BRIDGE_CAPACITY,
            lane_one: lane(&self.lane_one),
            lane_two: lane(&self.lane_two),
            in_transit: self.in_transit,
        }
    }
}
