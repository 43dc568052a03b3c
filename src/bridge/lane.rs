use crate::simulation_engine::vehicles::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the two lanes on the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneId {
    One,
    Two,
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneId::One => write!(f, "Lane 1"),
            LaneId::Two => write!(f, "Lane 2"),
        }
    }
}

/// A traffic slot on the bridge, bound to a single direction while occupied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lane {
    /// `None` until the first vehicle binds the lane. Stays at the last
    /// direction after the lane drains, but that direction is no longer
    /// binding.
    pub direction: Option<Direction>,
    /// Vehicles currently counted on this lane.
    pub occupants: u32,
}

impl Lane {
    /// True when the lane is occupied by traffic heading in `direction`.
    pub fn carries(&self, direction: Direction) -> bool {
        self.occupants > 0 && self.direction == Some(direction)
    }

    /// True when the lane may be rebound to any direction.
    pub fn is_free(&self) -> bool {
        self.occupants == 0
    }

    /// Adds a vehicle travelling the lane's current direction.
    pub fn join(&mut self) {
        assert!(self.occupants > 0, "joined a lane with no binding direction");
        self.occupants += 1;
    }

    /// Binds a drained lane to `direction` and admits its first vehicle.
    pub fn bind(&mut self, direction: Direction) {
        assert!(
            self.is_free(),
            "lane direction changed while {} vehicles are on it",
            self.occupants
        );
        self.direction = Some(direction);
        self.occupants = 1;
    }

    pub fn leave(&mut self) {
        assert!(self.occupants > 0, "vehicle left an empty lane");
        self.occupants -= 1;
    }
}
