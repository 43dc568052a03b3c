use serde::{Deserialize, Serialize};
use std::fmt;

/// Capacity cost of a vehicle on the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    /// A car; weighs 2.
    Light,
    /// A van; weighs 3.
    Heavy,
}

impl WeightClass {
    pub fn weight(self) -> u32 {
        match self {
            WeightClass::Light => 2,
            WeightClass::Heavy => 3,
        }
    }

    /// Name used in vehicle lifecycle messages.
    pub fn label(self) -> &'static str {
        match self {
            WeightClass::Light => "Car",
            WeightClass::Heavy => "Van",
        }
    }
}

/// Direction of travel requested by a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Northbound.
    Forward,
    /// Southbound.
    Reverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "North"),
            Direction::Reverse => write!(f, "South"),
        }
    }
}

/// A vehicle waiting to cross, crossing, or leaving the bridge.
///
/// Vehicles are built by the dispatcher before their task is spawned and
/// never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vehicle {
    /// Unique within its group, starting at 1.
    pub id: u32,
    pub weight_class: WeightClass,
    pub direction: Direction,
}

impl Vehicle {
    pub fn new(id: u32, weight_class: WeightClass, direction: Direction) -> Self {
        Self {
            id,
            weight_class,
            direction,
        }
    }

    pub fn weight(&self) -> u32 {
        self.weight_class.weight()
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.weight_class.label(), self.id)
    }
}
