use crate::bridge::monitor::{Admission, BridgeMonitor};
use crate::shared_data::CrossingRecord;
use crate::simulation_engine::vehicles::Vehicle;
use std::sync::Arc;
use tokio::time::{sleep, Duration, Instant};

/// Where a vehicle is in its single pass over the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyPhase {
    /// Waiting for the monitor to admit it.
    Arriving,
    /// On the bridge; holds capacity and a lane slot.
    Crossing,
    /// Handing its capacity back to the monitor.
    Departing,
    Done,
}

/// Everything a vehicle task needs besides the vehicle itself.
#[derive(Debug, Clone)]
pub struct JourneyContext {
    pub monitor: Arc<BridgeMonitor>,
    pub crossing_time: Duration,
    /// 1-based group number, copied into the crossing record.
    pub group: usize,
    /// Start of the simulation; departure times are measured from here.
    pub epoch: Instant,
}

/// One vehicle's trip: arrive, cross, depart. Each phase is entered once.
#[derive(Debug)]
pub struct Journey {
    vehicle: Vehicle,
    phase: JourneyPhase,
}

impl Journey {
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            phase: JourneyPhase::Arriving,
        }
    }

    pub fn phase(&self) -> JourneyPhase {
        self.phase
    }

    fn advance(&mut self) {
        self.phase = match self.phase {
            JourneyPhase::Arriving => JourneyPhase::Crossing,
            JourneyPhase::Crossing => JourneyPhase::Departing,
            JourneyPhase::Departing | JourneyPhase::Done => JourneyPhase::Done,
        };
    }

    async fn arrive(&mut self, monitor: &BridgeMonitor) -> Admission {
        log::info!(
            "{} ({}bound) has arrived.",
            self.vehicle,
            self.vehicle.direction
        );
        let admission = monitor.request_entry(self.vehicle).await;
        self.advance();
        admission
    }

    async fn cross(&mut self, crossing_time: Duration) {
        log::info!("{} is crossing.", self.vehicle);
        sleep(crossing_time).await;
        self.advance();
    }

    fn depart(&mut self, monitor: &BridgeMonitor, admission: Admission) {
        log::info!("{} is leaving.", self.vehicle);
        monitor.record_departure(admission);
        self.advance();
    }

    /// Drives the vehicle from arrival to departure.
    pub async fn run(mut self, context: &JourneyContext) -> CrossingRecord {
        let admission = self.arrive(&context.monitor).await;
        let lane = admission.lane();
        let waited = admission.waited();

        self.cross(context.crossing_time).await;
        self.depart(&context.monitor, admission);
        debug_assert_eq!(self.phase, JourneyPhase::Done);

        CrossingRecord {
            group: context.group,
            vehicle_id: self.vehicle.id,
            weight_class: self.vehicle.weight_class,
            direction: self.vehicle.direction,
            lane,
            waited_ms: waited.as_millis() as u64,
            departed_at_ms: context.epoch.elapsed().as_millis() as u64,
        }
    }
}

/// Simulates one vehicle as an independent task.
pub async fn simulate_vehicle_journey(vehicle: Vehicle, context: JourneyContext) -> CrossingRecord {
    Journey::new(vehicle).run(&context).await
}
