use crate::bridge::lane::LaneId;
use crate::bridge::state::BridgeState;
use crate::global_variables::STATUS_THRESHOLDS;
use crate::shared_data::BridgeSnapshot;
use crate::simulation_engine::vehicles::Vehicle;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::{mpsc, Notify};
use tokio::time::{Duration, Instant};

/// A vehicle's claim on bridge capacity and a lane slot.
///
/// Returned by [`BridgeMonitor::request_entry`] and consumed by
/// [`BridgeMonitor::record_departure`], so every entry is departed at most once.
///
/// ```compile_fail
/// # use bridge_traffic::BridgeMonitor;
/// # use bridge_traffic::simulation_engine::vehicles::{Direction, Vehicle, WeightClass};
/// # async fn twice(monitor: &BridgeMonitor) {
/// let car = Vehicle::new(1, WeightClass::Light, Direction::Forward);
/// let admission = monitor.request_entry(car).await;
/// monitor.record_departure(admission);
/// monitor.record_departure(admission);
/// # }
/// ```
#[derive(Debug)]
pub struct Admission {
    vehicle: Vehicle,
    lane: LaneId,
    waited: Duration,
}

impl Admission {
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Lane the vehicle was admitted to.
    pub fn lane(&self) -> LaneId {
        self.lane
    }

    /// Time spent blocked before entry was granted.
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

/// Serializes access to the [`BridgeState`].
///
/// Entry requests that cannot be granted park on a single broadcast signal
/// and re-check both capacity and lane availability after every departure.
/// Waiters are not served in any particular order.
#[derive(Debug, Default)]
pub struct BridgeMonitor {
    state: Mutex<BridgeState>,
    departures: Notify,
    status: Option<mpsc::UnboundedSender<BridgeSnapshot>>,
}

impl BridgeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already populated bridge.
    pub fn from_state(state: BridgeState) -> Self {
        Self {
            state: Mutex::new(state),
            ..Self::default()
        }
    }

    /// Sends a snapshot to `status` whenever the bridge weight reaches half
    /// or full capacity on entry.
    pub fn with_status_channel(mut self, status: mpsc::UnboundedSender<BridgeSnapshot>) -> Self {
        self.status = Some(status);
        self
    }

    fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().expect("bridge state mutex poisoned")
    }

    /// Resets the in-transit counter reported in snapshots.
    pub fn begin_batch(&self, vehicles: usize) {
        self.lock().begin_batch(vehicles);
    }

    pub fn snapshot(&self) -> BridgeSnapshot {
        self.lock().snapshot()
    }

    /// Waits until `vehicle` fits on the bridge and a lane can take its
    /// direction, then puts it on the bridge.
    pub async fn request_entry(&self, vehicle: Vehicle) -> Admission {
        let started = Instant::now();
        loop {
            // Registered before the check so a departure in between still wakes us.
            let departed = self.departures.notified();

            let admitted = {
                let mut state = self.lock();
                state
                    .try_admit(&vehicle)
                    .map(|lane| (lane, state.snapshot()))
            };

            match admitted {
                Ok((lane, snapshot)) => {
                    log::debug!("{} entered {} (weight {})", vehicle, lane, snapshot.weight);
                    if STATUS_THRESHOLDS.contains(&snapshot.weight) {
                        self.publish(snapshot);
                    }
                    return Admission {
                        vehicle,
                        lane,
                        waited: started.elapsed(),
                    };
                }
                Err(blocked) => {
                    log::debug!("{} waiting at the bridge: {}", vehicle, blocked);
                    departed.await;
                }
            }
        }
    }

    /// Takes the admitted vehicle off the bridge and wakes every waiting
    /// entry request. Returns the lane whose count was decremented.
    pub fn record_departure(&self, admission: Admission) -> LaneId {
        let lane = self.lock().depart(&admission.vehicle);
        self.departures.notify_waiters();
        lane
    }

    fn publish(&self, snapshot: BridgeSnapshot) {
        if let Some(status) = &self.status {
            if status.send(snapshot).is_err() {
                log::debug!("status receiver dropped; snapshot discarded");
            }
        }
    }
}
