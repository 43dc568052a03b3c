// dispatcher.rs
use crate::bridge::monitor::BridgeMonitor;
use crate::config::{GroupConfig, SimulationConfig};
use crate::error::SimulationError;
use crate::shared_data::CrossingRecord;
use crate::simulation_engine::journey::{simulate_vehicle_journey, JourneyContext};
use crate::simulation_engine::vehicles::{Direction, Vehicle, WeightClass};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{sleep, Duration, Instant};

/// Releases groups of vehicles onto a shared bridge, one group at a time.
pub struct Dispatcher {
    monitor: Arc<BridgeMonitor>,
    crossing_time: Duration,
    rng: StdRng,
    epoch: Instant,
}

impl Dispatcher {
    pub fn new(monitor: Arc<BridgeMonitor>, crossing_time: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            monitor,
            crossing_time,
            rng,
            epoch: Instant::now(),
        }
    }

    pub fn monitor(&self) -> &Arc<BridgeMonitor> {
        &self.monitor
    }

    /// Draws the vehicles of one group: car or van with even odds, north
    /// with the group's probability. Ids start at 1.
    pub fn generate_group(&mut self, group: &GroupConfig) -> Vec<Vehicle> {
        let north = f64::from(group.forward_probability.min(100)) / 100.0;
        (1..=group.vehicles as u32)
            .map(|id| {
                let weight_class = if self.rng.random_bool(0.5) {
                    WeightClass::Light
                } else {
                    WeightClass::Heavy
                };
                let direction = if self.rng.random_bool(north) {
                    Direction::Forward
                } else {
                    Direction::Reverse
                };
                Vehicle::new(id, weight_class, direction)
            })
            .collect()
    }

    /// Spawns one task per vehicle and waits until every one of them has
    /// left the bridge. Records come back ordered by vehicle id.
    ///
    /// A task that panics aborts the rest of the group.
    pub async fn run_group(
        &self,
        group: usize,
        vehicles: Vec<Vehicle>,
    ) -> Result<Vec<CrossingRecord>, SimulationError> {
        self.monitor.begin_batch(vehicles.len());

        let mut trips = JoinSet::new();
        for vehicle in vehicles {
            let context = JourneyContext {
                monitor: Arc::clone(&self.monitor),
                crossing_time: self.crossing_time,
                group,
                epoch: self.epoch,
            };
            trips.spawn(simulate_vehicle_journey(vehicle, context));
        }

        let mut records = Vec::with_capacity(trips.len());
        while let Some(trip) = trips.join_next().await {
            records.push(trip?);
        }
        records.sort_by_key(|r| r.vehicle_id);
        Ok(records)
    }

    /// Runs every configured group in order, pausing after each one.
    pub async fn run(
        &mut self,
        config: &SimulationConfig,
    ) -> Result<Vec<CrossingRecord>, SimulationError> {
        let mut all_records = Vec::new();
        for (i, group) in config.groups.iter().enumerate() {
            let number = i + 1;
            let vehicles = self.generate_group(group);
            log::info!("Group #{} simulating now.", number);

            let records = self.run_group(number, vehicles).await?;
            log::debug!("Group #{} drained: {} crossings", number, records.len());
            all_records.extend(records);

            log::info!("Interim delay for group #{} commencing.", number);
            sleep(group.delay()).await;
        }
        log::info!("All groups successfully simulated.");
        Ok(all_records)
    }
}
