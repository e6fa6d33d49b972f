/// ----- FLEET -----
/// All cars of the bank together with the dispatcher. The scheduling loop is
/// the only owner of a running fleet; everything else talks to it through the
/// loop's command channel.

use std::time::Duration;

use log::{debug, info};

use super::car::{Car, CarEvent};
use super::dispatcher::{Assignment, Dispatcher};
use super::error::{Error, Result};
use super::snapshot::CarSnapshot;

#[derive(Debug, Clone)]
pub struct Fleet {
    cars: Vec<Car>,
    dispatcher: Dispatcher,
    tick_interval: Duration,
    requests_submitted: usize,
}

impl Fleet {
    pub fn new(num_floors: u8, num_cars: u8, tick_interval: Duration) -> Result<Self> {
        validate(num_floors, num_cars)?;
        Ok(Fleet {
            cars: build_cars(num_floors, num_cars, tick_interval),
            dispatcher: Dispatcher::new(num_floors),
            tick_interval,
            requests_submitted: 0,
        })
    }

    /// Rebuilds the bank with new dimensions. Only valid before the first
    /// request has been submitted.
    pub fn configure(&mut self, num_floors: u8, num_cars: u8) -> Result<()> {
        if self.requests_submitted > 0 {
            return Err(Error::Configuration(format!(
                "cannot reconfigure after {} request(s) were submitted",
                self.requests_submitted
            )));
        }
        validate(num_floors, num_cars)?;
        self.cars = build_cars(num_floors, num_cars, self.tick_interval);
        self.dispatcher = Dispatcher::new(num_floors);
        info!("Fleet configured with {} floors and {} cars", num_floors, num_cars);
        Ok(())
    }

    pub fn num_floors(&self) -> u8 {
        self.dispatcher.num_floors()
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn submit_request(
        &mut self,
        origin_floor: u8,
        destination_floor: u8,
        party_size: u8,
        now: Duration,
    ) -> Result<Assignment> {
        let assignment = self
            .dispatcher
            .assign(&mut self.cars, origin_floor, destination_floor, party_size, now)?;
        self.requests_submitted += 1;
        debug!(
            "Request {} -> {} ({} pax) assigned to car {}",
            origin_floor, destination_floor, party_size, assignment.car_id
        );
        Ok(assignment)
    }

    /// Ticks every car once, in id order.
    pub fn tick_all(&mut self, now: Duration) -> Vec<CarEvent> {
        self.cars.iter_mut().flat_map(|car| car.tick(now)).collect()
    }

    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        self.cars.iter().map(CarSnapshot::of).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.cars.iter().all(|car| !car.has_pending_work())
    }
}

fn validate(num_floors: u8, num_cars: u8) -> Result<()> {
    if num_floors == 0 {
        return Err(Error::Configuration(String::from("a building needs at least one floor")));
    }
    if num_cars == 0 {
        return Err(Error::Configuration(String::from("a bank needs at least one car")));
    }
    Ok(())
}

fn build_cars(num_floors: u8, num_cars: u8, tick_interval: Duration) -> Vec<Car> {
    (0..num_cars as usize)
        .map(|id| Car::new(id, num_floors, tick_interval))
        .collect()
}
