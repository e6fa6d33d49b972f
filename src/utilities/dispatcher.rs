/// ----- DISPATCHER -----
/// This stateless module decides which car serves a new request. Cars that
/// are idle, or already heading toward the request's origin in the request's
/// direction, are preferred; if there are none every car is a candidate, so a
/// request is never turned away. Among the candidates the nearest car wins,
/// then the least loaded, then the lowest id.

use std::time::Duration;

use super::car::Car;
use super::direction::Direction;
use super::error::Result;
use super::request::Request;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub car_id: usize,
    pub request: Request,
}

#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    num_floors: u8,
}

impl Dispatcher {
    pub fn new(num_floors: u8) -> Self {
        Dispatcher { num_floors }
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    /// Validates the request, picks a car and enqueues the request on it.
    pub fn assign(
        &self,
        cars: &mut [Car],
        origin_floor: u8,
        destination_floor: u8,
        party_size: u8,
        now: Duration,
    ) -> Result<Assignment> {
        let request = Request::new(origin_floor, destination_floor, party_size, now, self.num_floors)?;
        let index = self.select_car(cars, &request);
        let car = &mut cars[index];
        car.enqueue_pickup(request.clone());
        Ok(Assignment { car_id: car.id(), request })
    }

    /// Index into `cars` of the car that should serve `request`.
    ///
    /// Panics if `cars` is empty; a fleet always has at least one car.
    pub fn select_car(&self, cars: &[Car], request: &Request) -> usize {
        let eligible: Vec<usize> = (0..cars.len())
            .filter(|&index| is_eligible(&cars[index], request))
            .collect();
        let candidates = if eligible.is_empty() { (0..cars.len()).collect() } else { eligible };

        candidates
            .into_iter()
            .min_by_key(|&index| cost(&cars[index], request))
            .expect("fleet without cars")
    }
}

fn is_eligible(car: &Car, request: &Request) -> bool {
    match car.direction() {
        Direction::Idle => true,
        heading => heading == Direction::from(request.call) && heading.has_ahead(car.floor(), request.origin_floor),
    }
}

fn cost(car: &Car, request: &Request) -> (u8, u32, usize) {
    (car.floor().abs_diff(request.origin_floor), car.load(), car.id())
}
