/// ----- CAR -----
/// One lift car and its own request queues. The car is advanced by the
/// scheduling loop through `tick`, at most one floor per effective tick:
/// drop off, pick up, batch nearby same-direction pickups, then pick the
/// next floor to move toward.

use std::cmp::Ordering;
use std::iter;
use std::time::Duration;

use super::direction::Direction;
use super::request::Request;

/// Pickups this many floors ahead, heading the same way, join the current trip.
const WINDOW_FLOORS: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarEvent {
    PassengerDropped {
        car_id: usize,
        floor: u8,
    },
    PassengerPickedUp {
        car_id: usize,
        floor: u8,
        destination: u8,
        party_size: u8,
    },
}

#[derive(Debug, Clone)]
pub struct Car {
    id: usize,
    num_floors: u8,
    floor: u8,
    direction: Direction,
    pickup_requests: Vec<Request>,
    // one entry per rider on board
    drop_floors: Vec<u8>,
    window_stops: Vec<u8>,
    load: u32,
    last_tick_at: Duration,
    tick_interval: Duration,
}

impl Car {
    pub fn new(id: usize, num_floors: u8, tick_interval: Duration) -> Self {
        Car {
            id,
            num_floors,
            floor: 0,
            direction: Direction::Idle,
            pickup_requests: Vec::new(),
            drop_floors: Vec::new(),
            window_stops: Vec::new(),
            load: 0,
            last_tick_at: Duration::ZERO,
            tick_interval,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn load(&self) -> u32 {
        self.load
    }

    pub fn pickup_requests(&self) -> &[Request] {
        &self.pickup_requests
    }

    /// Floors the car has committed to stop at: rider destinations first,
    /// then window stops.
    pub fn drop_floors(&self) -> Vec<u8> {
        self.drop_floors.iter().chain(self.window_stops.iter()).copied().collect()
    }

    pub fn has_pending_work(&self) -> bool {
        !self.pickup_requests.is_empty() || !self.drop_floors.is_empty() || !self.window_stops.is_empty()
    }

    /// Floors are validated by the dispatcher before a request gets here.
    pub fn enqueue_pickup(&mut self, request: Request) {
        self.pickup_requests.push(request);
    }

    pub fn tick(&mut self, now: Duration) -> Vec<CarEvent> {
        if now.saturating_sub(self.last_tick_at) < self.tick_interval {
            return Vec::new();
        }
        let mut events = Vec::new();
        self.drop_off(&mut events);
        self.pick_up(&mut events);
        self.batch_window();
        self.step();
        self.last_tick_at = now;
        events
    }

    fn drop_off(&mut self, events: &mut Vec<CarEvent>) {
        let floor = self.floor;
        self.window_stops.retain(|&stop| stop != floor);
        if let Some(index) = self.drop_floors.iter().position(|&drop| drop == floor) {
            self.drop_floors.remove(index);
            self.load = self.load.saturating_sub(1);
            events.push(CarEvent::PassengerDropped { car_id: self.id, floor });
        }
    }

    // Everyone waiting here boards; capacity is not modelled.
    fn pick_up(&mut self, events: &mut Vec<CarEvent>) {
        let floor = self.floor;
        let (boarding, waiting): (Vec<Request>, Vec<Request>) = self
            .pickup_requests
            .drain(..)
            .partition(|request| request.origin_floor == floor);
        self.pickup_requests = waiting;

        for request in boarding {
            self.drop_floors
                .extend(iter::repeat(request.destination_floor).take(request.party_size as usize));
            self.load += u32::from(request.party_size);
            events.push(CarEvent::PassengerPickedUp {
                car_id: self.id,
                floor,
                destination: request.destination_floor,
                party_size: request.party_size,
            });
        }
    }

    fn batch_window(&mut self) {
        let call = match self.direction.to_call() {
            Some(call) => call,
            None => return,
        };
        let window: Vec<u8> = self
            .pickup_requests
            .iter()
            .filter(|request| request.call == call && self.in_window(request.origin_floor))
            .map(|request| request.origin_floor)
            .collect();
        for floor in window {
            if !self.drop_floors.contains(&floor) && !self.window_stops.contains(&floor) {
                self.window_stops.push(floor);
            }
        }
    }

    fn in_window(&self, floor: u8) -> bool {
        let (current, floor, window) = (u16::from(self.floor), u16::from(floor), u16::from(WINDOW_FLOORS));
        match self.direction {
            Direction::Up => current < floor && floor <= current + window,
            Direction::Down => current.saturating_sub(window) <= floor && floor < current,
            Direction::Idle => false,
        }
    }

    fn targets(&self) -> Vec<u8> {
        self.pickup_requests
            .iter()
            .map(|request| request.origin_floor)
            .chain(self.drop_floors.iter().copied())
            .chain(self.window_stops.iter().copied())
            .collect()
    }

    fn nearest(&self, floors: impl Iterator<Item = u8>) -> Option<u8> {
        floors.min_by_key(|&floor| (self.floor.abs_diff(floor), floor))
    }

    fn next_target(&self, targets: &[u8]) -> Option<u8> {
        let floor = self.floor;
        let ahead = match self.direction {
            Direction::Up => self.nearest(targets.iter().copied().filter(|&target| target >= floor)),
            Direction::Down => self.nearest(targets.iter().copied().filter(|&target| target <= floor)),
            Direction::Idle => None,
        };
        ahead.or_else(|| self.nearest(targets.iter().copied()))
    }

    fn step(&mut self) {
        let targets = self.targets();
        let target = match self.next_target(&targets) {
            Some(target) => target,
            None => {
                self.direction = Direction::Idle;
                return;
            }
        };
        match target.cmp(&self.floor) {
            Ordering::Greater => {
                self.direction = Direction::Up;
                self.floor += 1;
            }
            Ordering::Less => {
                self.direction = Direction::Down;
                self.floor -= 1;
            }
            // riders still alighting here: only idle once nothing is left
            // elsewhere, otherwise face the floor served after this one
            Ordering::Equal => {
                let elsewhere: Vec<u8> = targets.into_iter().filter(|&target| target != self.floor).collect();
                self.direction = match self.next_target(&elsewhere) {
                    Some(next) if next > self.floor => Direction::Up,
                    Some(_) => Direction::Down,
                    None => Direction::Idle,
                };
            }
        }
        assert!(
            self.floor < self.num_floors,
            "car {} moved to floor {} outside 0..{}",
            self.id,
            self.floor,
            self.num_floors
        );
    }
}
