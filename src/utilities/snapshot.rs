use super::car::Car;
use super::direction::{Call, Direction};

/// Copy of one car's state, safe to hand to other threads.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CarSnapshot {
    pub car_id: usize,
    pub floor: u8,
    pub direction: Direction,
    pub load: u32,
    pub pending_pickups: Vec<(u8, Call)>,
    pub pending_drops: Vec<u8>,
}

impl CarSnapshot {
    pub fn of(car: &Car) -> Self {
        CarSnapshot {
            car_id: car.id(),
            floor: car.floor(),
            direction: car.direction(),
            load: car.load(),
            pending_pickups: car
                .pickup_requests()
                .iter()
                .map(|request| (request.origin_floor, request.call))
                .collect(),
            pending_drops: car.drop_floors(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.direction == Direction::Idle && self.pending_pickups.is_empty() && self.pending_drops.is_empty()
    }
}

/// What the scheduling loop publishes after every wake.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FleetSnapshot {
    pub num_floors: u8,
    pub cars: Vec<CarSnapshot>,
}

/// Hall calls waiting anywhere in the building, as `[floor][call]`.
pub fn hall_calls(snapshots: &[CarSnapshot], num_floors: u8) -> Vec<Vec<bool>> {
    let mut calls = vec![vec![false; 2]; num_floors as usize];
    for snapshot in snapshots {
        for &(floor, call) in &snapshot.pending_pickups {
            if let Some(row) = calls.get_mut(floor as usize) {
                row[call as usize] = true;
            }
        }
    }
    calls
}
