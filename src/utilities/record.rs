use std::fmt;

use chrono::{DateTime, Local};

use super::direction::Call;
use super::dispatcher::Assignment;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What the outside world learns about an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub timestamp: DateTime<Local>,
    pub origin_floor: u8,
    pub destination_floor: u8,
    pub direction: Call,
    pub assigned_car_id: usize,
    pub party_size: u8,
}

impl RequestRecord {
    pub fn new(timestamp: DateTime<Local>, assignment: &Assignment) -> Self {
        RequestRecord {
            timestamp,
            origin_floor: assignment.request.origin_floor,
            destination_floor: assignment.request.destination_floor,
            direction: assignment.request.call,
            assigned_car_id: assignment.car_id,
            party_size: assignment.request.party_size,
        }
    }

    pub fn headers() -> [&'static str; 6] {
        ["Timestamp", "From", "To", "Direction", "Lift", "Passengers"]
    }

    pub fn to_row(&self) -> [String; 6] {
        [
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.origin_floor.to_string(),
            self.destination_floor.to_string(),
            self.direction.as_string(),
            self.assigned_car_id.to_string(),
            self.party_size.to_string(),
        ]
    }
}

impl fmt::Display for RequestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] From F{} to F{} ({} pax) [{}] -> Lift #{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.origin_floor,
            self.destination_floor,
            self.party_size,
            self.direction,
            self.assigned_car_id
        )
    }
}
