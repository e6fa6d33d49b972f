use std::time::Duration;

use super::direction::Call;
use super::error::{Error, Result};

/// One passenger trip intent, validated on construction.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub origin_floor: u8,
    pub call: Call,
    pub submitted_at: Duration,
    pub destination_floor: u8,
    pub party_size: u8,
}

impl Request {
    pub fn new(
        origin_floor: u8,
        destination_floor: u8,
        party_size: u8,
        submitted_at: Duration,
        num_floors: u8,
    ) -> Result<Self> {
        for floor in [origin_floor, destination_floor] {
            if floor >= num_floors {
                return Err(Error::InvalidFloor { floor, num_floors });
            }
        }
        if origin_floor == destination_floor {
            return Err(Error::TrivialRequest { floor: origin_floor });
        }
        if party_size == 0 {
            return Err(Error::InvalidPartySize);
        }
        Ok(Request {
            origin_floor,
            call: Call::between(origin_floor, destination_floor),
            submitted_at,
            destination_floor,
            party_size,
        })
    }
}
