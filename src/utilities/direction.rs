use std::fmt;

/// Direction of a hall call: the way the passenger wants to travel.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    HallUp,
    HallDown,
}

impl Call {
    /// The call a passenger makes to get from `origin` to `destination`.
    pub fn between(origin: u8, destination: u8) -> Self {
        if destination > origin { Call::HallUp } else { Call::HallDown }
    }

    pub fn as_string(self) -> String {
        match self {
            Call::HallUp => String::from("UP"),
            Call::HallDown => String::from("DOWN"),
        }
    }

    pub fn iter() -> impl Iterator<Item = Call> {
        [Call::HallUp, Call::HallDown].iter().copied()
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Idle,
    Up,
}

impl Direction {
    pub fn as_string(self) -> String {
        match self {
            Direction::Down => String::from("down"),
            Direction::Idle => String::from("idle"),
            Direction::Up => String::from("up"),
        }
    }

    pub fn to_call(self) -> Option<Call> {
        match self {
            Direction::Up => Some(Call::HallUp),
            Direction::Down => Some(Call::HallDown),
            Direction::Idle => None,
        }
    }

    /// True when a car heading this way passes `floor` before turning,
    /// starting from `current`.
    pub fn has_ahead(self, current: u8, floor: u8) -> bool {
        match self {
            Direction::Up => current <= floor,
            Direction::Down => current >= floor,
            Direction::Idle => false,
        }
    }
}

impl From<Call> for Direction {
    fn from(call: Call) -> Self {
        match call {
            Call::HallUp => Direction::Up,
            Call::HallDown => Direction::Down,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}
