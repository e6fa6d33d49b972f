/// ----- DEBUG MODULE -----
/// Live status table on stdout. Redrawn in place every time the scheduling
/// loop publishes a snapshot.

use std::collections::VecDeque;
use std::io::{self, stdout, Stdout, Write};

use crossbeam_channel::{select, Receiver};
use crossterm::{cursor, terminal, ExecutableCommand};
use log::error;

use crate::utilities::record::RequestRecord;
use crate::utilities::snapshot::{hall_calls, FleetSnapshot};

const RECENT_REQUESTS: usize = 5;
const FLOOR_SEPARATOR: &str = "+------------+------------+------------+";
const CAR_SEPARATOR: &str = "+------------+------------+------------+------------+--------------------------+";

pub struct Debug {
    stdout: Stdout,
    printed_lines: u16,
    snapshot: Option<FleetSnapshot>,
    recent: VecDeque<RequestRecord>,
}

impl Debug {
    pub fn new() -> Self {
        Debug {
            stdout: stdout(),
            printed_lines: 0,
            snapshot: None,
            recent: VecDeque::with_capacity(RECENT_REQUESTS),
        }
    }

    pub fn update_snapshot(&mut self, snapshot: FleetSnapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn push_record(&mut self, record: RequestRecord) {
        if self.recent.len() == RECENT_REQUESTS {
            self.recent.pop_front();
        }
        self.recent.push_back(record);
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(snapshot) = &self.snapshot {
            lines.push(FLOOR_SEPARATOR.to_string());
            lines.push(format!("| {0:<10} | {1:<10} | {2:<10} |", "FLOOR", "HALL UP", "HALL DOWN"));
            let calls = hall_calls(&snapshot.cars, snapshot.num_floors);
            for (floor, row) in calls.iter().enumerate().rev() {
                lines.push(FLOOR_SEPARATOR.to_string());
                lines.push(format!("| {0:<10} | {1:<10} | {2:<10} |", floor, row[0], row[1]));
            }
            lines.push(FLOOR_SEPARATOR.to_string());
            lines.push(String::new());

            lines.push(CAR_SEPARATOR.to_string());
            lines.push(format!(
                "| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<24} |",
                "CAR", "FLOOR", "DIRECTION", "LOAD", "DROPS"
            ));
            for car in &snapshot.cars {
                let drops = car
                    .pending_drops
                    .iter()
                    .map(|floor| floor.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                lines.push(CAR_SEPARATOR.to_string());
                lines.push(format!(
                    "| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<24} |",
                    car.car_id,
                    car.floor,
                    car.direction.as_string(),
                    car.load,
                    drops
                ));
            }
            lines.push(CAR_SEPARATOR.to_string());
            lines.push(String::new());
        }

        lines.push("RECENT REQUESTS".to_string());
        lines.extend(self.recent.iter().map(|record| record.to_string()));
        lines
    }

    pub fn print_status(&mut self) -> io::Result<()> {
        if self.printed_lines > 0 {
            self.stdout.execute(cursor::MoveUp(self.printed_lines))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        let lines = self.render();
        for line in &lines {
            writeln!(self.stdout, "{}", line)?;
        }
        self.stdout.flush()?;
        self.printed_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        Ok(())
    }
}

impl Default for Debug {
    fn default() -> Self {
        Debug::new()
    }
}

pub fn main(snapshot_rx: Receiver<FleetSnapshot>, record_rx: Receiver<RequestRecord>) {
    let mut debug = Debug::new();

    loop {
        select! {
            recv(snapshot_rx) -> msg => {
                match msg {
                    Ok(snapshot) => debug.update_snapshot(snapshot),
                    Err(_) => return,
                }
            },
            recv(record_rx) -> msg => {
                match msg {
                    Ok(record) => debug.push_record(record),
                    Err(_) => return,
                }
            }
        }

        if let Err(e) = debug.print_status() {
            error!("Could not draw status table: {}", e);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Local;

    use super::*;
    use crate::utilities::dispatcher::Assignment;
    use crate::utilities::fleet::Fleet;
    use crate::utilities::request::Request;

    fn record(car_id: usize, origin: u8, destination: u8) -> RequestRecord {
        let assignment = Assignment {
            car_id,
            request: Request::new(origin, destination, 1, Duration::ZERO, 10).unwrap(),
        };
        RequestRecord::new(Local::now(), &assignment)
    }

    #[test]
    fn table_lists_floors_top_down_and_every_car() {
        let mut fleet = Fleet::new(3, 2, Duration::from_secs(1)).unwrap();
        fleet.submit_request(1, 2, 1, Duration::ZERO).unwrap();

        let mut debug = Debug::new();
        debug.update_snapshot(FleetSnapshot { num_floors: 3, cars: fleet.snapshot() });
        let lines = debug.render();

        assert!(lines[3].starts_with("| 2 "));
        assert_eq!(lines[5], format!("| {0:<10} | {1:<10} | {2:<10} |", 1, true, false));
        assert!(lines[7].starts_with("| 0 "));
        assert_eq!(lines.iter().filter(|line| line.contains("idle")).count(), 2);
        assert_eq!(lines.last().map(String::as_str), Some("RECENT REQUESTS"));
    }

    #[test]
    fn keeps_only_the_latest_requests() {
        let mut debug = Debug::new();
        for origin in 0..7 {
            debug.push_record(record(0, origin, 9));
        }
        let lines = debug.render();
        assert_eq!(lines.len(), 1 + RECENT_REQUESTS);
        assert!(lines[1].contains("From F2 to F9"));
        assert!(lines[5].contains("From F6 to F9"));
    }
}
