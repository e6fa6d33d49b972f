/// ----- INPUT MODULE -----
/// Reads commands line by line and forwards them to the scheduling loop.
///
/// ```text
/// <from> <to> [passengers]   submit a request, one passenger by default
/// configure <floors> <cars>  rebuild the bank, only before the first request
/// status                     log the current snapshot as JSON
/// quit                       stop the simulation
/// ```

use std::io::BufRead;

use log::{error, info, warn};

use crate::modules::scheduler::SimulationHandle;
use crate::utilities::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Submit { origin_floor: u8, destination_floor: u8, party_size: u8 },
    Configure { num_floors: u8, num_cars: u8 },
    Status,
    Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<InputCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["quit"] | ["exit"] => Ok(InputCommand::Quit),
        ["status"] => Ok(InputCommand::Status),
        ["configure", floors, cars] => Ok(InputCommand::Configure {
            num_floors: parse_number(floors, "floors")?,
            num_cars: parse_number(cars, "cars")?,
        }),
        [from, to] => Ok(InputCommand::Submit {
            origin_floor: parse_number(from, "from")?,
            destination_floor: parse_number(to, "to")?,
            party_size: 1,
        }),
        [from, to, passengers] => Ok(InputCommand::Submit {
            origin_floor: parse_number(from, "from")?,
            destination_floor: parse_number(to, "to")?,
            party_size: parse_number(passengers, "passengers")?,
        }),
        _ => Err(format!("unrecognised command '{}'", line.trim())),
    }
}

fn parse_number(word: &str, field: &str) -> std::result::Result<u8, String> {
    word.parse::<u8>()
        .map_err(|_| format!("'{}' is not a valid value for {}", word, field))
}

/// Runs until `quit`, end of input or the loop going away. With `echo`
/// rejected lines are also printed to stderr, for when the log only goes to
/// its file.
pub fn main<R: BufRead>(handle: &SimulationHandle, input: R, echo: bool) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(reason) => {
                warn!("{}", reason);
                if echo {
                    eprintln!("{}", reason);
                }
                continue;
            }
        };

        let rejected = match command {
            InputCommand::Submit { origin_floor, destination_floor, party_size } => {
                rejection(handle.submit_request(origin_floor, destination_floor, party_size))?
            },
            InputCommand::Configure { num_floors, num_cars } => rejection(handle.configure(num_floors, num_cars))?,
            InputCommand::Status => {
                let snapshot = handle.snapshot()?;
                match serde_json::to_string(&snapshot) {
                    Ok(json) => info!("Status: {}", json),
                    Err(e) => error!("Could not serialize snapshot: {}", e),
                }
                None
            },
            InputCommand::Quit => {
                info!("STOPPING PROGRAM...");
                return Ok(());
            },
        };

        // the loop has already logged it
        if let (Some(e), true) = (rejected, echo) {
            eprintln!("Rejected '{}': {}", line.trim(), e);
        }
    }
    Ok(())
}

/// A stopped loop ends the input, any other error is a rejection to report.
fn rejection<T>(result: Result<T>) -> Result<Option<Error>> {
    match result {
        Ok(_) => Ok(None),
        Err(Error::SimulationStopped) => Err(Error::SimulationStopped),
        Err(e) => Ok(Some(e)),
    }
}
