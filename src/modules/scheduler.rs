/// ----- SCHEDULER MODULE -----
/// This module is the simulation clock. It owns the fleet, wakes at a fixed
/// period to tick every car, and serves commands from other threads between
/// wakes, so nobody ever observes a car halfway through its tick.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::{bounded, select, tick, unbounded, Receiver, Sender};
use log::{info, warn};

use crate::utilities::car::CarEvent;
use crate::utilities::error::{Error, Result};
use crate::utilities::fleet::Fleet;
use crate::utilities::record::RequestRecord;
use crate::utilities::snapshot::{CarSnapshot, FleetSnapshot};

pub enum Command {
    Submit {
        origin_floor: u8,
        destination_floor: u8,
        party_size: u8,
        reply: Sender<Result<RequestRecord>>,
    },
    Snapshot {
        reply: Sender<Vec<CarSnapshot>>,
    },
    Configure {
        num_floors: u8,
        num_cars: u8,
        reply: Sender<Result<()>>,
    },
    Shutdown,
}

/// Where the loop publishes what happened. Closed receivers are skipped.
#[derive(Default, Clone)]
pub struct Subscribers {
    pub snapshots: Vec<Sender<FleetSnapshot>>,
    pub records: Vec<Sender<RequestRecord>>,
}

/// Cloneable front door to a running scheduling loop.
#[derive(Clone)]
pub struct SimulationHandle {
    command_tx: Sender<Command>,
}

impl SimulationHandle {
    pub fn submit_request(&self, origin_floor: u8, destination_floor: u8, party_size: u8) -> Result<RequestRecord> {
        let (reply, reply_rx) = bounded(1);
        self.send(Command::Submit { origin_floor, destination_floor, party_size, reply })?;
        reply_rx.recv().map_err(|_| Error::SimulationStopped)?
    }

    pub fn snapshot(&self) -> Result<Vec<CarSnapshot>> {
        let (reply, reply_rx) = bounded(1);
        self.send(Command::Snapshot { reply })?;
        reply_rx.recv().map_err(|_| Error::SimulationStopped)
    }

    pub fn configure(&self, num_floors: u8, num_cars: u8) -> Result<()> {
        let (reply, reply_rx) = bounded(1);
        self.send(Command::Configure { num_floors, num_cars, reply })?;
        reply_rx.recv().map_err(|_| Error::SimulationStopped)?
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<()> {
        self.command_tx.send(command).map_err(|_| Error::SimulationStopped)
    }
}

/// Starts the scheduling loop on its own thread. Joining the thread gives
/// the fleet back once the loop has been shut down.
pub fn spawn(
    fleet: Fleet,
    clock_period: Duration,
    subscribers: Subscribers,
) -> io::Result<(SimulationHandle, JoinHandle<Fleet>)> {
    let (command_tx, command_rx) = unbounded();
    let join_handle = thread::Builder::new()
        .name("scheduler".to_string())
        .spawn(move || main(fleet, clock_period, command_rx, subscribers))?;
    Ok((SimulationHandle { command_tx }, join_handle))
}

pub fn main(
    mut fleet: Fleet,
    clock_period: Duration,
    command_rx: Receiver<Command>,
    subscribers: Subscribers,
) -> Fleet {
    let timer = tick(clock_period);
    let start = Instant::now();
    info!(
        "Scheduling loop started: {} cars, {} floors, waking every {:?}",
        fleet.cars().len(),
        fleet.num_floors(),
        clock_period
    );

    loop {
        select! {
            recv(command_rx) -> msg => {
                match msg {
                    Ok(Command::Shutdown) | Err(_) => {
                        info!("Scheduling loop stopped after {:?}", start.elapsed());
                        return fleet;
                    },
                    Ok(command) => handle_command(&mut fleet, command, start.elapsed(), &subscribers),
                }
            },
            recv(timer) -> _ => {
                for event in fleet.tick_all(start.elapsed()) {
                    report(&event);
                }
                let snapshot = FleetSnapshot { num_floors: fleet.num_floors(), cars: fleet.snapshot() };
                for snapshot_tx in &subscribers.snapshots {
                    let _ = snapshot_tx.send(snapshot.clone());
                }
            }
        }
    }
}

fn handle_command(fleet: &mut Fleet, command: Command, now: Duration, subscribers: &Subscribers) {
    match command {
        Command::Submit { origin_floor, destination_floor, party_size, reply } => {
            let result = fleet
                .submit_request(origin_floor, destination_floor, party_size, now)
                .map(|assignment| RequestRecord::new(Local::now(), &assignment));
            match &result {
                Ok(record) => {
                    info!("{}", record);
                    for record_tx in &subscribers.records {
                        let _ = record_tx.send(record.clone());
                    }
                },
                Err(e) => warn!("Rejected request {} -> {}: {}", origin_floor, destination_floor, e),
            }
            // the caller may have stopped waiting
            let _ = reply.send(result);
        },
        Command::Snapshot { reply } => {
            let _ = reply.send(fleet.snapshot());
        },
        Command::Configure { num_floors, num_cars, reply } => {
            let result = fleet.configure(num_floors, num_cars);
            if let Err(e) = &result {
                warn!("Rejected configuration: {}", e);
            }
            let _ = reply.send(result);
        },
        Command::Shutdown => {},
    }
}

fn report(event: &CarEvent) {
    match event {
        CarEvent::PassengerDropped { car_id, floor } => {
            info!("Car {} dropped off a passenger at floor {}", car_id, floor)
        },
        CarEvent::PassengerPickedUp { car_id, floor, destination, party_size } => {
            info!("Car {} picked up {} passenger(s) at floor {} for floor {}", car_id, party_size, floor, destination)
        },
    }
}
