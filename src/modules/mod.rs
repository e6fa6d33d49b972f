pub mod audit;
pub mod debug;
pub mod input;
pub mod scheduler;

use std::io::stdin;
use std::thread;

use crossbeam_channel::unbounded;
use log::info;

use crate::utilities::config::Config;
use crate::utilities::error::{Error, Result};
use crate::utilities::fleet::Fleet;

use self::scheduler::Subscribers;

/// Starts every thread the simulator needs and reads commands from stdin
/// until the user quits.
pub fn run(config: Config) -> Result<()> {
    let fleet = Fleet::new(
        config.simulation.num_floors,
        config.simulation.num_cars,
        config.timing.car_tick_interval(),
    )?;
    let mut subscribers = Subscribers::default();

    // INITIALIZE THREAD FOR AUDIT LOG
    let (audit_tx, audit_rx) = unbounded();
    subscribers.records.push(audit_tx);
    let audit_path = config.audit.log_file.clone();
    let audit = thread::Builder::new()
        .name("audit".to_string())
        .spawn(move || audit::main(audit_path, audit_rx))?;

    // INITIALIZE THREAD FOR STATUS DISPLAY
    if config.debug.status_display {
        let (snapshot_tx, snapshot_rx) = unbounded();
        let (display_tx, display_rx) = unbounded();
        subscribers.snapshots.push(snapshot_tx);
        subscribers.records.push(display_tx);
        thread::Builder::new()
            .name("debug".to_string())
            .spawn(move || debug::main(snapshot_rx, display_rx))?;
    }

    // INITIALIZE THREAD FOR SCHEDULING LOOP
    let (handle, scheduler) = scheduler::spawn(fleet, config.timing.clock_period(), subscribers)?;

    // the status table owns the terminal, so rejections are echoed to stderr
    let result = input::main(&handle, stdin().lock(), config.debug.status_display);

    // Stopping the loop drops its senders, which ends the other threads.
    let _ = handle.shutdown();
    let fleet = scheduler.join().map_err(|_| Error::SimulationStopped)?;
    let _ = audit.join();
    info!(
        "Simulation finished with {} car(s) {}",
        fleet.cars().len(),
        if fleet.is_idle() { "idle" } else { "still busy" }
    );
    result
}
