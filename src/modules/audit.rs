/// ----- AUDIT MODULE -----
/// Appends every accepted request to a CSV file. The header row is written
/// only when the file is new or empty, so runs accumulate in one log.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crossbeam_channel::Receiver;
use log::{error, info};

use crate::utilities::error::Result;
use crate::utilities::record::RequestRecord;

pub struct AuditLog {
    writer: csv::Writer<File>,
}

impl AuditLog {
    pub fn open(path: &Path) -> Result<Self> {
        let needs_header = fs::metadata(path).map(|meta| meta.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer.write_record(RequestRecord::headers())?;
            writer.flush()?;
        }
        Ok(AuditLog { writer })
    }

    /// Writes one row and flushes it straight away.
    pub fn append(&mut self, record: &RequestRecord) -> Result<()> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn main(path: PathBuf, record_rx: Receiver<RequestRecord>) {
    let mut audit_log = match AuditLog::open(&path) {
        Ok(audit_log) => audit_log,
        Err(e) => {
            error!("Could not open audit log '{}': {}", path.display(), e);
            return;
        }
    };
    info!("Appending accepted requests to '{}'", path.display());

    for record in record_rx {
        if let Err(e) = audit_log.append(&record) {
            error!("Failed to write audit record: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{Local, TimeZone};

    use super::*;
    use crate::utilities::dispatcher::Assignment;
    use crate::utilities::request::Request;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lift_simulator_{}_{}.csv", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    fn record(origin: u8, destination: u8, car_id: usize) -> RequestRecord {
        let assignment = Assignment { car_id, request: Request::new(origin, destination, 2, Duration::ZERO, 10).unwrap() };
        RequestRecord::new(Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(), &assignment)
    }

    #[test]
    fn header_written_once_across_reopens() {
        let path = scratch_file("reopen");

        let mut audit_log = AuditLog::open(&path).unwrap();
        audit_log.append(&record(3, 7, 0)).unwrap();
        drop(audit_log);
        let mut audit_log = AuditLog::open(&path).unwrap();
        audit_log.append(&record(8, 1, 1)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Timestamp,From,To,Direction,Lift,Passengers\n\
             2024-01-02 03:04:05,3,7,UP,0,2\n\
             2024-01-02 03:04:05,8,1,DOWN,1,2\n"
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_file_gets_a_header() {
        let path = scratch_file("empty");
        File::create(&path).unwrap();

        AuditLog::open(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Timestamp,From,To,Direction,Lift,Passengers\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn worker_drains_the_channel() {
        let path = scratch_file("worker");
        let (record_tx, record_rx) = crossbeam_channel::unbounded();
        record_tx.send(record(0, 5, 1)).unwrap();
        drop(record_tx);

        main(path.clone(), record_rx);
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.ends_with("0,5,UP,1,2\n"));
        fs::remove_file(&path).unwrap();
    }
}
