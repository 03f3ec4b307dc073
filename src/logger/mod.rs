//! # Logger Module
//!
//! Append-only CSV persistence of readings.
//!
//! The destination file is created with a fixed header row on first use and
//! only ever appended to afterwards. The file handle is acquired per call
//! and dropped as soon as the row is flushed, so no handle is held across
//! the inter-cycle sleep and a concurrent reader never observes a partial
//! row.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::sensors::SensorReading;

/// Fixed header row, one column per reading field in record order
pub const CSV_HEADER: [&str; 7] = [
    "Timestamp",
    "Temperature (C)",
    "Humidity (%)",
    "Pressure (hPa)",
    "Compass X",
    "Compass Y",
    "Compass Z",
];

/// Append-only CSV logger
///
/// Holds only the destination path; see the module docs for the handle
/// lifetime discipline.
#[derive(Debug, Clone)]
pub struct CsvLogger {
    path: PathBuf,
}

impl CsvLogger {
    /// Create a logger for the given destination path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Destination path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header row if the destination is empty
    ///
    /// Creates the file when absent. Idempotent across repeated process
    /// starts: the current file length decides whether the header is
    /// written, so an existing log is never rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SensorRelayError::Io`] or
    /// [`crate::error::SensorRelayError::Persistence`] if the file cannot
    /// be created or written
    pub fn ensure_header(&self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if file.metadata()?.len() == 0 {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file);
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
            debug!("wrote log header to {}", self.path.display());
        }

        Ok(())
    }

    /// Append exactly one row for the given reading
    ///
    /// The row reflects the reading's seven fields in header column order
    /// and is flushed before this returns; there is no fallback persistence
    /// path, so failures propagate rather than dropping data silently.
    ///
    /// # Arguments
    ///
    /// * `reading` - The reading to persist
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SensorRelayError::Io`] or
    /// [`crate::error::SensorRelayError::Persistence`] if the row cannot
    /// be written
    pub fn append(&self, reading: &SensorReading) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(reading)?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_reading() -> SensorReading {
        SensorReading {
            timestamp: "2025-03-01 12:00:00".to_string(),
            temperature_c: 21.5,
            humidity_pct: 40.2,
            pressure_hpa: 1013.25,
            compass_x: 0,
            compass_y: 0,
            compass_z: 0,
        }
    }

    #[test]
    fn test_ensure_header_creates_file_with_header() {
        let dir = tempdir().unwrap();
        let logger = CsvLogger::new(dir.path().join("sensor_data.csv"));

        logger.ensure_header().unwrap();

        let contents = fs::read_to_string(logger.path()).unwrap();
        assert_eq!(
            contents,
            "Timestamp,Temperature (C),Humidity (%),Pressure (hPa),Compass X,Compass Y,Compass Z\n"
        );
    }

    #[test]
    fn test_ensure_header_is_idempotent() {
        let dir = tempdir().unwrap();
        let logger = CsvLogger::new(dir.path().join("sensor_data.csv"));

        logger.ensure_header().unwrap();
        logger.ensure_header().unwrap();

        let contents = fs::read_to_string(logger.path()).unwrap();
        assert_eq!(contents.lines().count(), 1, "header must be written exactly once");
    }

    #[test]
    fn test_ensure_header_skips_non_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sensor_data.csv");
        fs::write(&path, "pre-existing content\n").unwrap();

        let logger = CsvLogger::new(&path);
        logger.ensure_header().unwrap();
        logger.ensure_header().unwrap();

        // Never rewritten, never re-headered
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "pre-existing content\n");
    }

    #[test]
    fn test_append_writes_row_in_column_order() {
        let dir = tempdir().unwrap();
        let logger = CsvLogger::new(dir.path().join("sensor_data.csv"));

        logger.ensure_header().unwrap();
        logger.append(&sample_reading()).unwrap();

        let contents = fs::read_to_string(logger.path()).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert_eq!(row, "2025-03-01 12:00:00,21.5,40.2,1013.25,0,0,0");
    }

    #[test]
    fn test_append_preserves_existing_rows() {
        let dir = tempdir().unwrap();
        let logger = CsvLogger::new(dir.path().join("sensor_data.csv"));
        logger.ensure_header().unwrap();

        let mut second = sample_reading();
        second.timestamp = "2025-03-01 12:00:01".to_string();
        second.compass_x = -120;
        second.compass_y = 45;
        second.compass_z = 32767;

        logger.append(&sample_reading()).unwrap();
        logger.append(&second).unwrap();

        let contents = fs::read_to_string(logger.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2025-03-01 12:00:00,21.5,40.2,1013.25,0,0,0");
        assert_eq!(lines[2], "2025-03-01 12:00:01,21.5,40.2,1013.25,-120,45,32767");
    }

    #[test]
    fn test_append_failure_propagates() {
        // A directory path cannot be opened for append
        let dir = tempdir().unwrap();
        let logger = CsvLogger::new(dir.path());

        assert!(logger.append(&sample_reading()).is_err());
    }

    #[test]
    fn test_header_matches_reading_field_count() {
        assert_eq!(CSV_HEADER.len(), 7);
    }
}
