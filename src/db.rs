// src/db.rs

use crate::config::ConnConfig;
use crate::error::{PmError, Result};
use crate::models::{LogRecord, MeasurementRecord};
use postgres::{Client, NoTls};

pub const INSERT_LOG: &str =
    "INSERT INTO monitoring.log (insertion_time, logtext) VALUES (now(), $1)";

pub const INSERT_MEASUREMENT: &str =
    "INSERT INTO monitoring.measure (insertion_time, name, measurement, dict) VALUES (now(), $1, $2, $3)";

/// Insert executors. Each call is one auto-committed statement and returns
/// the number of rows written.
pub trait Ingest {
    fn insert_log(&mut self, record: &LogRecord) -> Result<u64>;
    fn insert_measurement(&mut self, record: &MeasurementRecord) -> Result<u64>;

    /// Releases the connection. Called exactly once, on success and failure alike.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// An open connection, owned by the calling program for its whole run.
pub struct Session {
    client: Client,
}

impl Session {
    /// Opens a connection. Nothing is retried.
    pub fn connect(config: &ConnConfig) -> Result<Self> {
        log::debug!(
            "connecting to {} port {} as {} (database {})",
            config.endpoint,
            config.port,
            config.user,
            config.dbname
        );
        let client = config.to_postgres().connect(NoTls).map_err(PmError::Connect)?;
        Ok(Self { client })
    }
}

impl Ingest for Session {
    fn insert_log(&mut self, record: &LogRecord) -> Result<u64> {
        self.client
            .execute(INSERT_LOG, &[&record.logtext])
            .map_err(PmError::Insert)
    }

    fn insert_measurement(&mut self, record: &MeasurementRecord) -> Result<u64> {
        self.client
            .execute(
                INSERT_MEASUREMENT,
                &[&record.name, &record.measurement, &record.dict],
            )
            .map_err(PmError::Insert)
    }

    fn close(self) -> Result<()> {
        self.client.close().map_err(PmError::Connect)
    }
}
