// src/commands.rs

//! The two ingestion pipelines: read stdin, connect, insert one row, close.

use crate::config::ConnConfig;
use crate::db::{Ingest, Session};
use crate::error::Result;
use crate::input;
use crate::models::{LogRecord, MeasurementRecord};
use std::io::Read;

/// Closes the connection on both outcomes, then hands the insert result back.
fn finish<I: Ingest>(sink: I, outcome: Result<u64>) -> Result<u64> {
    let closed = sink.close();
    match outcome {
        Ok(rows) => {
            if let Err(e) = closed {
                // the row is already committed
                log::warn!("row inserted but closing the connection failed: {}", e);
            }
            Ok(rows)
        }
        Err(e) => {
            if let Err(close_err) = closed {
                log::debug!("close after failed insert: {}", close_err);
            }
            Err(e)
        }
    }
}

/// Log path with an injectable connector.
pub fn ingest_log<R, I, C>(reader: R, connect: C) -> Result<u64>
where
    R: Read,
    I: Ingest,
    C: FnOnce() -> Result<I>,
{
    let record = LogRecord::new(input::read_text(reader)?);
    let mut sink = connect()?;
    let outcome = sink.insert_log(&record);
    finish(sink, outcome)
}

/// Measurement path with an injectable connector. The input is validated
/// before any connection is attempted.
pub fn ingest_measurement<R, I, C>(reader: R, connect: C) -> Result<u64>
where
    R: Read,
    I: Ingest,
    C: FnOnce() -> Result<I>,
{
    let text = input::read_text(reader)?;
    let record = MeasurementRecord::parse(&text)?;
    let mut sink = connect()?;
    let outcome = sink.insert_measurement(&record);
    finish(sink, outcome)
}

/// Runs `pmetrics-logger`.
pub fn handle_log<R: Read>(reader: R, config: &ConnConfig) -> Result<()> {
    let rows = ingest_log(reader, || Session::connect(config))?;
    log::debug!("inserted {} row(s) into monitoring.log", rows);
    Ok(())
}

/// Runs `pmetrics-measure`.
pub fn handle_measure<R: Read>(reader: R, config: &ConnConfig) -> Result<()> {
    let rows = ingest_measurement(reader, || Session::connect(config))?;
    log::debug!("inserted {} row(s) into monitoring.measure", rows);
    Ok(())
}
