// src/models.rs

use crate::error::{PmError, Result};

/// One row of `monitoring.log`. `insertion_time` is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub logtext: String,
}

impl LogRecord {
    /// Wraps the full stdin text.
    pub fn new(logtext: String) -> Self {
        Self { logtext }
    }
}

/// One row of `monitoring.measure`. `insertion_time` is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    pub name: String,
    pub measurement: String,
    /// Conventionally JSON, stored as given.
    pub dict: String,
}

impl MeasurementRecord {
    /// Splits the input on newlines: line 1 is the name, line 2 the measurement, and the
    /// remaining lines rejoined with '\n' form the dict.
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input.split('\n');
        // split always yields at least one segment
        let name = lines.next().unwrap_or_default();
        let measurement = lines.next().ok_or_else(|| {
            PmError::MalformedInput(
                "expected at least two lines (name, measurement), found no newline".to_string(),
            )
        })?;
        let dict = lines.collect::<Vec<_>>().join("\n");

        Ok(Self {
            name: name.to_string(),
            measurement: measurement.to_string(),
            dict,
        })
    }
}
