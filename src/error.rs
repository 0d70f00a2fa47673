// src/error.rs

use std::error::Error as StdError;
use thiserror::Error;

/// Exit status for connection, configuration, insert and decoding failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status for a failed read of standard input.
pub const EXIT_STDIN: i32 = 2;
/// Exit status for measurement input that lacks the name/measurement lines.
pub const EXIT_MALFORMED: i32 = 3;

#[derive(Debug, Error)]
pub enum PmError {
    #[error("Unable to read from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection to database failed: {}", describe(.0))]
    Connect(#[source] postgres::Error),

    #[error("Insert failed: {}", describe(.0))]
    Insert(#[source] postgres::Error),

    #[error("Stdin is not valid UTF-8: first invalid byte at offset {0}")]
    NotUtf8(usize),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Renders a driver error with its whole cause chain. The driver's own
/// `Display` only names the error kind ("db error").
pub fn describe(err: &postgres::Error) -> String {
    if let Some(db) = err.as_db_error() {
        return format!("{}: {} (SQLSTATE {})", db.severity(), db.message(), db.code().code());
    }
    chain(err)
}

/// Joins an error and every `source()` below it with ": ".
pub fn chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        let text = c.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        cause = c.source();
    }
    out
}

impl PmError {
    /// Process exit status the binaries terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PmError::Stdin(_) => EXIT_STDIN,
            PmError::MalformedInput(_) => EXIT_MALFORMED,
            PmError::Config(_)
            | PmError::Connect(_)
            | PmError::Insert(_)
            | PmError::NotUtf8(_) => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, PmError>;
