//! Pipe standard input into PostgreSQL.
//!
//! `pmetrics-logger` stores all of stdin as one `monitoring.log` row;
//! `pmetrics-measure` splits stdin into name, measurement and dict and
//! stores one `monitoring.measure` row.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod pgpass;

use cli::ConnArgs;
use config::{Ambient, ConnConfig};
use error::Result;

/// Shared entry flow: resolve the configuration from the parsed flags, run
/// the pipeline, and terminate with the error's exit status on failure.
pub fn run(
    app: &str,
    conn: &ConnArgs,
    ignored: &[String],
    pipeline: fn(std::io::StdinLock<'static>, &ConnConfig) -> Result<()>,
) {
    if !ignored.is_empty() {
        log::debug!("ignoring {} command-line argument(s); input is read from stdin", ignored.len());
    }
    let result = ConnConfig::resolve(conn, &Ambient::from_env(), app)
        .and_then(|config| pipeline(std::io::stdin().lock(), &config));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
