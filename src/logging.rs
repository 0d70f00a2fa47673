// src/logging.rs

use chrono::{SecondsFormat, Utc};
use env_logger::Env;
use std::io::Write;

/// Environment variable holding the log filter, e.g. `PMETRICS_LOG=debug`.
pub const LOG_ENV: &str = "PMETRICS_LOG";

/// Initializes stderr logging as `<UTC time> <LEVEL> <target>: <message>`.
/// Defaults to `warn` so a normal run stays quiet.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}
