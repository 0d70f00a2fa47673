#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};

/// A command with every connection variable cleared and pointed at a
/// local port nothing listens on.
fn isolated(mut cmd: Command) -> Command {
    for var in [
        "PGHOST",
        "PGHOSTADDR",
        "PGPORT",
        "PGUSER",
        "PGDATABASE",
        "PGPASSWORD",
        "PGPASSFILE",
        "PGAPPNAME",
        "INSTANCE_UNIX_SOCKET",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("PGHOST", "127.0.0.1")
        .env("PGPORT", "1")
        .env("PGUSER", "pmetrics")
        .env("PGPASSFILE", std::env::temp_dir().join("pmetrics-no-such-pgpass"));
    cmd
}

pub fn logger() -> Command {
    isolated(cargo_bin_cmd!("pmetrics-logger"))
}

pub fn measure() -> Command {
    isolated(cargo_bin_cmd!("pmetrics-measure"))
}

/// Same binaries, but inheriting the caller's PG* environment.
pub fn logger_live() -> Command {
    cargo_bin_cmd!("pmetrics-logger")
}

pub fn measure_live() -> Command {
    cargo_bin_cmd!("pmetrics-measure")
}
