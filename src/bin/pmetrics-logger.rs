// src/bin/pmetrics-logger.rs

use pmetrics_cli::cli::{self, LoggerCli};
use pmetrics_cli::{commands, logging};

fn main() {
    logging::init();
    let cli: LoggerCli = cli::parse_or_exit();
    pmetrics_cli::run("pmetrics-logger", &cli.conn, &cli.ignored, commands::handle_log);
}
