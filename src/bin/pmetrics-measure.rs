// src/bin/pmetrics-measure.rs

use pmetrics_cli::cli::{self, MeasureCli};
use pmetrics_cli::{commands, logging};

fn main() {
    logging::init();
    let cli: MeasureCli = cli::parse_or_exit();
    pmetrics_cli::run("pmetrics-measure", &cli.conn, &cli.ignored, commands::handle_measure);
}
