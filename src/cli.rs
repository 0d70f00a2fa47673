// src/cli.rs

use crate::error::EXIT_FAILURE;
use clap::{Args, Parser};

/// Connection settings. Every flag is optional and falls back to the
/// standard libpq environment variable, so the programs normally run with
/// no arguments at all.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnArgs {
    #[arg(long, env = "PGHOST", help = "Server host name, or a directory for a Unix socket")]
    pub host: Option<String>,

    #[arg(long, env = "PGHOSTADDR", help = "Server IP address, skips the DNS lookup")]
    pub hostaddr: Option<String>,

    #[arg(long, env = "PGPORT", help = "Server port (default: 5432)")]
    pub port: Option<String>,

    #[arg(long, env = "PGUSER", help = "Role to connect as (default: the OS user)")]
    pub user: Option<String>,

    #[arg(long, env = "PGDATABASE", help = "Database name (default: the role name)")]
    pub dbname: Option<String>,

    #[arg(long, env = "PGPASSWORD", hide_env_values = true, help = "Password; prefer a password file")]
    pub password: Option<String>,

    #[arg(long, env = "PGPASSFILE", help = "Password file (default: ~/.pgpass)")]
    pub passfile: Option<String>,

    #[arg(long, env = "INSTANCE_UNIX_SOCKET", help = "Unix socket directory; overrides --host")]
    pub socket: Option<String>,

    #[arg(long, env = "PGAPPNAME", help = "application_name reported to the server")]
    pub application_name: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "pmetrics-logger",
    version,
    about = "Insert all of stdin as one row of monitoring.log",
    long_about = "Reads standard input to end-of-stream and inserts it, unparsed, as the logtext of one \
                  monitoring.log row. Suitable as an rsyslog pipe target:\n\n    *.*   ^/usr/local/bin/pmetrics-logger"
)]
pub struct LoggerCli {
    #[command(flatten)]
    pub conn: ConnArgs,

    /// Pipe actions (rsyslog `^program`) pass the message as arguments; stdin is what gets stored.
    #[arg(hide = true, trailing_var_arg = true)]
    pub ignored: Vec<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "pmetrics-measure",
    version,
    about = "Insert a measurement read from stdin into monitoring.measure",
    long_about = "Reads standard input to end-of-stream and inserts one monitoring.measure row. \
                  Line 1 is the name, line 2 the measurement, and all remaining lines \
                  (conventionally a JSON object) become the dict column."
)]
pub struct MeasureCli {
    #[command(flatten)]
    pub conn: ConnArgs,

    /// Pipe actions (rsyslog `^program`) pass the message as arguments; stdin is what gets stored.
    #[arg(hide = true, trailing_var_arg = true)]
    pub ignored: Vec<String>,
}

/// Parses the command line. Help and version exit 0; usage errors exit 1 so
/// that status 2 stays reserved for stdin read failures.
pub fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_FAILURE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definitions_are_consistent() {
        LoggerCli::command().debug_assert();
        MeasureCli::command().debug_assert();
    }

    #[test]
    fn flags_override_environment() {
        let cli = MeasureCli::try_parse_from([
            "pmetrics-measure",
            "--host",
            "db.internal",
            "--port",
            "6432",
            "--user",
            "collector",
        ])
        .unwrap();
        assert_eq!(cli.conn.host.as_deref(), Some("db.internal"));
        assert_eq!(cli.conn.port.as_deref(), Some("6432"));
        assert_eq!(cli.conn.user.as_deref(), Some("collector"));
    }

    #[test]
    fn positional_arguments_are_ignored() {
        let cli =
            LoggerCli::try_parse_from(["pmetrics-logger", "Oct 16 host msg", "--not-a-flag"])
                .unwrap();
        assert_eq!(cli.ignored, vec!["Oct 16 host msg", "--not-a-flag"]);
        let cli =
            MeasureCli::try_parse_from(["pmetrics-measure", "--port", "6432", "extra"]).unwrap();
        assert_eq!(cli.conn.port.as_deref(), Some("6432"));
        assert_eq!(cli.ignored, vec!["extra"]);
    }

    #[test]
    fn unknown_flags_are_still_errors() {
        assert!(LoggerCli::try_parse_from(["pmetrics-logger", "--bogus"]).is_err());
    }
}
