// src/config.rs

//! Explicit connection configuration.
//!
//! Everything the database helper needs is resolved here, once, at the
//! program entry point. `db` never reads the environment itself.

use crate::cli::ConnArgs;
use crate::error::{PmError, Result};
use crate::pgpass::{self, PassFile};
use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

/// Socket directories libpq builds default to, most common first.
pub const DEFAULT_SOCKET_DIRS: [&str; 2] = ["/var/run/postgresql", "/tmp"];

/// Process-level facts used as fallbacks when no flag or PG* variable is set.
#[derive(Debug, Clone, Default)]
pub struct Ambient {
    pub os_user: Option<String>,
    pub default_passfile: Option<PathBuf>,
    /// Socket directory to use when neither host nor address is configured.
    pub socket_dir: Option<String>,
}

/// First default directory that holds a PostgreSQL socket, if any.
fn find_socket_dir() -> Option<String> {
    DEFAULT_SOCKET_DIRS
        .iter()
        .find(|dir| {
            std::fs::read_dir(dir)
                .map(|entries| {
                    entries
                        .flatten()
                        .any(|e| e.file_name().to_string_lossy().starts_with(".s.PGSQL."))
                })
                .unwrap_or(false)
        })
        .map(|dir| dir.to_string())
}

impl Ambient {
    /// Collects the OS user, the `~/.pgpass` location and the local socket directory.
    pub fn from_env() -> Self {
        let os_user = std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .ok()
            .filter(|u| !u.is_empty());
        Self {
            os_user,
            default_passfile: pgpass::default_path(),
            socket_dir: find_socket_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Tcp { host: String, hostaddr: Option<IpAddr> },
    /// Only an address was given; no host name to verify or look up.
    Addr(IpAddr),
    /// Directory containing the server's Unix socket.
    Socket(String),
}

impl Endpoint {
    /// Host name used for password-file matching.
    fn passfile_host(&self) -> String {
        match self {
            Endpoint::Tcp { host, .. } => host.clone(),
            Endpoint::Addr(addr) => addr.to_string(),
            Endpoint::Socket(_) => DEFAULT_HOST.to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp { host, hostaddr: Some(addr) } => write!(f, "{} ({})", host, addr),
            Endpoint::Tcp { host, hostaddr: None } => f.write_str(host),
            Endpoint::Addr(addr) => write!(f, "{}", addr),
            Endpoint::Socket(dir) => write!(f, "socket {}", dir),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ConnConfig {
    pub endpoint: Endpoint,
    pub port: u16,
    pub user: String,
    pub dbname: String,
    pub password: Option<String>,
    pub application_name: String,
}

impl fmt::Debug for ConnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnConfig")
            .field("endpoint", &self.endpoint.to_string())
            .field("port", &self.port)
            .field("user", &self.user)
            .field("dbname", &self.dbname)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("application_name", &self.application_name)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ConnConfig {
    /// Builds the configuration from parsed flags and ambient fallbacks.
    /// `app` is the application name used when none is configured.
    pub fn resolve(args: &ConnArgs, ambient: &Ambient, app: &str) -> Result<Self> {
        let port = match non_empty(&args.port) {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| PmError::Config(format!("invalid port: {:?}", p)))?,
            None => DEFAULT_PORT,
        };

        let hostaddr = non_empty(&args.hostaddr)
            .map(|a| {
                a.parse::<IpAddr>()
                    .map_err(|_| PmError::Config(format!("invalid host address: {:?}", a)))
            })
            .transpose()?;

        let endpoint = match (non_empty(&args.socket), non_empty(&args.host), hostaddr) {
            (Some(dir), _, _) => Endpoint::Socket(dir.to_string()),
            (None, Some(host), hostaddr) if host.starts_with('/') => {
                if hostaddr.is_some() {
                    log::warn!("ignoring host address for Unix socket host {}", host);
                }
                Endpoint::Socket(host.to_string())
            }
            (None, Some(host), hostaddr) => Endpoint::Tcp {
                host: host.to_string(),
                hostaddr,
            },
            (None, None, Some(addr)) => Endpoint::Addr(addr),
            (None, None, None) if cfg!(unix) => Endpoint::Socket(
                ambient
                    .socket_dir
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SOCKET_DIRS[0].to_string()),
            ),
            (None, None, None) => Endpoint::Tcp {
                host: DEFAULT_HOST.to_string(),
                hostaddr: None,
            },
        };

        let user = non_empty(&args.user)
            .map(str::to_string)
            .or_else(|| ambient.os_user.clone())
            .ok_or_else(|| {
                PmError::Config("no user given and the OS user name is unknown; set PGUSER".to_string())
            })?;

        let dbname = non_empty(&args.dbname)
            .map(str::to_string)
            .unwrap_or_else(|| user.clone());

        let application_name = non_empty(&args.application_name)
            .unwrap_or(app)
            .to_string();

        let mut config = Self {
            endpoint,
            port,
            user,
            dbname,
            password: args.password.clone().filter(|p| !p.is_empty()),
            application_name,
        };

        if config.password.is_none() {
            let passfile = non_empty(&args.passfile)
                .map(PathBuf::from)
                .or_else(|| ambient.default_passfile.clone());
            if let Some(path) = passfile {
                config.password = config.password_from_file(&path);
            }
        }

        Ok(config)
    }

    fn password_from_file(&self, path: &std::path::Path) -> Option<String> {
        let file = PassFile::load(path)?;
        let found = file
            .lookup(&self.endpoint.passfile_host(), self.port, &self.dbname, &self.user)
            .map(str::to_string);
        if found.is_some() {
            log::debug!("using password from {}", path.display());
        }
        found
    }

    /// Translates into the driver's configuration.
    pub fn to_postgres(&self) -> postgres::Config {
        let mut pg = postgres::Config::new();
        match &self.endpoint {
            Endpoint::Tcp { host, hostaddr } => {
                pg.host(host);
                if let Some(addr) = hostaddr {
                    pg.hostaddr(*addr);
                }
            }
            Endpoint::Addr(addr) => {
                pg.hostaddr(*addr);
            }
            Endpoint::Socket(dir) => {
                pg.host(dir);
            }
        }
        pg.port(self.port)
            .user(&self.user)
            .dbname(&self.dbname)
            .application_name(&self.application_name);
        if let Some(pw) = &self.password {
            pg.password(pw);
        }
        pg
    }
}
