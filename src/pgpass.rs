// src/pgpass.rs

//! Password file lookup, compatible with libpq's `~/.pgpass`.
//!
//! Each line is `hostname:port:database:username:password`. Any of the first
//! four fields may be `*`. A literal `:` or `\` is written `\:` or `\\`.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    host: String,
    port: String,
    database: String,
    user: String,
    password: String,
}

/// Parsed password file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassFile {
    entries: Vec<Entry>,
}

/// Splits one line on unescaped ':' and unescapes the fields.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn matches(pattern: &str, value: &str) -> bool {
    pattern == "*" || pattern == value
}

impl PassFile {
    /// Parses file content; malformed lines are skipped.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|line| {
                // the password ends at the next unescaped ':', as in libpq
                let mut it = split_fields(line).into_iter();
                Some(Entry {
                    host: it.next()?,
                    port: it.next()?,
                    database: it.next()?,
                    user: it.next()?,
                    password: it.next()?,
                })
            })
            .collect();
        Self { entries }
    }

    /// Reads and parses the file at `path`.
    ///
    /// A missing or unreadable file yields `None`. On Unix a file that is
    /// accessible by group or others is ignored, as libpq does.
    pub fn load(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        if !meta.is_file() {
            log::warn!("password file {} is not a plain file, ignoring", path.display());
            return None;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if meta.permissions().mode() & 0o077 != 0 {
                log::warn!(
                    "password file {} has group or world access; permissions should be u=rw (0600) or less",
                    path.display()
                );
                return None;
            }
        }
        match fs::read_to_string(path) {
            Ok(content) => Some(Self::parse(&content)),
            Err(e) => {
                log::warn!("could not read password file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// First password whose entry matches all four keys.
    pub fn lookup(&self, host: &str, port: u16, database: &str, user: &str) -> Option<&str> {
        let port = port.to_string();
        self.entries
            .iter()
            .find(|e| {
                matches(&e.host, host)
                    && matches(&e.port, &port)
                    && matches(&e.database, database)
                    && matches(&e.user, user)
            })
            .map(|e| e.password.as_str())
    }
}

/// Default location of the password file (`~/.pgpass`).
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pgpass"))
}
