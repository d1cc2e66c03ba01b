//! Runtime configuration.
//!
//! Resolved in layers: built-in defaults, then environment variables, then
//! command-line flags.
//!
//! Environment:
//! - `IMESSAGE_DB_PATH` - Messages database (default `~/Library/Messages/chat.db`)
//! - `IMESSAGE_MAX_CONCURRENT` - sends in flight during a bulk send (default 3)
//!
//! CHANGELOG:
//! - 01/12/2026 - Initial implementation

use std::path::PathBuf;

use crate::db::connection::default_db_path;
use crate::error::{DispatchError, Result};

pub const DB_PATH_ENV: &str = "IMESSAGE_DB_PATH";
pub const MAX_CONCURRENT_ENV: &str = "IMESSAGE_MAX_CONCURRENT";

/// Send to 3 recipients at a time unless told otherwise.
pub const DEFAULT_MAX_CONCURRENT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub max_concurrent: usize,
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub db_path: Option<String>,
    pub max_concurrent: Option<usize>,
}

impl Config {
    /// Resolve configuration from the process environment and `overrides`.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), overrides)
    }

    fn resolve(env: impl Fn(&str) -> Option<String>, overrides: &Overrides) -> Result<Self> {
        let db_path = overrides
            .db_path
            .clone()
            .or_else(|| env(DB_PATH_ENV))
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| expand_path(&raw))
            .unwrap_or_else(default_db_path);

        let max_concurrent = match overrides.max_concurrent {
            Some(n) => validate_concurrency(n)?,
            None => match env(MAX_CONCURRENT_ENV) {
                Some(raw) => parse_concurrency(&raw)?,
                None => DEFAULT_MAX_CONCURRENT,
            },
        };

        Ok(Self {
            db_path,
            max_concurrent,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

fn validate_concurrency(n: usize) -> Result<usize> {
    if n == 0 {
        Err(DispatchError::InvalidConcurrency(n))
    } else {
        Ok(n)
    }
}

fn parse_concurrency(raw: &str) -> Result<usize> {
    let n = raw.trim().parse::<usize>().map_err(|_| {
        DispatchError::Config(format!(
            "{} must be a positive integer, got {:?}",
            MAX_CONCURRENT_ENV, raw
        ))
    })?;
    validate_concurrency(n)
}
