//! Connection configuration
//!
//! Resolved once at startup and handed to [`ConnectionFactory::new`].
//! Sources, in order of use:
//! - `DbConfig::from_env()`: `.env` in the current directory, then the
//!   process environment (`DATABASE_URL`, `ORGSTORE_PROCEDURE_TIMEOUT_SECS`)
//! - `DbConfig::load(path)`: a TOML file with a `[database]` table
//!
//! ```toml
//! [database]
//! url = "postgres://localhost/orgstore"
//! procedure_timeout_secs = 60
//! ```
//!
//! [`ConnectionFactory::new`]: crate::ConnectionFactory::new

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::db::DEFAULT_PROCEDURE_TIMEOUT;
use crate::error::{RepoError, RepoResult};

/// Environment variable holding the connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable overriding the stored-procedure bound
pub const PROCEDURE_TIMEOUT_VAR: &str = "ORGSTORE_PROCEDURE_TIMEOUT_SECS";

const DEFAULT_PROCEDURE_TIMEOUT_SECS: u64 = DEFAULT_PROCEDURE_TIMEOUT.as_secs();

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    /// Bound applied to stored-procedure calls
    pub procedure_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    database: DatabaseSection,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    url: String,
    #[serde(default = "default_procedure_timeout_secs")]
    procedure_timeout_secs: u64,
}

fn default_procedure_timeout_secs() -> u64 {
    DEFAULT_PROCEDURE_TIMEOUT_SECS
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            procedure_timeout: Duration::from_secs(DEFAULT_PROCEDURE_TIMEOUT_SECS),
        }
    }

    pub fn with_procedure_timeout(mut self, timeout: Duration) -> Self {
        self.procedure_timeout = timeout;
        self
    }

    /// Load from `.env` (if present) and the process environment.
    pub fn from_env() -> RepoResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded .env from {}", path.display()),
            Err(e) => debug!("No .env loaded: {}", e),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> RepoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| RepoError::config(format!("{} is not set", DATABASE_URL_VAR)))?;

        let secs = match lookup(PROCEDURE_TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                RepoError::config(format!("invalid {} '{}': {}", PROCEDURE_TIMEOUT_VAR, raw, e))
            })?,
            None => DEFAULT_PROCEDURE_TIMEOUT_SECS,
        };

        Ok(Self::new(url).with_procedure_timeout(Duration::from_secs(secs)))
    }

    /// Parse the `[database]` table of a TOML document.
    pub fn from_toml_str(raw: &str) -> RepoResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| RepoError::config(format!("invalid config: {}", e)))?;

        if file.database.url.trim().is_empty() {
            return Err(RepoError::config("database.url is empty"));
        }

        Ok(Self::new(file.database.url)
            .with_procedure_timeout(Duration::from_secs(file.database.procedure_timeout_secs)))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RepoError::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        debug!("Loaded database config from {}", path.display());
        Self::from_toml_str(&raw)
    }
}
