//! Error types for orgstore-db
//!
//! Three kinds reach the caller: connection, query and timeout. A lookup
//! that matches nothing is `Ok(None)`, never an error.

use std::time::Duration;

use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Coarse classification the boundary layer maps onto responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Query,
    Timeout,
}

#[derive(Error, Debug)]
pub enum RepoError {
    /// Could not open or keep using a connection (includes a missing or
    /// malformed connection string)
    #[error("Connection error: {source}")]
    Connection {
        #[source]
        source: sqlx::Error,
    },

    /// Statement was rejected or its rows could not be decoded
    #[error("Query error: {source}")]
    Query {
        #[source]
        source: sqlx::Error,
    },

    /// Stored-procedure call exceeded its bound
    #[error("Procedure '{procedure}' timed out after {after:?}")]
    Timeout {
        procedure: &'static str,
        after: Duration,
    },
}

impl RepoError {
    /// Create a connection error for bad or missing configuration
    pub fn config(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self::Connection {
            source: sqlx::Error::Configuration(reason.into()),
        }
    }

    /// Treat any failure as a connection failure (used while opening)
    pub fn connection(source: sqlx::Error) -> Self {
        Self::Connection { source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Query { .. } => ErrorKind::Query,
            Self::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        let transport = matches!(
            err,
            sqlx::Error::Configuration(_)
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Protocol(_)
        );

        if transport {
            Self::Connection { source: err }
        } else {
            Self::Query { source: err }
        }
    }
}
