//! Error types for pgkit operations.

use thiserror::Error;

/// Result type for pgkit operations.
pub type PgResult<T> = Result<T, PgError>;

/// Errors that can occur while parsing connection details or talking to
/// PostgreSQL.
#[derive(Error, Debug)]
pub enum PgError {
    /// The connection URI could not be parsed.
    #[error("invalid connection URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    /// The client could not establish a session with the server.
    #[error("connection refused: {0}")]
    ConnectionRefused(#[source] postgres::Error),

    /// A session was established but the liveness round-trip failed.
    #[error("ping failed: {0}")]
    PingFailed(#[source] postgres::Error),

    /// A statement sent to the database failed.
    #[error("execution error: {0}")]
    Execution(#[from] postgres::Error),

    /// A connection detail violates one of its invariants.
    #[error("invalid connection detail: {0}")]
    InvalidDetail(String),

    /// The handle was used after it had been closed.
    #[error("database handle is closed")]
    Closed,

    /// A disposable database could not be dropped during teardown.
    #[error("failed to drop database '{database}': {source}")]
    Teardown {
        /// Name of the database left behind.
        database: String,
        /// The underlying failure.
        #[source]
        source: Box<PgError>,
    },
}

impl PgError {
    /// Create an invalid connection detail error.
    pub fn invalid_detail(message: impl Into<String>) -> Self {
        Self::InvalidDetail(message.into())
    }

    /// Create a teardown error for the named database.
    pub fn teardown(database: impl Into<String>, source: PgError) -> Self {
        Self::Teardown {
            database: database.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error came out of opening a handle.
    ///
    /// Parse failures, refused connections and failed pings all land here.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUri(_) | Self::ConnectionRefused(_) | Self::PingFailed(_)
        )
    }

    /// Check if this error was caused by using a closed handle.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// The SQLSTATE code reported by the server, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::ConnectionRefused(e) | Self::PingFailed(e) | Self::Execution(e) => {
                e.code().map(|code| code.code())
            }
            Self::Teardown { source, .. } => source.sql_state(),
            _ => None,
        }
    }
}
