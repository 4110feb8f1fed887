//! PostgreSQL database handle and transaction wrapper.

use postgres::{Client, NoTls, Row};
use tracing::{debug, info};

use crate::detail::ConnectionDetail;
use crate::error::{PgError, PgResult};
use crate::provider::{DataProvider, Params};

/// Statement sent to check that a freshly opened session can talk to the server.
const PING: &str = "SELECT 1";

/// A live connection to a PostgreSQL database together with the details used
/// to open it.
///
/// The handle owns its connection. Once [`close`](Database::close) has been
/// called every operation fails with [`PgError::Closed`]. Dropping the handle
/// closes the connection as well.
pub struct Database {
    client: Option<Client>,
    connection: ConnectionDetail,
}

impl Database {
    /// Open a connection to the database described by `uri` and ping it.
    ///
    /// Fails if the URI does not parse, if the connection cannot be
    /// established, or if the server does not answer the liveness check.
    pub fn open(uri: &str) -> PgResult<Self> {
        let connection = ConnectionDetail::parse(uri)?;
        Self::establish(uri, connection)
    }

    /// Open a connection from an already parsed connection detail.
    pub fn connect(connection: ConnectionDetail) -> PgResult<Self> {
        let uri = connection.to_string();
        Self::establish(&uri, connection)
    }

    fn establish(uri: &str, connection: ConnectionDetail) -> PgResult<Self> {
        let mut client = Client::connect(uri, NoTls).map_err(PgError::ConnectionRefused)?;
        client.batch_execute(PING).map_err(PgError::PingFailed)?;

        info!(
            host = %connection.location,
            database = %connection.database,
            "Opened database connection"
        );

        Ok(Self {
            client: Some(client),
            connection,
        })
    }

    /// The details this handle was opened with.
    pub fn connection(&self) -> &ConnectionDetail {
        &self.connection
    }

    /// Check whether the handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    fn client(&mut self) -> PgResult<&mut Client> {
        self.client.as_mut().ok_or(PgError::Closed)
    }

    /// Execute a batch of statements separated by semicolons.
    pub fn batch_execute(&mut self, sql: &str) -> PgResult<()> {
        debug!(sql = %sql, "Executing batch");
        self.client()?.batch_execute(sql)?;
        Ok(())
    }

    /// Begin a transaction.
    ///
    /// The transaction rolls back when dropped unless it is committed.
    pub fn transaction(&mut self) -> PgResult<Transaction<'_>> {
        debug!("Beginning transaction");
        let txn = self.client()?.transaction()?;
        Ok(Transaction { txn })
    }

    /// Close the connection.
    ///
    /// Closing an already closed handle does nothing.
    pub fn close(&mut self) -> PgResult<()> {
        if let Some(client) = self.client.take() {
            debug!(database = %self.connection.database, "Closing database connection");
            client.close()?;
        }
        Ok(())
    }
}

impl DataProvider for Database {
    fn query(&mut self, sql: &str, params: Params<'_>) -> PgResult<Vec<Row>> {
        debug!(sql = %sql, "Executing query");
        Ok(self.client()?.query(sql, params)?)
    }

    fn execute(&mut self, sql: &str, params: Params<'_>) -> PgResult<u64> {
        debug!(sql = %sql, "Executing statement");
        Ok(self.client()?.execute(sql, params)?)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.connection.location)
            .field("database", &self.connection.database)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A PostgreSQL transaction.
pub struct Transaction<'a> {
    txn: postgres::Transaction<'a>,
}

impl Transaction<'_> {
    /// Commit the transaction.
    pub fn commit(self) -> PgResult<()> {
        debug!("Committing transaction");
        self.txn.commit()?;
        Ok(())
    }

    /// Roll the transaction back.
    pub fn rollback(self) -> PgResult<()> {
        debug!("Rolling back transaction");
        self.txn.rollback()?;
        Ok(())
    }
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction").finish_non_exhaustive()
    }
}

impl DataProvider for Transaction<'_> {
    fn query(&mut self, sql: &str, params: Params<'_>) -> PgResult<Vec<Row>> {
        debug!(sql = %sql, "Executing query in transaction");
        Ok(self.txn.query(sql, params)?)
    }

    fn execute(&mut self, sql: &str, params: Params<'_>) -> PgResult<u64> {
        debug!(sql = %sql, "Executing statement in transaction");
        Ok(self.txn.execute(sql, params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_invalid_uri() {
        let err = Database::open("not a uri").unwrap_err();
        assert!(matches!(err, PgError::InvalidUri(_)));
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_open_unreachable_server() {
        let err = Database::open("postgresql://postgres@127.0.0.1:1/postgres?connect_timeout=2")
            .unwrap_err();
        assert!(matches!(err, PgError::ConnectionRefused(_)));
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_connect_unreachable_server() {
        let detail = ConnectionDetail::builder()
            .user("postgres")
            .location("127.0.0.1")
            .port(1)
            .database("postgres")
            .option("connect_timeout", "2")
            .build()
            .unwrap();

        assert!(Database::connect(detail).unwrap_err().is_connection_error());
    }
}
