//! The capability shared by connections and transactions.

use postgres::Row;
use postgres::types::ToSql;

use crate::error::PgResult;

/// Statement parameters, bound positionally to `$1`, `$2`, ...
pub type Params<'a> = &'a [&'a (dyn ToSql + Sync)];

/// Anything that can run statements against a database.
///
/// Both [`Database`](crate::Database) and [`Transaction`](crate::Transaction)
/// implement this, so code written against a `DataProvider` can be handed a
/// live connection or a transaction that will be rolled back. It exposes
/// neither transaction control nor closing.
pub trait DataProvider {
    /// Execute a query and return all rows.
    fn query(&mut self, sql: &str, params: Params<'_>) -> PgResult<Vec<Row>>;

    /// Execute a query and return its first row, discarding the rest.
    ///
    /// Returns `None` when the query selects nothing.
    fn query_row(&mut self, sql: &str, params: Params<'_>) -> PgResult<Option<Row>> {
        Ok(self.query(sql, params)?.into_iter().next())
    }

    /// Execute a statement and return the number of affected rows.
    fn execute(&mut self, sql: &str, params: Params<'_>) -> PgResult<u64>;
}
