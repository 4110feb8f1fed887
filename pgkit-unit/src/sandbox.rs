//! Transaction-scoped sandboxes.

use pgkit_core::{DataProvider, Database, PgResult};
use tracing::{debug, warn};

/// Run `f` inside a transaction that is always rolled back.
///
/// `f` only gets the query capability of the transaction, so it can neither
/// commit nor close the connection. The rollback happens when `f` returns and
/// also when it panics. Only a failure to begin the transaction is returned as
/// an error; whatever `f` needs to report goes through its own return value.
///
/// ```rust,no_run
/// use pgkit_core::{DataProvider, Database};
/// use pgkit_unit::run_in_transaction;
///
/// # fn main() -> Result<(), pgkit_core::PgError> {
/// let mut db = Database::open("postgresql://postgres@localhost/postgres")?;
/// run_in_transaction(&mut db, |dp| {
///     dp.execute("CREATE TABLE sandboxed (pk INT)", &[]).unwrap();
/// })?;
/// # Ok(())
/// # }
/// ```
pub fn run_in_transaction<F, R>(db: &mut Database, f: F) -> PgResult<R>
where
    F: FnOnce(&mut dyn DataProvider) -> R,
{
    let mut txn = db.transaction()?;
    let result = f(&mut txn);

    if let Err(e) = txn.rollback() {
        warn!(error = %e, "Rollback of sandbox transaction failed");
    } else {
        debug!("Sandbox transaction rolled back");
    }

    Ok(result)
}
