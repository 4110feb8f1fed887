//! Disposable databases for test isolation.
//!
//! A disposable database is created under a random name, used for the
//! duration of one test, and dropped again afterwards.
//!
//! # How it works
//!
//! 1. `CREATE DATABASE` with a random name through an existing handle
//! 2. Open a new handle against it by copying the original connection detail
//! 3. Hand the new handle to the test
//! 4. Close the new handle, since PostgreSQL refuses to drop a database with
//!    open sessions
//! 5. `DROP DATABASE` through the original handle
//!
//! Step 5 is owned by [`DisposableDatabase`] and runs when it goes out of
//! scope, so the database is dropped even if the test panics.

use pgkit_core::{ConnectionDetail, Database, PgError, PgResult};
use tracing::{debug, error};

use crate::name::random_name;

/// A database that exists until this value is dropped.
///
/// The guard borrows the handle it was created through and uses it again to
/// drop the database. Any handle opened with [`open`](Self::open) must be
/// closed or dropped before the guard is.
#[derive(Debug)]
pub struct DisposableDatabase<'a> {
    admin: &'a mut Database,
    name: String,
    dropped: bool,
}

impl<'a> DisposableDatabase<'a> {
    /// Create a new database with a random name through `admin`.
    pub fn create(admin: &'a mut Database) -> PgResult<Self> {
        let name = random_name();
        debug!(database = %name, "Creating disposable database");
        admin.batch_execute(&format!("CREATE DATABASE {}", name))?;

        Ok(Self {
            admin,
            name,
            dropped: false,
        })
    }

    /// The generated database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connection details pointing at the disposable database.
    pub fn connection(&self) -> ConnectionDetail {
        self.admin.connection().with_database(&self.name)
    }

    /// Open a new handle against the disposable database.
    pub fn open(&self) -> PgResult<Database> {
        Database::connect(self.connection())
    }

    /// Drop the database now, reporting a failure instead of logging it.
    pub fn drop_database(mut self) -> PgResult<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> PgResult<()> {
        self.dropped = true;
        debug!(database = %self.name, "Dropping disposable database");
        self.admin
            .batch_execute(&format!("DROP DATABASE {}", self.name))
            .map_err(|e| PgError::teardown(&self.name, e))
    }
}

impl Drop for DisposableDatabase<'_> {
    fn drop(&mut self) {
        if self.dropped {
            return;
        }
        if let Err(e) = self.teardown() {
            error!(error = %e, "Disposable database was left behind");
        }
    }
}

/// Run `f` against a freshly created database that is dropped afterwards.
///
/// The new handle passed to `f` is closed before the database is dropped.
/// The drop also happens when opening the new handle fails and when `f`
/// panics.
///
/// ```rust,no_run
/// use pgkit_core::{DataProvider, Database};
/// use pgkit_unit::run_in_disposable_database;
///
/// # fn main() -> Result<(), pgkit_core::PgError> {
/// let mut db = Database::open("postgresql://postgres@localhost/postgres")?;
/// run_in_disposable_database(&mut db, |scratch| {
///     scratch.execute("CREATE TABLE pgkit (pk INT)", &[]).unwrap();
/// })?;
/// # Ok(())
/// # }
/// ```
pub fn run_in_disposable_database<F, R>(db: &mut Database, f: F) -> PgResult<R>
where
    F: FnOnce(&mut Database) -> R,
{
    let disposable = DisposableDatabase::create(db)?;
    let mut scratch = disposable.open()?;

    let result = f(&mut scratch);

    scratch.close()?;
    disposable.drop_database()?;

    Ok(result)
}
