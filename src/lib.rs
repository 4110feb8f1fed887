//! # pgkit
//!
//! PostgreSQL connection details and test isolation helpers.
//!
//! pgkit provides:
//! - Parsing and serializing `postgresql://` connection URIs
//! - A blocking database handle that checks the server is alive on open
//! - Transaction sandboxes that always roll back
//! - Disposable databases created for a single test and dropped afterwards
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pgkit::prelude::*;
//!
//! fn main() -> Result<(), PgError> {
//!     let url = std::env::var("PGKIT_TEST_URL").unwrap_or_default();
//!     let mut db = Database::open(&url)?;
//!
//!     run_in_transaction(&mut db, |dp| {
//!         dp.execute("CREATE TABLE scratch (pk INT)", &[]).unwrap();
//!         assert!(list_tables(dp, "public").unwrap().contains(&"scratch".to_string()));
//!     })?;
//!
//!     run_in_disposable_database(&mut db, |scratch| {
//!         scratch.execute("CREATE TABLE pgkit (pk INT)", &[]).unwrap();
//!     })?;
//!
//!     db.close()
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Connection details, database handles and errors.
pub mod db {
    pub use pgkit_core::*;
}

/// Test isolation helpers.
pub mod unit {
    pub use pgkit_unit::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use pgkit_core::prelude::*;
    pub use pgkit_unit::{
        DisposableDatabase, list_tables, run_in_disposable_database, run_in_transaction,
    };
}

// Re-export key types at the crate root
pub use pgkit_core::{ConnectionDetail, DataProvider, Database, PgError, PgResult, Transaction};
