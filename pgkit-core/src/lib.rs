//! # pgkit-core
//!
//! PostgreSQL connection details and a thin blocking database handle.
//!
//! This crate provides:
//! - [`ConnectionDetail`], the parsed fields of a `postgresql://` URI, with
//!   validation and serialization back to a URI
//! - [`Database`], an owned connection opened from a URI and checked for
//!   liveness before it is handed out
//! - [`DataProvider`], the query capability shared by connections and
//!   transactions
//!
//! ## Example
//!
//! ```rust,no_run
//! use pgkit_core::{DataProvider, Database};
//!
//! fn main() -> Result<(), pgkit_core::PgError> {
//!     let mut db = Database::open("postgresql://postgres@localhost:5432/postgres")?;
//!
//!     // Point a copy of the connection at another database.
//!     let other = db.connection().with_database("other");
//!     println!("{}", other);
//!
//!     db.execute("CREATE TABLE IF NOT EXISTS pgkit (pk INT)", &[])?;
//!     db.close()?;
//!
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod detail;
pub mod error;
pub mod provider;

pub use connection::{Database, Transaction};
pub use detail::{ConnectionDetail, ConnectionDetailBuilder, SCHEME};
pub use error::{PgError, PgResult};
pub use provider::{DataProvider, Params};

pub use postgres::Row;
pub use postgres::types::ToSql;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::connection::{Database, Transaction};
    pub use crate::detail::{ConnectionDetail, ConnectionDetailBuilder};
    pub use crate::error::{PgError, PgResult};
    pub use crate::provider::DataProvider;
}
