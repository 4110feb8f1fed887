//! # pgkit-unit
//!
//! Test isolation helpers for code that talks to PostgreSQL through
//! [`pgkit_core`].
//!
//! Two patterns are provided:
//! - [`run_in_transaction`] runs a test body inside a transaction that is
//!   always rolled back
//! - [`run_in_disposable_database`] runs a test body against a database
//!   created for it and dropped afterwards
//!
//! [`list_tables`] reads the catalog so a test can check what it left
//! behind.

pub mod disposable;
pub mod name;
pub mod sandbox;
pub mod schema;

pub use disposable::{DisposableDatabase, run_in_disposable_database};
pub use name::{NAME_LENGTH, random_name};
pub use sandbox::run_in_transaction;
pub use schema::list_tables;
