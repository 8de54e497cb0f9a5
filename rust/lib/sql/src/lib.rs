//! Record store collaborator for the HR workflows.
//!
//! Every resource handler talks to the database through [`SQLStore`]:
//! a SQL string plus positional parameters in, rows (or an affected-row
//! count) out. [`SqliteStore`] is the embedded implementation.

pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::SQLError;
pub use sqlite::SqliteStore;
pub use traits::{Row, SQLStore, Value};
