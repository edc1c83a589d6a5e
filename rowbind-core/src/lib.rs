//! Binding engine behind `rowbind`.
//!
//! A [`Cursor`](traits::cursor::Cursor) yields rows with named columns, a
//! [`Destination`](traits::destination::Destination) says how those rows are
//! absorbed, and [`bind`] moves one into the other. Columns are matched to
//! record fields by the snake_case form of the field name; columns without a
//! field are discarded.
//!
//! The SQLite cursor lives behind the default `sqlite` feature, so the derive
//! macro can depend on this crate without building SQLite.

pub mod binder;
pub mod errors;
#[cfg(feature = "sqlite")]
pub mod internal_sqlite;
pub mod naming;
pub mod traits;
#[cfg(feature = "sqlite")]
pub mod utility;

pub use binder::{BindOptions, Binder, UnmatchedColumns, bind, scan};
pub use errors::{BindError, DecodeError};
