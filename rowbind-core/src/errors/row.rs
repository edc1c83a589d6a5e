use std::ffi::c_int;

/// Errors raised by [`Rows`](crate::internal_sqlite::rows::Rows) while stepping a query.
#[derive(thiserror::Error, Debug)]
pub enum RowError {
    #[error("SqliteBusy. Operation took longer than the busy timeout")]
    SqliteBusy,

    // in case of any other errors
    #[error("SQLite error {code}: {error_msg}")]
    SqliteFailure { code: c_int, error_msg: String },
}
