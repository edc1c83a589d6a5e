use std::ffi::c_int;

#[derive(thiserror::Error, Debug)]
pub enum StatementStepErrors {
    #[error("SqliteBusy. Operation took longer than the busy timeout")]
    SqliteBusy,

    #[error("Foreign key constraint failed. Sqlite error {code} : {error_msg}")]
    ForeignKeyConstraint { code: c_int, error_msg: String },

    #[error("unique key or primary key constraint failed. Sqlite error {code} : {error_msg}")]
    UniqueConstraint { code: c_int, error_msg: String },

    #[error("Constraint check failed. Sqlite error {code} : {error_msg}")]
    CheckConstraint { code: c_int, error_msg: String },

    /// The statement produced a row; write statements are expected to finish in one step.
    #[error("statement returned rows, use query() to read them")]
    ExecuteReturnedRows,

    // in case of any other errors
    #[error("SQLite error {code}: {error_msg}")]
    SqliteFailure { code: c_int, error_msg: String },
}
