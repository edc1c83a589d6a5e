use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_CONSTRAINT_CHECK, SQLITE_CONSTRAINT_FOREIGNKEY,
    SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE, SQLITE_DONE, SQLITE_OK, SQLITE_ROW,
    sqlite3_clear_bindings, sqlite3_column_count, sqlite3_column_name, sqlite3_extended_errcode,
    sqlite3_finalize, sqlite3_reset, sqlite3_step, sqlite3_stmt,
};
use std::ffi::{CStr, c_int};

use crate::{
    errors::{SqliteFailure, statement::StatementStepErrors},
    internal_sqlite::{connection::Connection, rows::Rows},
    traits::to_sql::ToSql,
    utility::utils::get_sqlite_failure,
};

pub struct Statement<'conn> {
    pub(crate) conn: &'conn Connection,
    pub(crate) stmt: *mut sqlite3_stmt,
}

impl Drop for Statement<'_> {
    fn drop(&mut self) {
        unsafe {
            sqlite3_finalize(self.stmt);
        }
    }
}

impl<'conn> Statement<'conn> {
    //If any of the sqlite3_bind_*() routines are called with a prepared statement for which
    // sqlite3_step() has been called more recently than sqlite3_reset(), then the call will
    // return SQLITE_MISUSE. step() resets on completion, so binding again after it is fine.

    ///note index start from 1 and not 0
    pub fn bind_parameter(&self, index: c_int, value: impl ToSql) -> Result<(), SqliteFailure> {
        let code = unsafe { value.bind_to(self.stmt, index) };

        if code != SQLITE_OK {
            let (code, error_msg) = unsafe { get_sqlite_failure(self.conn.db) };
            Err(SqliteFailure { code, error_msg })
        } else {
            Ok(())
        }
    }

    /// Rewinds the statement and clears its bindings.
    pub fn reset(&self) {
        // sqlite3_reset repeats the error of the last step, which step() already reported
        unsafe {
            sqlite3_reset(self.stmt);
            sqlite3_clear_bindings(self.stmt);
        }
    }

    /// Strictly only used for write only operation (UPDATE, INSERT etc.)
    ///
    /// The statement is rewound afterwards, keeping its bindings, so it can be
    /// bound and stepped again.
    pub fn step(&self) -> Result<(), StatementStepErrors> {
        let code = unsafe { sqlite3_step(self.stmt) };

        let result = match code {
            SQLITE_DONE => Ok(()),
            SQLITE_ROW => Err(StatementStepErrors::ExecuteReturnedRows),
            SQLITE_BUSY => Err(StatementStepErrors::SqliteBusy),
            _ => {
                let (_, error_msg) = unsafe { get_sqlite_failure(self.conn.db) };
                let code = unsafe { sqlite3_extended_errcode(self.conn.db) };

                Err(match code {
                    SQLITE_CONSTRAINT_FOREIGNKEY => {
                        StatementStepErrors::ForeignKeyConstraint { code, error_msg }
                    }
                    SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY => {
                        StatementStepErrors::UniqueConstraint { code, error_msg }
                    }
                    SQLITE_CONSTRAINT_CHECK => {
                        StatementStepErrors::CheckConstraint { code, error_msg }
                    }
                    _ => StatementStepErrors::SqliteFailure { code, error_msg },
                })
            }
        };

        unsafe { sqlite3_reset(self.stmt) };
        result
    }

    /// Column names of the result set, available before the first step.
    pub fn column_names(&self) -> Vec<String> {
        let count = unsafe { sqlite3_column_count(self.stmt) };
        (0..count).map(|i| unsafe { column_name(self.stmt, i) }).collect()
    }

    /// Starts reading the result set. The returned cursor borrows the
    /// statement mutably, so it cannot be rebound while rows are being read.
    pub fn query(&mut self) -> Rows<'_, 'conn> {
        Rows::new(self)
    }
}

/// # Safety
///
/// - stmt must be a valid prepared statement and `index` a valid column
pub(crate) unsafe fn column_name(stmt: *mut sqlite3_stmt, index: c_int) -> String {
    let ptr = unsafe { sqlite3_column_name(stmt, index) };
    if ptr.is_null() {
        // only happens when sqlite runs out of memory
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
