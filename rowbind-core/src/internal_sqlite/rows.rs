use libsqlite3_sys::{
    SQLITE_BLOB, SQLITE_BUSY, SQLITE_DONE, SQLITE_FLOAT, SQLITE_INTEGER, SQLITE_ROW, SQLITE_TEXT,
    sqlite3_column_blob, sqlite3_column_bytes, sqlite3_column_count,
    sqlite3_column_double, sqlite3_column_int64, sqlite3_column_text, sqlite3_column_type,
    sqlite3_reset, sqlite3_step, sqlite3_stmt,
};
use std::ffi::c_int;

use crate::{
    errors::row::RowError,
    internal_sqlite::statement::Statement,
    traits::{cursor::Cursor, value::Value},
    utility::utils::{copy_column_bytes, get_sqlite_failure},
};

/// Result rows of a [`Statement`], read as a [`Cursor`].
///
/// Dropping `Rows` rewinds the statement so it can be queried again.
pub struct Rows<'s, 'conn> {
    stmt: &'s mut Statement<'conn>,
    done: bool,
    on_row: bool,
}

impl<'s, 'conn> Rows<'s, 'conn> {
    pub(crate) fn new(stmt: &'s mut Statement<'conn>) -> Self {
        Rows {
            stmt,
            done: false,
            on_row: false,
        }
    }

    fn raw(&self) -> *mut sqlite3_stmt {
        self.stmt.stmt
    }
}

impl Drop for Rows<'_, '_> {
    fn drop(&mut self) {
        unsafe {
            sqlite3_reset(self.raw());
        }
    }
}

impl Cursor for Rows<'_, '_> {
    type Error = RowError;

    fn advance(&mut self) -> Result<bool, RowError> {
        // stepping a finished statement would silently start it over
        if self.done {
            return Ok(false);
        }

        let result_code = unsafe { sqlite3_step(self.raw()) };
        self.on_row = result_code == SQLITE_ROW;

        if result_code == SQLITE_ROW {
            Ok(true)
        } else if result_code == SQLITE_DONE {
            self.done = true;
            Ok(false)
        } else if result_code == SQLITE_BUSY {
            Err(RowError::SqliteBusy)
        } else {
            self.done = true;
            let (code, error_msg) = unsafe { get_sqlite_failure(self.stmt.conn.db) };
            Err(RowError::SqliteFailure { code, error_msg })
        }
    }

    fn columns(&self) -> Result<Vec<String>, RowError> {
        Ok(self.stmt.column_names())
    }

    /// Empty unless the last `advance` landed on a row.
    fn values(&mut self) -> Result<Vec<Value>, RowError> {
        if !self.on_row {
            return Ok(Vec::new());
        }

        let stmt = self.raw();
        let count = unsafe { sqlite3_column_count(stmt) };

        let row = (0..count)
            .map(|i| unsafe { read_value(stmt, i) })
            .collect();
        Ok(row)
    }
}

/// # Safety
///
/// - stmt must be stepped onto a row and `index` a valid column
unsafe fn read_value(stmt: *mut sqlite3_stmt, index: c_int) -> Value {
    unsafe {
        match sqlite3_column_type(stmt, index) {
            SQLITE_INTEGER => Value::Integer(sqlite3_column_int64(stmt, index)),
            SQLITE_FLOAT => Value::Real(sqlite3_column_double(stmt, index)),
            SQLITE_TEXT => {
                // text first, then bytes, as the sqlite docs recommend
                let ptr = sqlite3_column_text(stmt, index);
                let len = sqlite3_column_bytes(stmt, index);
                let bytes = copy_column_bytes(ptr, len);
                // sqlite does not validate text, keep invalid UTF-8 as raw bytes
                match String::from_utf8(bytes) {
                    Ok(text) => Value::Text(text),
                    Err(err) => Value::Blob(err.into_bytes()),
                }
            }
            SQLITE_BLOB => {
                let ptr = sqlite3_column_blob(stmt, index) as *const u8;
                let len = sqlite3_column_bytes(stmt, index);
                Value::Blob(copy_column_bytes(ptr, len))
            }
            // SQLITE_NULL
            _ => Value::Null,
        }
    }
}
