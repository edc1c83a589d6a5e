use libsqlite3_sys::{
    self as ffi, SQLITE_MISUSE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_MEMORY,
    SQLITE_OPEN_READWRITE, sqlite3, sqlite3_busy_timeout, sqlite3_exec,
};
use std::{
    ffi::{CString, c_int},
    ptr,
    time::Duration,
};

use crate::{
    errors::{
        SqliteFailure,
        connection::{SqliteOpenErrors, SqlitePrepareErrors},
    },
    internal_sqlite::statement::Statement,
    utility::utils::{close_db, get_sqlite_failure},
};

/// How long SQLite waits on a locked database before giving up with SQLITE_BUSY.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

pub struct Connection {
    pub(crate) db: *mut sqlite3,
}

impl Drop for Connection {
    fn drop(&mut self) {
        unsafe {
            close_db(self.db);
        };
    }
}

impl Connection {
    pub fn open(filename: &str) -> Result<Self, SqliteOpenErrors> {
        let flag = SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE;

        Connection::open_with_flags(filename, flag)
    }

    pub fn open_memory() -> Result<Self, SqliteOpenErrors> {
        let flag = SQLITE_OPEN_MEMORY | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE;
        Connection::open_with_flags(":memory:", flag)
    }

    // The flags refer to what mode to open the db in (readwrite, memory, etc)
    fn open_with_flags(filename: &str, flag: c_int) -> Result<Self, SqliteOpenErrors> {
        let mut db = ptr::null_mut();

        let c_filename =
            CString::new(filename).map_err(|_| SqliteOpenErrors::EmbeddedNullInFileName {
                filename: filename.to_string(),
            })?;

        let code = unsafe { ffi::sqlite3_open_v2(c_filename.as_ptr(), &mut db, flag, ptr::null()) };

        if code == SQLITE_OK && db.is_null() {
            Err(SqliteOpenErrors::ConnectionAllocationFailed)
        } else if code == SQLITE_OK {
            let conn = Connection { db };
            conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)
                .map_err(|SqliteFailure { code, error_msg }| SqliteOpenErrors::SqliteFailure {
                    code,
                    error_msg,
                })?;

            tracing::debug!(filename, "opened sqlite connection");
            Ok(conn)
        } else {
            let (code, error_msg) = unsafe { get_sqlite_failure(db) };
            unsafe {
                close_db(db);
            };
            Err(SqliteOpenErrors::SqliteFailure { code, error_msg })
        }
    }

    /// Sets how long a statement waits on a locked database before failing with busy.
    pub fn busy_timeout(&self, timeout: Duration) -> Result<(), SqliteFailure> {
        let millis = c_int::try_from(timeout.as_millis()).unwrap_or(c_int::MAX);
        let code = unsafe { sqlite3_busy_timeout(self.db, millis) };

        if code != SQLITE_OK {
            let (code, error_msg) = unsafe { get_sqlite_failure(self.db) };
            return Err(SqliteFailure { code, error_msg });
        }
        Ok(())
    }

    /// Runs one or more `;` separated statements, discarding any rows they return.
    pub fn exec(&self, sql: &str) -> Result<(), SqliteFailure> {
        let c_sql = CString::new(sql).map_err(|_| SqliteFailure {
            code: SQLITE_MISUSE,
            error_msg: "SQL statement contains a null byte".to_string(),
        })?;

        let code = unsafe {
            sqlite3_exec(
                self.db,
                c_sql.as_ptr(),
                None,
                ptr::null_mut(),
                ptr::null_mut(),
            )
        };

        if code != SQLITE_OK {
            let (code, error_msg) = unsafe { get_sqlite_failure(self.db) };
            return Err(SqliteFailure { code, error_msg });
        }
        Ok(())
    }

    pub fn prepare(&self, sql: &str) -> Result<Statement<'_>, SqlitePrepareErrors> {
        let c_sql_query = CString::new(sql).map_err(|_| SqlitePrepareErrors::EmbeddedNullInSql)?;

        let mut stmt = ptr::null_mut();
        let code = unsafe {
            ffi::sqlite3_prepare_v2(
                self.db,
                c_sql_query.as_ptr(),
                -1,
                &mut stmt,
                ptr::null_mut(),
            )
        };

        if code != SQLITE_OK {
            let (code, error_msg) = unsafe { get_sqlite_failure(self.db) };
            return Err(SqlitePrepareErrors::SqliteFailure { code, error_msg });
        }

        // empty input or a lone comment compiles to a NULL statement
        if stmt.is_null() {
            return Err(SqlitePrepareErrors::EmptyStatement);
        }

        Ok(Statement { conn: self, stmt })
    }
}
