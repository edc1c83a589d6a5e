use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use libsqlite3_sys::{self as ffi, SQLITE_TOOBIG, SQLITE_TRANSIENT, sqlite3_stmt};
use std::ffi::c_int;

use crate::traits::value::Value;

pub trait ToSql {
    /// - it is ok for it to be self consuming because the value is copied
    ///   into SQLite (SQLITE_TRANSIENT)
    /// - Indexes start at 1
    ///
    /// # Safety
    ///
    /// Pass in the stmt pointer (not the address). it uses sqlite3_bind_* to bind it to the correct type
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int;
}

impl ToSql for &str {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        let bytes = self.as_bytes();
        let Ok(len) = c_int::try_from(bytes.len()) else {
            return SQLITE_TOOBIG;
        };

        unsafe {
            ffi::sqlite3_bind_text(
                stmt,
                index,
                bytes.as_ptr() as *const _,
                len,
                SQLITE_TRANSIENT(),
            )
        }
    }
}

impl ToSql for String {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        unsafe { self.as_str().bind_to(stmt, index) }
    }
}

impl ToSql for &[u8] {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        let Ok(len) = c_int::try_from(self.len()) else {
            return SQLITE_TOOBIG;
        };

        unsafe {
            ffi::sqlite3_bind_blob(stmt, index, self.as_ptr() as *const _, len, SQLITE_TRANSIENT())
        }
    }
}

impl ToSql for Vec<u8> {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        unsafe { self.as_slice().bind_to(stmt, index) }
    }
}

impl ToSql for i32 {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        unsafe { ffi::sqlite3_bind_int(stmt, index, self) }
    }
}

impl ToSql for i64 {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        unsafe { ffi::sqlite3_bind_int64(stmt, index, self) }
    }
}

impl ToSql for f64 {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        unsafe { ffi::sqlite3_bind_double(stmt, index, self) }
    }
}

impl ToSql for bool {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        // true as i32 == 1
        // false as i32 == 0
        unsafe { ffi::sqlite3_bind_int(stmt, index, self as i32) }
    }
}

impl<T: ToSql> ToSql for Option<T> {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        match self {
            Some(rust_value) => unsafe { rust_value.bind_to(stmt, index) },
            None => unsafe { ffi::sqlite3_bind_null(stmt, index) },
        }
    }
}

impl ToSql for Value {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        match self {
            Value::Null => unsafe { ffi::sqlite3_bind_null(stmt, index) },
            Value::Integer(i) => unsafe { i.bind_to(stmt, index) },
            Value::Real(f) => unsafe { f.bind_to(stmt, index) },
            Value::Text(s) => unsafe { s.bind_to(stmt, index) },
            Value::Blob(b) => unsafe { b.bind_to(stmt, index) },
        }
    }
}

// Timestamps are stored as TEXT, which is what SQLite's own date functions expect.

impl ToSql for DateTime<Utc> {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        let text = self.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        unsafe { text.bind_to(stmt, index) }
    }
}

impl ToSql for NaiveDateTime {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        let text = self.format("%Y-%m-%d %H:%M:%S%.f").to_string();
        unsafe { text.bind_to(stmt, index) }
    }
}

impl ToSql for NaiveDate {
    unsafe fn bind_to(self, stmt: *mut sqlite3_stmt, index: c_int) -> c_int {
        let text = self.format("%Y-%m-%d").to_string();
        unsafe { text.bind_to(stmt, index) }
    }
}
