use libsqlite3_sys::{self as ffi, sqlite3, sqlite3_errcode};
use std::ffi::{CStr, c_char, c_int};

/// Internally calls sqlite3_errcode and sqlite3_errmsg to return
/// the error code and message of the most recent failure on `db`
///
///  # Safety
///
/// - db must be a valid sqlite3 connection which is not NULL
pub unsafe fn get_sqlite_failure(db: *mut sqlite3) -> (c_int, String) {
    let safe_error_msg = unsafe {
        // sqlite internally handles dropping c_error_msg
        let c_error_msg = ffi::sqlite3_errmsg(db);
        CStr::from_ptr(c_error_msg as *const c_char)
    };

    let error_msg = safe_error_msg.to_string_lossy().into_owned();
    let code = unsafe { sqlite3_errcode(db) };

    (code, error_msg)
}

/// # Safety
///
/// - db must be a valid sqlite3 connection or NULL
pub unsafe fn close_db(db: *mut sqlite3) {
    // sqlite3_close_v2 is meant for gc languages, every statement borrows the
    // connection so they are all finalized by the time this runs
    unsafe { ffi::sqlite3_close(db) };
}

/// Copies `len` bytes starting at `ptr`. A NULL pointer yields an empty vec,
/// SQLite returns one for zero length blobs.
///
/// # Safety
///
/// - ptr must be NULL or valid for reads of `len` bytes
pub(crate) unsafe fn copy_column_bytes(ptr: *const u8, len: c_int) -> Vec<u8> {
    if ptr.is_null() || len <= 0 {
        return Vec::new();
    }
    unsafe { std::slice::from_raw_parts(ptr, len as usize) }.to_vec()
}
