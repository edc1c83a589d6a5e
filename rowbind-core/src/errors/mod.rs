use std::error::Error as StdError;

#[cfg(feature = "sqlite")]
pub mod connection;
pub mod decode;
#[cfg(feature = "sqlite")]
pub mod row;
#[cfg(feature = "sqlite")]
pub mod statement;

pub use decode::DecodeError;

/// recommended to **log** this error rather than directly handling it
#[cfg(feature = "sqlite")]
#[derive(thiserror::Error, Debug)]
#[error("SQLite error {code}: {error_msg}")]
pub struct SqliteFailure {
    pub code: std::ffi::c_int,
    pub error_msg: String,
}

/// Everything that can go wrong while binding a cursor into a destination.
///
/// Rows bound before the failing one stay in a sequence destination.
#[derive(thiserror::Error, Debug)]
pub enum BindError {
    /// A scalar destination can only absorb a single column.
    #[error("rowbind: scalar destination expects exactly 1 column, got {found}")]
    ColumnCountMismatch { found: usize },

    /// The cursor returned a row whose width differs from its column list.
    #[error("rowbind: cursor reported {expected} columns but returned {found} values")]
    ValueCountMismatch { expected: usize, found: usize },

    /// Only raised when strict column matching is enabled.
    #[error("rowbind: column `{column}` has no matching field")]
    UnmatchedColumn { column: String },

    /// Error raised by the cursor itself. Downcast to get the original type back.
    #[error(transparent)]
    Cursor(Box<dyn StdError + Send + Sync + 'static>),

    #[error("rowbind: failed to decode column `{column}`: {source}")]
    Decode {
        column: String,
        #[source]
        source: DecodeError,
    },
}

impl BindError {
    pub fn cursor<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        BindError::Cursor(Box::new(err))
    }

    pub(crate) fn decode(column: &str, source: DecodeError) -> Self {
        BindError::Decode {
            column: column.to_string(),
            source,
        }
    }
}
