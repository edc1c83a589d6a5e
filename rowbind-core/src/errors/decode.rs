use std::error::Error as StdError;

/// Failure to turn a column [`Value`](crate::traits::value::Value) into a Rust value.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("unexpected NULL for non-nullable {expected}")]
    UnexpectedNull { expected: &'static str },

    #[error("cannot decode {found} as {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {value} is out of range for {expected}")]
    OutOfRange { value: i64, expected: &'static str },

    #[error("invalid timestamp {value:?}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// Raised by user implementations of `FromSql`.
    #[error(transparent)]
    Custom(Box<dyn StdError + Send + Sync + 'static>),
}

impl DecodeError {
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        DecodeError::Custom(err.into())
    }
}
