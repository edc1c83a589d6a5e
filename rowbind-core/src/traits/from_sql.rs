use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{errors::DecodeError, traits::value::Value};

/// Decodes one column value into `Self`.
///
/// Implementing this for your own type is how a destination opts in to custom
/// decoding. The binder always goes through this trait, so a user
/// implementation replaces the default conversion entirely.
pub trait FromSql: Sized {
    fn from_sql(value: Value) -> Result<Self, DecodeError>;
}

/// A writable slot: something a column value can be stored into.
///
/// Every `FromSql` type is a slot through the blanket impl below. Record field
/// maps hold `&mut dyn Scan` so they can point at fields of different types.
pub trait Scan {
    fn scan(&mut self, value: Value) -> Result<(), DecodeError>;
}

impl<T: FromSql> Scan for T {
    fn scan(&mut self, value: Value) -> Result<(), DecodeError> {
        *self = T::from_sql(value)?;
        Ok(())
    }
}

impl FromSql for Value {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

impl FromSql for i64 {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Integer(i) => Ok(i),
            Value::Null => Err(DecodeError::UnexpectedNull { expected: "i64" }),
            other => Err(DecodeError::TypeMismatch {
                expected: "i64",
                found: other.type_name(),
            }),
        }
    }
}

// Narrower integers go through i64 and are range checked.
macro_rules! from_sql_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromSql for $ty {
                fn from_sql(value: Value) -> Result<Self, DecodeError> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(i).map_err(|_| DecodeError::OutOfRange {
                            value: i,
                            expected: stringify!($ty),
                        }),
                        Value::Null => Err(DecodeError::UnexpectedNull {
                            expected: stringify!($ty),
                        }),
                        other => Err(DecodeError::TypeMismatch {
                            expected: stringify!($ty),
                            found: other.type_name(),
                        }),
                    }
                }
            }
        )*
    };
}

from_sql_integer!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

impl FromSql for f64 {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Real(f) => Ok(f),
            // SQLite stores whole REAL values as INTEGER in some cases
            Value::Integer(i) => Ok(i as f64),
            Value::Null => Err(DecodeError::UnexpectedNull { expected: "f64" }),
            other => Err(DecodeError::TypeMismatch {
                expected: "f64",
                found: other.type_name(),
            }),
        }
    }
}

impl FromSql for f32 {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        f64::from_sql(value).map(|f| f as f32)
    }
}

impl FromSql for bool {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Integer(i) => Ok(i != 0),
            Value::Null => Err(DecodeError::UnexpectedNull { expected: "bool" }),
            other => Err(DecodeError::TypeMismatch {
                expected: "bool",
                found: other.type_name(),
            }),
        }
    }
}

impl FromSql for String {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Null => Err(DecodeError::UnexpectedNull { expected: "String" }),
            other => Err(DecodeError::TypeMismatch {
                expected: "String",
                found: other.type_name(),
            }),
        }
    }
}

impl FromSql for Vec<u8> {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Blob(b) => Ok(b),
            Value::Text(s) => Ok(s.into_bytes()),
            Value::Null => Err(DecodeError::UnexpectedNull { expected: "Vec<u8>" }),
            other => Err(DecodeError::TypeMismatch {
                expected: "Vec<u8>",
                found: other.type_name(),
            }),
        }
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_sql(other).map(Some),
        }
    }
}

// Formats SQLite itself produces (CURRENT_TIMESTAMP, datetime()) plus ISO 8601 with a `T`.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_naive_datetime(text: &str) -> Result<NaiveDateTime, DecodeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }

    let mut last_err = None;
    for format in NAIVE_DATETIME_FORMATS {
        match NaiveDateTime::parse_from_str(text, format) {
            Ok(dt) => return Ok(dt),
            Err(e) => last_err = Some(e),
        }
    }

    Err(DecodeError::InvalidTimestamp {
        value: text.to_string(),
        source: last_err,
    })
}

impl FromSql for NaiveDateTime {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Text(s) => parse_naive_datetime(&s),
            // unix seconds
            Value::Integer(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
                .map(|dt| dt.naive_utc())
                .ok_or(DecodeError::OutOfRange {
                    value: secs,
                    expected: "NaiveDateTime",
                }),
            Value::Null => Err(DecodeError::UnexpectedNull {
                expected: "NaiveDateTime",
            }),
            other => Err(DecodeError::TypeMismatch {
                expected: "NaiveDateTime",
                found: other.type_name(),
            }),
        }
    }
}

impl FromSql for DateTime<Utc> {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Err(DecodeError::UnexpectedNull {
                expected: "DateTime<Utc>",
            }),
            // timestamps without an offset are taken as UTC
            other => NaiveDateTime::from_sql(other).map(|naive| naive.and_utc()),
        }
    }
}

impl FromSql for NaiveDate {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Text(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                Ok(date) => Ok(date),
                Err(_) => parse_naive_datetime(&s).map(|dt| dt.date()),
            },
            Value::Null => Err(DecodeError::UnexpectedNull {
                expected: "NaiveDate",
            }),
            other => Err(DecodeError::TypeMismatch {
                expected: "NaiveDate",
                found: other.type_name(),
            }),
        }
    }
}
