pub mod cursor;
pub mod destination;
pub mod from_sql;
pub mod record;
#[cfg(feature = "sqlite")]
pub mod to_sql;
pub mod value;
