//! Bind query result rows into structs, scalars and vectors.
//!
//! ```
//! use rowbind::{Record, bind, sqlite::Connection};
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! pub struct Counter {
//!     pub name: String,
//!     pub count: i64,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = Connection::open_memory()?;
//! conn.exec(
//!     "CREATE TABLE counter (name TEXT, count INTEGER);
//!      INSERT INTO counter VALUES ('A', 1), ('B', 2);",
//! )?;
//!
//! let mut stmt = conn.prepare("SELECT name, count FROM counter ORDER BY name")?;
//! let mut rows = stmt.query();
//!
//! let mut counters: Vec<Counter> = Vec::new();
//! bind(&mut rows, &mut counters)?;
//!
//! assert_eq!(counters[1], Counter { name: "B".into(), count: 2 });
//! # Ok(())
//! # }
//! ```
//!
//! Columns are matched against the snake_case form of each `pub` field name
//! (`PublishedAt` matches `published_at`). Columns without a field are read
//! and dropped, fields without a column keep their value. `bind` never closes
//! the cursor it is given.

pub use rowbind_core::{
    BindError, BindOptions, Binder, DecodeError, UnmatchedColumns, bind, binder, errors, naming,
    scalar, scan, traits,
};

pub use rowbind_core::traits::{
    cursor::{Cursor, MemoryRows},
    destination::{Destination, Element, Shape, Target},
    from_sql::{FromSql, Scan},
    record::{FieldMap, Record},
    value::Value,
};

pub use rowbind_macros::Record;

/// SQLite cursor: open a connection, prepare a statement, bind its rows.
pub mod sqlite {
    pub use rowbind_core::errors::{
        SqliteFailure,
        connection::{SqliteOpenErrors, SqlitePrepareErrors},
        row::RowError,
        statement::StatementStepErrors,
    };
    pub use rowbind_core::internal_sqlite::{
        connection::{Connection, DEFAULT_BUSY_TIMEOUT},
        rows::Rows,
        statement::Statement,
    };
    pub use rowbind_core::traits::to_sql::ToSql;
}
