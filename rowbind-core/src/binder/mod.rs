use crate::{
    errors::BindError,
    traits::{
        cursor::Cursor,
        destination::{Destination, RecordSink, ScalarSink, Target},
        from_sql::Scan,
        record::Record,
    },
};

pub mod materialize;
pub mod options;

use materialize::{advance, bind_record, bind_scalar};
pub use options::{BindOptions, UnmatchedColumns};

/// Binds the rows of `cursor` into `dest` with the default options.
///
/// Records and scalars take the first row only and leave the rest of the
/// cursor untouched; vectors take every remaining row. An empty cursor leaves
/// `dest` exactly as it was. The cursor is never closed, that stays with the
/// caller.
///
/// ```
/// use rowbind_core::{bind, traits::{cursor::MemoryRows, value::Value}};
///
/// let mut rows = MemoryRows::new(["title"])
///     .row([Value::from("Episode 1")])
///     .row([Value::from("Episode 2")]);
///
/// let mut titles: Vec<String> = Vec::new();
/// bind(&mut rows, &mut titles).unwrap();
/// assert_eq!(titles, ["Episode 1", "Episode 2"]);
/// ```
///
/// The destination has to be a mutable borrow, a copy would silently absorb
/// the rows:
///
/// ```compile_fail
/// use rowbind_core::{bind, traits::{cursor::MemoryRows, value::Value}};
///
/// let mut rows = MemoryRows::new(["price"]).row([Value::Real(10.99)]);
/// let price = 0.0_f64;
/// bind(&mut rows, price).unwrap();
/// ```
///
/// ```compile_fail
/// use rowbind_core::{bind, traits::{cursor::MemoryRows, value::Value}};
///
/// let mut rows = MemoryRows::new(["price"]).row([Value::Real(10.99)]);
/// let prices: Vec<f64> = Vec::new();
/// bind(&mut rows, &prices).unwrap();
/// ```
///
/// Types that are neither a record, a scalar nor a vector of those are
/// rejected as well:
///
/// ```compile_fail
/// use std::collections::HashMap;
/// use rowbind_core::{bind, traits::{cursor::MemoryRows, value::Value}};
///
/// let mut rows = MemoryRows::new(["price"]).row([Value::Real(10.99)]);
/// let mut prices: HashMap<String, f64> = HashMap::new();
/// bind(&mut rows, &mut prices).unwrap();
/// ```
pub fn bind<C, D>(cursor: &mut C, dest: &mut D) -> Result<(), BindError>
where
    C: Cursor + ?Sized,
    D: Destination + ?Sized,
{
    Binder::default().bind(cursor, dest)
}

/// Same as [`bind`].
pub fn scan<C, D>(cursor: &mut C, dest: &mut D) -> Result<(), BindError>
where
    C: Cursor + ?Sized,
    D: Destination + ?Sized,
{
    bind(cursor, dest)
}

/// Binds rows with a fixed set of [`BindOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Binder {
    options: BindOptions,
}

impl Binder {
    pub fn new(options: BindOptions) -> Self {
        Binder { options }
    }

    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    pub fn bind<C, D>(&self, cursor: &mut C, dest: &mut D) -> Result<(), BindError>
    where
        C: Cursor + ?Sized,
        D: Destination + ?Sized,
    {
        let target = dest.target();
        let shape = target.shape();
        tracing::debug!(?shape, "binding rows");

        let rows = match target {
            Target::RecordSingle(record) => self.record_single(cursor, record)?,
            Target::RecordSequence(sink) => self.record_sequence(cursor, sink)?,
            Target::ScalarSingle(slot) => scalar_single(cursor, slot)?,
            Target::ScalarSequence(sink) => scalar_sequence(cursor, sink)?,
        };

        tracing::debug!(?shape, rows, "rows bound");
        Ok(())
    }

    fn record_single<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        record: &mut dyn Record,
    ) -> Result<usize, BindError> {
        if !advance(cursor)? {
            return Ok(0);
        }

        bind_record(cursor, record, &self.options)?;
        Ok(1)
    }

    fn record_sequence<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        sink: &mut dyn RecordSink,
    ) -> Result<usize, BindError> {
        let mut rows = 0;

        while advance(cursor)? {
            sink.append_with(&mut |record| bind_record(cursor, record, &self.options))?;
            rows += 1;
        }

        Ok(rows)
    }
}

fn scalar_single<C: Cursor + ?Sized>(
    cursor: &mut C,
    slot: &mut dyn Scan,
) -> Result<usize, BindError> {
    if !advance(cursor)? {
        return Ok(0);
    }

    bind_scalar(cursor, |value| slot.scan(value))?;
    Ok(1)
}

fn scalar_sequence<C: Cursor + ?Sized>(
    cursor: &mut C,
    sink: &mut dyn ScalarSink,
) -> Result<usize, BindError> {
    let mut rows = 0;

    while advance(cursor)? {
        bind_scalar(cursor, |value| sink.append_value(value))?;
        rows += 1;
    }

    Ok(rows)
}

#[cfg(test)]
mod binder_test;
