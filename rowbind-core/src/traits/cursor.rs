use std::{collections::VecDeque, convert::Infallible};

use crate::traits::value::Value;

/// A forward-only result cursor the binder can drain.
///
/// The binder never closes, rewinds or drops a cursor. Releasing it stays with
/// whoever opened it.
pub trait Cursor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Moves to the next row. Returns `false` once the results are exhausted.
    fn advance(&mut self) -> Result<bool, Self::Error>;

    /// Column names of the current row, in positional order.
    fn columns(&self) -> Result<Vec<String>, Self::Error>;

    /// Every value of the current row, in the same order as [`Cursor::columns`].
    ///
    /// This is a single batched read; all columns are returned even when the
    /// caller only keeps some of them.
    fn values(&mut self) -> Result<Vec<Value>, Self::Error>;
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Error = C::Error;

    fn advance(&mut self) -> Result<bool, Self::Error> {
        (**self).advance()
    }

    fn columns(&self) -> Result<Vec<String>, Self::Error> {
        (**self).columns()
    }

    fn values(&mut self) -> Result<Vec<Value>, Self::Error> {
        (**self).values()
    }
}

/// An in-memory cursor over rows that are already materialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryRows {
    columns: Vec<String>,
    pending: VecDeque<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl MemoryRows {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryRows {
            columns: columns.into_iter().map(Into::into).collect(),
            pending: VecDeque::new(),
            current: None,
        }
    }

    pub fn row<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_row(values);
        self
    }

    pub fn push_row<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.pending
            .push_back(values.into_iter().map(Into::into).collect());
    }

    /// Rows not yet reached by [`Cursor::advance`].
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Cursor for MemoryRows {
    type Error = Infallible;

    fn advance(&mut self) -> Result<bool, Self::Error> {
        self.current = self.pending.pop_front();
        Ok(self.current.is_some())
    }

    fn columns(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.columns.clone())
    }

    fn values(&mut self) -> Result<Vec<Value>, Self::Error> {
        Ok(self.current.take().unwrap_or_default())
    }
}
