use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{
    errors::{BindError, DecodeError},
    traits::{
        from_sql::{FromSql, Scan},
        record::Record,
        value::Value,
    },
};

/// The four ways a destination can absorb rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    RecordSingle,
    RecordSequence,
    ScalarSingle,
    ScalarSequence,
}

/// A destination borrowed for one bind call, tagged with its binding strategy.
pub enum Target<'a> {
    RecordSingle(&'a mut dyn Record),
    RecordSequence(&'a mut dyn RecordSink),
    ScalarSingle(&'a mut dyn Scan),
    ScalarSequence(&'a mut dyn ScalarSink),
}

impl Target<'_> {
    pub fn shape(&self) -> Shape {
        match self {
            Target::RecordSingle(_) => Shape::RecordSingle,
            Target::RecordSequence(_) => Shape::RecordSequence,
            Target::ScalarSingle(_) => Shape::ScalarSingle,
            Target::ScalarSequence(_) => Shape::ScalarSequence,
        }
    }
}

/// Anything rows can be bound into.
///
/// Records get this from `#[derive(Record)]`, built-in scalars have it already,
/// custom scalar types get it from [`scalar!`](crate::scalar), and `Vec<T>` /
/// `Option<Vec<T>>` have it for every such `T`.
pub trait Destination {
    fn target(&mut self) -> Target<'_>;
}

/// A type that can be an element of a sequence destination.
pub trait Element: Sized {
    fn sequence(seq: &mut Vec<Self>) -> Target<'_>;

    fn optional_sequence(seq: &mut Option<Vec<Self>>) -> Target<'_>;
}

impl<T: Element> Destination for Vec<T> {
    fn target(&mut self) -> Target<'_> {
        T::sequence(self)
    }
}

/// `None` stays `None` when the cursor is empty, otherwise it becomes `Some`.
impl<T: Element> Destination for Option<Vec<T>> {
    fn target(&mut self) -> Target<'_> {
        T::optional_sequence(self)
    }
}

/// A growable sequence of records.
pub trait RecordSink {
    /// Allocates a default record, lets `fill` bind into it, then appends it.
    /// Nothing is appended when `fill` fails.
    fn append_with(
        &mut self,
        fill: &mut dyn FnMut(&mut dyn Record) -> Result<(), BindError>,
    ) -> Result<(), BindError>;
}

impl<T: Record + Default> RecordSink for Vec<T> {
    fn append_with(
        &mut self,
        fill: &mut dyn FnMut(&mut dyn Record) -> Result<(), BindError>,
    ) -> Result<(), BindError> {
        let mut record = T::default();
        fill(&mut record)?;
        self.push(record);
        Ok(())
    }
}

impl<T: Record + Default> RecordSink for Option<Vec<T>> {
    fn append_with(
        &mut self,
        fill: &mut dyn FnMut(&mut dyn Record) -> Result<(), BindError>,
    ) -> Result<(), BindError> {
        let mut record = T::default();
        fill(&mut record)?;
        self.get_or_insert_with(Vec::new).push(record);
        Ok(())
    }
}

/// A growable sequence of scalars.
pub trait ScalarSink {
    fn append_value(&mut self, value: Value) -> Result<(), DecodeError>;
}

impl<T: FromSql> ScalarSink for Vec<T> {
    fn append_value(&mut self, value: Value) -> Result<(), DecodeError> {
        self.push(T::from_sql(value)?);
        Ok(())
    }
}

impl<T: FromSql> ScalarSink for Option<Vec<T>> {
    fn append_value(&mut self, value: Value) -> Result<(), DecodeError> {
        let item = T::from_sql(value)?;
        self.get_or_insert_with(Vec::new).push(item);
        Ok(())
    }
}

/// Makes a `FromSql` type usable as a scalar destination and as the element
/// of a scalar sequence.
///
/// ```
/// use rowbind_core::{errors::DecodeError, traits::{from_sql::FromSql, value::Value}};
///
/// struct Cents(i64);
///
/// impl FromSql for Cents {
///     fn from_sql(value: Value) -> Result<Self, DecodeError> {
///         i64::from_sql(value).map(Cents)
///     }
/// }
///
/// rowbind_core::scalar!(Cents);
/// ```
#[macro_export]
macro_rules! scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::traits::destination::Destination for $ty {
                fn target(&mut self) -> $crate::traits::destination::Target<'_> {
                    $crate::traits::destination::Target::ScalarSingle(self)
                }
            }

            impl $crate::traits::destination::Element for $ty {
                fn sequence(seq: &mut ::std::vec::Vec<Self>) -> $crate::traits::destination::Target<'_> {
                    $crate::traits::destination::Target::ScalarSequence(seq)
                }

                fn optional_sequence(
                    seq: &mut ::std::option::Option<::std::vec::Vec<Self>>,
                ) -> $crate::traits::destination::Target<'_> {
                    $crate::traits::destination::Target::ScalarSequence(seq)
                }
            }
        )+
    };
}

scalar!(
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    String,
    Value,
    NaiveDateTime,
    NaiveDate,
    DateTime<Utc>,
);

/// Nullable scalars can only be collected; a lone `Option<T>` destination
/// would overlap with `Option<Vec<T>>`.
impl<T: FromSql> Element for Option<T> {
    fn sequence(seq: &mut Vec<Self>) -> Target<'_> {
        Target::ScalarSequence(seq)
    }

    fn optional_sequence(seq: &mut Option<Vec<Self>>) -> Target<'_> {
        Target::ScalarSequence(seq)
    }
}
