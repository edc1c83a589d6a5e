use crate::{
    binder::options::{BindOptions, UnmatchedColumns},
    errors::{BindError, DecodeError},
    traits::{cursor::Cursor, from_sql::Scan, record::Record, value::Value},
};

/// Where one column of the current row goes.
pub enum Slot<'c, 't> {
    Field {
        column: &'c str,
        target: &'t mut dyn Scan,
    },
    /// The column has no field; its value is read and dropped.
    Discard,
}

impl Slot<'_, '_> {
    fn fill(&mut self, value: Value) -> Result<(), BindError> {
        match self {
            Slot::Field { column, target } => target
                .scan(value)
                .map_err(|source| BindError::decode(column, source)),
            Slot::Discard => Ok(()),
        }
    }
}

pub(crate) fn advance<C: Cursor + ?Sized>(cursor: &mut C) -> Result<bool, BindError> {
    cursor.advance().map_err(BindError::cursor)
}

fn columns<C: Cursor + ?Sized>(cursor: &C) -> Result<Vec<String>, BindError> {
    cursor.columns().map_err(BindError::cursor)
}

/// Reads the whole row in one call and hands each value to its slot.
fn scan_into<C: Cursor + ?Sized>(
    cursor: &mut C,
    slots: &mut [Slot<'_, '_>],
) -> Result<(), BindError> {
    let values = cursor.values().map_err(BindError::cursor)?;

    if values.len() != slots.len() {
        return Err(BindError::ValueCountMismatch {
            expected: slots.len(),
            found: values.len(),
        });
    }

    for (slot, value) in slots.iter_mut().zip(values) {
        slot.fill(value)?;
    }
    Ok(())
}

/// Binds the current row into `record`. The cursor must already be on a row.
pub(crate) fn bind_record<C: Cursor + ?Sized>(
    cursor: &mut C,
    record: &mut dyn Record,
    options: &BindOptions,
) -> Result<(), BindError> {
    let mut fields = record.fields();
    let columns = columns(cursor)?;

    let mut slots = Vec::with_capacity(columns.len());
    for column in &columns {
        match fields.take(column) {
            Some(target) => slots.push(Slot::Field {
                column: column.as_str(),
                target,
            }),
            None => match options.unmatched_columns {
                UnmatchedColumns::Discard => {
                    tracing::trace!(column = %column, "discarding unmatched column");
                    slots.push(Slot::Discard);
                }
                UnmatchedColumns::Reject => {
                    return Err(BindError::UnmatchedColumn {
                        column: column.clone(),
                    });
                }
            },
        }
    }

    scan_into(cursor, &mut slots)
}

/// Binds the current row's single column through `fill`. The cursor must already be on a row.
pub(crate) fn bind_scalar<C, F>(cursor: &mut C, fill: F) -> Result<(), BindError>
where
    C: Cursor + ?Sized,
    F: FnOnce(Value) -> Result<(), DecodeError>,
{
    let columns = columns(cursor)?;
    if columns.len() != 1 {
        return Err(BindError::ColumnCountMismatch {
            found: columns.len(),
        });
    }

    let values = cursor.values().map_err(BindError::cursor)?;
    let found = values.len();
    let Ok([value]) = <[Value; 1]>::try_from(values) else {
        return Err(BindError::ValueCountMismatch { expected: 1, found });
    };

    fill(value).map_err(|source| BindError::decode(&columns[0], source))
}
