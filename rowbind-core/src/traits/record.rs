use std::collections::HashMap;

use crate::{naming::to_snake_case, traits::from_sql::Scan};

/// A struct whose public fields can be filled from a row by column name.
///
/// Usually derived with `#[derive(Record)]`, which builds the field table at
/// compile time. A manual impl registers each field through [`FieldMap::field`]:
///
/// ```
/// use rowbind_core::traits::record::{FieldMap, Record};
///
/// #[derive(Default)]
/// struct Book {
///     title: String,
///     price: f64,
/// }
///
/// impl Record for Book {
///     fn fields(&mut self) -> FieldMap<'_> {
///         let mut map = FieldMap::with_capacity(2);
///         map.field("Title", &mut self.title);
///         map.field("Price", &mut self.price);
///         map
///     }
/// }
/// ```
pub trait Record {
    /// Builds the column name to slot mapping for this instance.
    fn fields(&mut self) -> FieldMap<'_>;
}

/// Column name to writable slot mapping for one record instance.
///
/// When two fields register the same column the first one wins.
#[derive(Default)]
pub struct FieldMap<'a> {
    slots: HashMap<String, &'a mut dyn Scan>,
}

impl<'a> FieldMap<'a> {
    pub fn new() -> Self {
        FieldMap {
            slots: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        FieldMap {
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Registers a field under the snake_case form of its name.
    pub fn field(&mut self, name: &str, slot: &'a mut dyn Scan) -> &mut Self {
        self.column(to_snake_case(name), slot)
    }

    /// Registers a field under an exact column name, no normalization.
    pub fn column(&mut self, column: impl Into<String>, slot: &'a mut dyn Scan) -> &mut Self {
        let column = column.into();
        if self.slots.contains_key(&column) {
            tracing::debug!(column = %column, "duplicate field for column, keeping the first");
        } else {
            self.slots.insert(column, slot);
        }
        self
    }

    /// Hands out the slot for `column`. A slot is only handed out once.
    pub fn take(&mut self, column: &str) -> Option<&'a mut dyn Scan> {
        self.slots.remove(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.slots.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}
