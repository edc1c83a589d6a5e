use super::*;
use crate::{
    errors::DecodeError,
    traits::{
        cursor::MemoryRows,
        destination::{Element, Target},
        from_sql::FromSql,
        record::FieldMap,
        value::Value,
    },
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Counter {
    name: String,
    count: i64,
}

impl Record for Counter {
    fn fields(&mut self) -> FieldMap<'_> {
        let mut map = FieldMap::with_capacity(2);
        map.field("Name", &mut self.name);
        map.field("Count", &mut self.count);
        map
    }
}

impl Destination for Counter {
    fn target(&mut self) -> Target<'_> {
        Target::RecordSingle(self)
    }
}

impl Element for Counter {
    fn sequence(seq: &mut Vec<Self>) -> Target<'_> {
        Target::RecordSequence(seq)
    }

    fn optional_sequence(seq: &mut Option<Vec<Self>>) -> Target<'_> {
        Target::RecordSequence(seq)
    }
}

fn counter(name: &str, count: i64) -> Counter {
    Counter {
        name: name.to_string(),
        count,
    }
}

fn name_count_rows() -> MemoryRows {
    MemoryRows::new(["name", "count"])
        .row([Value::from("A"), Value::from(1)])
        .row([Value::from("B"), Value::from(2)])
}

#[derive(thiserror::Error, Debug)]
#[error("connection reset")]
struct ConnectionReset;

/// Yields `good_rows` single-column rows, then fails on advance.
struct FailingCursor {
    good_rows: usize,
}

impl Cursor for FailingCursor {
    type Error = ConnectionReset;

    fn advance(&mut self) -> Result<bool, Self::Error> {
        if self.good_rows == 0 {
            return Err(ConnectionReset);
        }
        self.good_rows -= 1;
        Ok(true)
    }

    fn columns(&self) -> Result<Vec<String>, Self::Error> {
        Ok(vec!["n".to_string()])
    }

    fn values(&mut self) -> Result<Vec<Value>, Self::Error> {
        Ok(vec![Value::Integer(self.good_rows as i64)])
    }
}

/// Reports two columns but only ever returns one value.
struct ShortRowCursor {
    done: bool,
}

impl Cursor for ShortRowCursor {
    type Error = std::convert::Infallible;

    fn advance(&mut self) -> Result<bool, Self::Error> {
        let more = !self.done;
        self.done = true;
        Ok(more)
    }

    fn columns(&self) -> Result<Vec<String>, Self::Error> {
        Ok(vec!["name".to_string(), "count".to_string()])
    }

    fn values(&mut self) -> Result<Vec<Value>, Self::Error> {
        Ok(vec![Value::from("A")])
    }
}

/// Rows that each carry their own column list, as a cursor over a
/// `UNION` of differently shaped selects might.
struct ScriptedCursor {
    rows: std::collections::VecDeque<(Vec<&'static str>, Vec<Value>)>,
    current: Option<(Vec<&'static str>, Vec<Value>)>,
}

impl ScriptedCursor {
    fn new(rows: Vec<(Vec<&'static str>, Vec<Value>)>) -> Self {
        ScriptedCursor {
            rows: rows.into(),
            current: None,
        }
    }
}

impl Cursor for ScriptedCursor {
    type Error = std::convert::Infallible;

    fn advance(&mut self) -> Result<bool, Self::Error> {
        self.current = self.rows.pop_front();
        Ok(self.current.is_some())
    }

    fn columns(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .current
            .as_ref()
            .map(|(columns, _)| columns.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default())
    }

    fn values(&mut self) -> Result<Vec<Value>, Self::Error> {
        Ok(self
            .current
            .as_ref()
            .map(|(_, values)| values.clone())
            .unwrap_or_default())
    }
}

#[test]
fn test_record_sequence_in_arrival_order() {
    let mut rows = name_count_rows();
    let mut counters: Vec<Counter> = Vec::new();

    bind(&mut rows, &mut counters).unwrap();

    assert_eq!(counters, vec![counter("A", 1), counter("B", 2)]);
}

#[test]
fn test_record_single_takes_first_row_only() {
    let mut rows = name_count_rows();
    let mut first = Counter::default();

    bind(&mut rows, &mut first).unwrap();

    assert_eq!(first, counter("A", 1));
    assert_eq!(rows.remaining(), 1);
}

#[test]
fn test_second_bind_continues_where_the_first_stopped() {
    let mut rows = name_count_rows();
    let mut first = Counter::default();
    let mut second = Counter::default();

    bind(&mut rows, &mut first).unwrap();
    scan(&mut rows, &mut second).unwrap();

    assert_eq!(first, counter("A", 1));
    assert_eq!(second, counter("B", 2));
}

#[test]
fn test_empty_cursor_leaves_record_untouched() {
    let mut rows = MemoryRows::new(["name", "count"]);
    let mut existing = counter("kept", 7);

    bind(&mut rows, &mut existing).unwrap();

    assert_eq!(existing, counter("kept", 7));
}

#[test]
fn test_empty_cursor_keeps_none_and_empty_apart() {
    let mut uninitialized: Option<Vec<Counter>> = None;
    bind(&mut MemoryRows::new(["name"]), &mut uninitialized).unwrap();
    assert_eq!(uninitialized, None);

    let mut empty: Option<Vec<Counter>> = Some(Vec::new());
    bind(&mut MemoryRows::new(["name"]), &mut empty).unwrap();
    assert_eq!(empty, Some(Vec::new()));
}

#[test]
fn test_optional_sequence_is_initialized_by_first_row() {
    let mut counters: Option<Vec<Counter>> = None;

    bind(&mut name_count_rows(), &mut counters).unwrap();

    assert_eq!(counters, Some(vec![counter("A", 1), counter("B", 2)]));
}

#[test]
fn test_existing_elements_are_extended() {
    let mut counters = vec![counter("seed", 0)];

    bind(&mut name_count_rows(), &mut counters).unwrap();

    assert_eq!(counters.len(), 3);
    assert_eq!(counters[0], counter("seed", 0));
    assert_eq!(counters[2], counter("B", 2));
}

#[test]
fn test_unmatched_columns_are_discarded_and_missing_fields_stay_default() {
    let mut rows = MemoryRows::new(["id", "name", "published_On"]).row([
        Value::from(10),
        Value::from("A"),
        Value::from("2024-01-01"),
    ]);
    let mut counters: Vec<Counter> = Vec::new();

    bind(&mut rows, &mut counters).unwrap();

    assert_eq!(counters, vec![counter("A", 0)]);
}

#[test]
fn test_reject_unmatched_columns() {
    let mut rows = MemoryRows::new(["name", "extra"]).row([Value::from("A"), Value::Null]);
    let mut counter = Counter::default();

    let binder = Binder::new(BindOptions::new().reject_unmatched_columns());
    let err = binder.bind(&mut rows, &mut counter).unwrap_err();

    assert!(matches!(err, BindError::UnmatchedColumn { ref column } if column == "extra"));
    assert_eq!(counter, Counter::default());
}

#[test]
fn test_duplicate_columns_bind_the_first_occurrence() {
    let mut rows = MemoryRows::new(["name", "name"]).row([Value::from("left"), Value::from("right")]);
    let mut counter = Counter::default();

    bind(&mut rows, &mut counter).unwrap();

    assert_eq!(counter.name, "left");
}

#[test]
fn test_scalar_single() {
    let mut rows = MemoryRows::new(["title"]).row([Value::from("Episode 1")]);
    let mut title = String::new();

    bind(&mut rows, &mut title).unwrap();

    assert_eq!(title, "Episode 1");
}

#[test]
fn test_scalar_single_on_empty_cursor_writes_nothing() {
    let mut rows = MemoryRows::new(["title"]);
    let mut title = String::from("unchanged");

    bind(&mut rows, &mut title).unwrap();

    assert_eq!(title, "unchanged");
}

#[test]
fn test_scalar_rejects_multiple_columns() {
    let mut title = String::new();
    let err = bind(&mut name_count_rows(), &mut title).unwrap_err();

    assert!(matches!(err, BindError::ColumnCountMismatch { found: 2 }));
    assert!(title.is_empty());
}

#[test]
fn test_scalar_sequence_keeps_rows_before_a_failing_row() {
    let mut rows = MemoryRows::new(["n"])
        .row([Value::from(1)])
        .row([Value::from(2)])
        .row([Value::from("three")]);
    let mut numbers: Vec<i64> = Vec::new();

    let err = bind(&mut rows, &mut numbers).unwrap_err();

    assert!(matches!(err, BindError::Decode { ref column, .. } if column == "n"));
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_scalar_sequence_rejects_wide_rows() {
    let mut names: Vec<String> = Vec::new();
    let err = bind(&mut name_count_rows(), &mut names).unwrap_err();

    assert!(matches!(err, BindError::ColumnCountMismatch { found: 2 }));
    assert!(names.is_empty());
}

#[test]
fn test_scalar_sequence_keeps_rows_before_a_wide_row() {
    let mut cursor = ScriptedCursor::new(vec![
        (vec!["n"], vec![Value::from(1)]),
        (vec!["n"], vec![Value::from(2)]),
        (vec!["n", "m"], vec![Value::from(3), Value::from(4)]),
        (vec!["n"], vec![Value::from(5)]),
    ]);
    let mut numbers: Vec<i64> = vec![0];

    let err = bind(&mut cursor, &mut numbers).unwrap_err();

    assert!(matches!(err, BindError::ColumnCountMismatch { found: 2 }));
    assert_eq!(numbers, vec![0, 1, 2]);
    // the row after the failing one is left for the caller
    assert_eq!(cursor.rows.len(), 1);
}

#[test]
fn test_cursor_errors_propagate_unchanged() {
    let mut cursor = FailingCursor { good_rows: 2 };
    let mut numbers: Vec<i64> = Vec::new();

    let err = bind(&mut cursor, &mut numbers).unwrap_err();

    match err {
        BindError::Cursor(source) => assert!(source.downcast_ref::<ConnectionReset>().is_some()),
        other => panic!("expected a cursor error, got {other:?}"),
    }
    assert_eq!(numbers, vec![1, 0]);
}

#[test]
fn test_short_row_is_a_protocol_error() {
    let mut counter = Counter::default();
    let err = bind(&mut ShortRowCursor { done: false }, &mut counter).unwrap_err();

    assert!(matches!(
        err,
        BindError::ValueCountMismatch {
            expected: 2,
            found: 1
        }
    ));
}

#[derive(Debug, PartialEq)]
struct Cents(i64);

impl FromSql for Cents {
    fn from_sql(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Real(f) => Ok(Cents((f * 100.0).round() as i64)),
            Value::Text(s) => Err(DecodeError::custom(format!("not a price: {s}"))),
            other => Err(DecodeError::TypeMismatch {
                expected: "Cents",
                found: other.type_name(),
            }),
        }
    }
}

crate::scalar!(Cents);

#[test]
fn test_custom_decode_contract() {
    let mut rows = MemoryRows::new(["price"])
        .row([Value::Real(10.99)])
        .row([Value::Real(20.99)]);
    let mut prices: Vec<Cents> = Vec::new();

    bind(&mut rows, &mut prices).unwrap();

    assert_eq!(prices, vec![Cents(1099), Cents(2099)]);
}

#[test]
fn test_custom_decode_failure_names_the_column() {
    let mut rows = MemoryRows::new(["price"]).row([Value::from("free")]);
    let mut price = Cents(0);

    let err = bind(&mut rows, &mut price).unwrap_err();

    assert_eq!(
        err.to_string(),
        "rowbind: failed to decode column `price`: not a price: free"
    );
    assert_eq!(price, Cents(0));
}
