#![allow(dead_code)]

use rowmarshal::memory::MemoryRows;
use rowmarshal::{Record, Value};

#[derive(Record, Default, Debug, Clone, PartialEq)]
pub struct TestRow {
    pub a: i64,
    pub b: String,
    pub c: String,
    pub d: f64,

    ignore: String,

    pub a_p: Option<i64>,
    pub b_p: Option<String>,
    pub c_p: Option<String>,
    pub d_p: Option<f64>,
}

/// Two rows: `(1, "foo", NULL, NULL)` and `(2, "bar", "other", 1.2345)`.
pub fn fixture() -> MemoryRows {
    fixture_as(["a", "b", "c", "d"])
}

/// The fixture rows under other column names.
pub fn fixture_as(columns: [&str; 4]) -> MemoryRows {
    MemoryRows::new(columns)
        .row([1_i64.into(), "foo".into(), Value::Null, Value::Null])
        .row([2_i64.into(), "bar".into(), "other".into(), 1.2345_f64.into()])
}

/// One column `name` holding `values`, one row each.
pub fn column<'a>(name: &str, values: impl IntoIterator<Item = Value<'a>>) -> MemoryRows {
    values
        .into_iter()
        .fold(MemoryRows::new([name]), |rows, v| rows.row([v]))
}
