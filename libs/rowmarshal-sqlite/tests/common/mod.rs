#![allow(dead_code)]

use rowmarshal::Record;
use rusqlite::Connection;

#[derive(Record, Default, Debug, PartialEq)]
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

/// In-memory database with table `test` holding
/// `(1, 'foo', NULL, NULL)` and `(2, 'bar', 'other', 1.2345)`.
pub fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE test (a INTEGER PRIMARY KEY AUTOINCREMENT, b TEXT, c TEXT, d REAL);
         INSERT INTO test (b) VALUES ('foo');
         INSERT INTO test (b, c, d) VALUES ('bar', 'other', 1.2345);",
    )
    .unwrap();
    conn
}
