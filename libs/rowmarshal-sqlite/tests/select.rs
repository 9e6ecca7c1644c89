mod common;

use common::*;
use rowmarshal::{MarshalError, RowSource};
use rowmarshal_sqlite::{SelectError, SqliteRows, select};

#[test]
fn test_query_pointer() {
    let conn = setup();

    let mut row = TestRow::default();
    row.c_p = Some("henk".to_string());

    select(
        &conn,
        &mut row,
        "SELECT a AS a_p, b AS b_p, c AS c_p, d AS d_p FROM test WHERE a = 1",
        [],
    )
    .unwrap();

    assert_eq!(row.a_p, Some(1));
    assert_eq!(row.b_p.as_deref(), Some("foo"));
    assert_eq!(row.c_p, None);
    assert_eq!(row.d_p, None);
}

#[test]
fn test_query_struct() {
    let conn = setup();

    let mut row = TestRow::default();
    select(&conn, &mut row, "SELECT a, b, c, d FROM test WHERE a = 2", []).unwrap();

    assert_eq!(row.a, 2);
    assert_eq!(row.b, "bar");
    assert_eq!(row.c, "other");
    assert_eq!(row.d, 1.2345);
}

#[test]
fn test_query_struct_slice() {
    let conn = setup();

    let mut rows: Vec<TestRow> = Vec::new();
    select(&conn, &mut rows, "SELECT * FROM test ORDER BY a", []).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].a, 1);
    assert_eq!(rows[0].c, "");
    assert_eq!(rows[1].b, "bar");
}

#[test]
fn test_query_boxed_struct_slice() {
    let conn = setup();

    let mut rows: Vec<Box<TestRow>> = Vec::new();
    select(&conn, &mut rows, "SELECT * FROM test ORDER BY a", []).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].d, 1.2345);
}

#[test]
fn test_query_scalar_slices() {
    let conn = setup();

    let mut ids: Vec<i64> = Vec::new();
    select(&conn, &mut ids, "SELECT a FROM test ORDER BY a", []).unwrap();
    assert_eq!(ids, [1, 2]);

    let mut ids: Vec<Option<i64>> = Vec::new();
    select(&conn, &mut ids, "SELECT a FROM test ORDER BY a", []).unwrap();
    assert_eq!(ids, [Some(1), Some(2)]);

    let mut ds: Vec<Option<f64>> = Vec::new();
    select(&conn, &mut ds, "SELECT d FROM test ORDER BY a", []).unwrap();
    assert_eq!(ds, [None, Some(1.2345)]);
}

#[test]
fn test_query_scalar() {
    let conn = setup();

    let mut i: i64 = 0;
    select(&conn, &mut i, "SELECT a FROM test ORDER BY a LIMIT 1", []).unwrap();
    assert_eq!(i, 1);
}

#[test]
fn test_query_scalar_with_params() {
    let conn = setup();

    let mut b = String::new();
    select(&conn, &mut b, "SELECT b FROM test WHERE a = ?1", [2]).unwrap();
    assert_eq!(b, "bar");
}

#[test]
fn test_query_scalar_too_many_columns() {
    let conn = setup();

    let mut i: i64 = 0;
    let err = select(&conn, &mut i, "SELECT * FROM test", []).unwrap_err();
    assert!(matches!(
        err,
        SelectError::Marshal(MarshalError::ColumnCountMismatch { columns: 4, .. })
    ));
}

#[test]
fn test_query_unmapped_column() {
    let conn = setup();

    let mut rows: Vec<TestRow> = Vec::new();
    let err = select(&conn, &mut rows, "SELECT a AS missing FROM test", []).unwrap_err();
    assert!(matches!(err, SelectError::Marshal(MarshalError::UnmappedColumn { .. })));
}

#[test]
fn test_invalid_sql() {
    let conn = setup();

    let mut i: i64 = 0;
    let err = select(&conn, &mut i, "SELECT nope FROM test", []).unwrap_err();
    assert!(matches!(err, SelectError::Sqlite(_)));
}

#[test]
fn test_rows_report_columns() {
    let conn = setup();
    let mut stmt = conn.prepare("SELECT b, d FROM test").unwrap();
    let rows = SqliteRows::query(&mut stmt, []).unwrap();

    let names: Vec<_> = rows.columns().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["b", "d"]);
}

#[test]
fn test_blob_and_real_cells() {
    let conn = setup();

    let mut blob: Vec<u8> = Vec::new();
    select(&conn, &mut blob, "SELECT x'0102'", []).unwrap();
    assert_eq!(blob, [1, 2]);

    let mut d: f64 = 0.0;
    select(&conn, &mut d, "SELECT 2.5", []).unwrap();
    assert_eq!(d, 2.5);
}

#[test]
fn test_invalid_utf8_text_is_row_source_error() {
    let conn = setup();

    let mut s = String::new();
    let err = select(&conn, &mut s, "SELECT CAST(x'ff' AS TEXT)", []).unwrap_err();

    match err {
        SelectError::Marshal(MarshalError::RowSource { row, source }) => {
            assert_eq!(row, 0);
            assert!(matches!(
                source.downcast_ref::<rusqlite::Error>(),
                Some(rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, _))
            ));
        }
        other => panic!("expected RowSource, got {other:?}"),
    }
    assert_eq!(s, "");
}
