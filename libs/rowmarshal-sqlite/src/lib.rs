//! SQLite row source for `rowmarshal`.
//!
//! ```no_run
//! use rowmarshal::Record;
//! use rusqlite::Connection;
//!
//! #[derive(Record, Default)]
//! pub struct Item {
//!     pub id: i64,
//!     pub name: Option<String>,
//! }
//!
//! let conn = Connection::open("items.db")?;
//! let mut items: Vec<Item> = Vec::new();
//! rowmarshal_sqlite::select(&conn, &mut items, "SELECT id, name FROM item WHERE id > ?1", [10])?;
//! # Ok::<(), rowmarshal_sqlite::SelectError>(())
//! ```

use std::borrow::Cow;

use rowmarshal::{ColumnDescriptor, Destination, MarshalError, RowSource, Value};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, Params, Rows, Statement};

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

/// Rows of an executing SQLite statement.
///
/// Storage classes map to cells as INTEGER → Int64, REAL → Float64,
/// TEXT → Text, BLOB → Bytes, NULL → Null.
pub struct SqliteRows<'stmt> {
    columns: Vec<ColumnDescriptor>,
    rows: Rows<'stmt>,
    current: Option<Vec<Value<'static>>>,
}

impl<'stmt> SqliteRows<'stmt> {
    /// Bind `params` and start executing `stmt`.
    pub fn query<P: Params>(stmt: &'stmt mut Statement<'_>, params: P) -> rusqlite::Result<Self> {
        let columns = ColumnDescriptor::from_names(stmt.column_names());
        let rows = stmt.query(params)?;
        Ok(Self { columns, rows, current: None })
    }
}

impl RowSource for SqliteRows<'_> {
    type Error = rusqlite::Error;

    fn columns(&self) -> Result<Vec<ColumnDescriptor>, Self::Error> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> Result<bool, Self::Error> {
        let width = self.columns.len();
        self.current = match self.rows.next()? {
            Some(row) => Some(
                (0..width)
                    .map(|i| row.get_ref(i).and_then(|v| cell(i, v)))
                    .collect::<rusqlite::Result<Vec<_>>>()?,
            ),
            None => None,
        };
        Ok(self.current.is_some())
    }

    fn value(&self, index: usize) -> Result<Value<'_>, Self::Error> {
        let row = self.current.as_ref().ok_or(rusqlite::Error::InvalidQuery)?;
        row.get(index)
            .map(Value::reborrow)
            .ok_or(rusqlite::Error::InvalidColumnIndex(index))
    }
}

fn cell(index: usize, value: ValueRef<'_>) -> rusqlite::Result<Value<'static>> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int64(v),
        ValueRef::Real(v) => Value::Float64(v),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))?;
            Value::Text(Cow::Owned(text.to_string()))
        }
        ValueRef::Blob(bytes) => Value::Bytes(Cow::Owned(bytes.to_vec())),
    })
}

/// Run `sql` with `params` and marshal the result into `destination`.
pub fn select<D, P>(conn: &Connection, destination: D, sql: &str, params: P) -> Result<(), SelectError>
where
    D: Destination,
    P: Params,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = SqliteRows::query(&mut stmt, params)?;
    rowmarshal::select(destination, rows)?;
    Ok(())
}
