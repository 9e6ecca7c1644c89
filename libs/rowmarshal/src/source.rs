use std::error::Error as StdError;

use crate::schema::ColumnDescriptor;
use crate::value::Value;

/// An already-executing result set, pulled one row at a time.
///
/// The marshaller never issues queries itself. I/O, timeouts and
/// cancellation belong to the implementation.
pub trait RowSource {
    type Error: StdError + Send + Sync + 'static;

    /// Columns of the active result, in row order. Read once before iteration.
    fn columns(&self) -> Result<Vec<ColumnDescriptor>, Self::Error>;

    /// Move to the next row. `false` once the source is exhausted.
    fn advance(&mut self) -> Result<bool, Self::Error>;

    /// Cell `index` of the current row.
    fn value(&self, index: usize) -> Result<Value<'_>, Self::Error>;
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    type Error = S::Error;

    fn columns(&self) -> Result<Vec<ColumnDescriptor>, Self::Error> {
        (**self).columns()
    }

    fn advance(&mut self) -> Result<bool, Self::Error> {
        (**self).advance()
    }

    fn value(&self, index: usize) -> Result<Value<'_>, Self::Error> {
        (**self).value(index)
    }
}
