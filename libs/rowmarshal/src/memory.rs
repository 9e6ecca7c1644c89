use std::collections::VecDeque;

use crate::schema::ColumnDescriptor;
use crate::source::RowSource;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryRowsError {
    #[error("no current row")]
    NoCurrentRow,

    #[error("column index {index} out of range ({width} columns)")]
    ColumnOutOfRange { index: usize, width: usize },

    #[error("{0}")]
    Injected(String),
}

/// Row source over rows already held in memory.
///
/// ```
/// use rowmarshal::memory::MemoryRows;
///
/// let rows = MemoryRows::new(["a", "b"])
///     .row([1_i64.into(), "foo".into()])
///     .row([2_i64.into(), "bar".into()]);
/// # let _ = rows;
/// ```
#[derive(Debug, Clone)]
pub struct MemoryRows {
    columns: Vec<ColumnDescriptor>,
    pending: VecDeque<Vec<Value<'static>>>,
    current: Option<Vec<Value<'static>>>,
    /// Fail the `advance` that would deliver this row ordinal.
    fail_at: Option<(usize, String)>,
    delivered: usize,
}

impl MemoryRows {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: ColumnDescriptor::from_names(columns),
            pending: VecDeque::new(),
            current: None,
            fail_at: None,
            delivered: 0,
        }
    }

    /// Append one row. Cells are detached from their source buffers.
    pub fn row<'a, I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Value<'a>>,
    {
        self.pending.push_back(values.into_iter().map(Value::into_owned).collect());
        self
    }

    /// Make the source fail instead of delivering row `row` (0-based).
    pub fn fail_at(mut self, row: usize, message: impl Into<String>) -> Self {
        self.fail_at = Some((row, message.into()));
        self
    }

    /// Rows not yet delivered.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl RowSource for MemoryRows {
    type Error = MemoryRowsError;

    fn columns(&self) -> Result<Vec<ColumnDescriptor>, Self::Error> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> Result<bool, Self::Error> {
        if let Some((row, message)) = &self.fail_at {
            if *row == self.delivered {
                self.current = None;
                return Err(MemoryRowsError::Injected(message.clone()));
            }
        }
        self.current = self.pending.pop_front();
        if self.current.is_some() {
            self.delivered += 1;
        }
        Ok(self.current.is_some())
    }

    fn value(&self, index: usize) -> Result<Value<'_>, Self::Error> {
        let row = self.current.as_ref().ok_or(MemoryRowsError::NoCurrentRow)?;
        row.get(index)
            .map(Value::reborrow)
            .ok_or(MemoryRowsError::ColumnOutOfRange { index, width: row.len() })
    }
}
