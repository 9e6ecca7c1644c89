use crate::error::MarshalError;
use crate::inspect::inspect;
use crate::mapping::{self, BindingPlan};
use crate::source::RowSource;
use crate::target::{Destination, Target};
use crate::value::Row;

/// Copy the rows of `rows` into `destination`.
///
/// - Scalar and struct destinations take the first row; zero rows leave them untouched.
/// - `Vec` destinations get one new element per row, in row order.
///
/// On error, elements already appended stay in the destination.
///
/// ```
/// use rowmarshal::memory::MemoryRows;
///
/// let rows = MemoryRows::new(["a"]).row([1_i64.into()]).row([2_i64.into()]);
/// let mut ids: Vec<i64> = Vec::new();
/// rowmarshal::select(&mut ids, rows).unwrap();
/// assert_eq!(ids, [1, 2]);
/// ```
pub fn select<D, S>(mut destination: D, mut rows: S) -> Result<(), MarshalError>
where
    D: Destination,
    S: RowSource,
{
    let (target, descriptor) = inspect(&mut destination)?;
    let columns = rows.columns().map_err(|e| MarshalError::row_source(0, e))?;
    let plan = mapping::plan(&descriptor, &columns)?;

    tracing::debug!(
        destination = descriptor.type_name,
        kind = ?descriptor.kind,
        columns = plan.len(),
        "binding plan resolved"
    );

    let mut count = 0;
    while rows.advance().map_err(|e| MarshalError::row_source(count, e))? {
        let row = read_row(&rows, &plan, count)?;
        target.materialize(row, &plan)?;
        count += 1;
        if !descriptor.kind.is_slice() {
            break;
        }
    }

    tracing::trace!(destination = descriptor.type_name, rows = count, "rows materialized");
    Ok(())
}

fn read_row<'r, S: RowSource>(rows: &'r S, plan: &BindingPlan, ordinal: usize) -> Result<Row<'r>, MarshalError> {
    plan.bindings
        .iter()
        .map(|b| rows.value(b.column.index).map_err(|e| MarshalError::row_source(ordinal, e)))
        .collect::<Result<Vec<_>, _>>()
        .map(Row)
}
