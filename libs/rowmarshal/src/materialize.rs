use crate::error::{ConversionError, MarshalError};
use crate::mapping::{Binding, BindingPlan, BindingTarget};
use crate::slot::Slot;
use crate::target::Record;
use crate::value::Row;

/// Write every bound cell of `row` into `record`. Stops at the first failed cell;
/// fields written before it keep their new values.
pub fn fill_record<R: Record>(record: &mut R, row: Row<'_>, plan: &BindingPlan) -> Result<(), MarshalError> {
    for (binding, value) in plan.bindings.iter().zip(row.0) {
        if let BindingTarget::Field { index, .. } = binding.target {
            record
                .set(index, value)
                .map_err(|source| conversion_error(binding, source))?;
        }
    }
    Ok(())
}

/// Build a scalar slot from the single cell of `row`.
///
/// A plan without a binding, or a row without a cell, reports the plan's
/// column count.
pub fn scalar<S: Slot>(row: Row<'_>, plan: &BindingPlan) -> Result<S, MarshalError> {
    let (binding, value) = plan
        .bindings
        .first()
        .zip(row.0.into_iter().next())
        .ok_or(MarshalError::ColumnCountMismatch {
            destination: std::any::type_name::<S>(),
            columns: plan.len(),
        })?;
    S::from_value(value).map_err(|source| conversion_error(binding, source))
}

fn conversion_error(binding: &Binding, source: ConversionError) -> MarshalError {
    MarshalError::UnsupportedConversion {
        column: binding.column.name.clone(),
        field: binding.label(),
        source,
    }
}
