use std::collections::HashMap;

use crate::error::MarshalError;
use crate::schema::{ColumnDescriptor, DestinationDescriptor, FieldDescriptor};

/// Where one column's cells are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingTarget {
    /// Field at `index` of a struct destination.
    Field { index: usize, name: &'static str },
    /// The single slot of a scalar destination.
    Scalar { destination: &'static str },
}

/// One column → slot link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub column: ColumnDescriptor,
    pub target: BindingTarget,
}

impl Binding {
    /// Field name (or scalar type name) used in conversion errors.
    pub fn label(&self) -> &'static str {
        match self.target {
            BindingTarget::Field { name, .. } => name,
            BindingTarget::Scalar { destination } => destination,
        }
    }
}

/// Column → slot assignment for one query. Built once, reused for every row.
///
/// `bindings[i]` belongs to `Row.0[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPlan {
    pub bindings: Vec<Binding>,
}

impl BindingPlan {
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Match result columns against the destination.
///
/// - Scalar kinds: exactly one column.
/// - Struct kinds: every column must hit a non-ignored field by exact,
///   case-sensitive mapping key. Fields without a column are left alone.
pub fn plan(
    descriptor: &DestinationDescriptor,
    columns: &[ColumnDescriptor],
) -> Result<BindingPlan, MarshalError> {
    if !descriptor.kind.is_struct() {
        if columns.len() != 1 {
            return Err(MarshalError::ColumnCountMismatch {
                destination: descriptor.type_name,
                columns: columns.len(),
            });
        }
        return Ok(BindingPlan {
            bindings: vec![Binding {
                column: columns[0].clone(),
                target: BindingTarget::Scalar { destination: descriptor.type_name },
            }],
        });
    }

    let by_key: HashMap<&str, &FieldDescriptor> = descriptor
        .fields
        .iter()
        .filter(|f| !f.ignored)
        .map(|f| (f.mapping_key.as_str(), f))
        .collect();

    let mut bindings = Vec::with_capacity(columns.len());
    for column in columns {
        let field = by_key.get(column.name.as_str()).ok_or_else(|| MarshalError::UnmappedColumn {
            column: column.name.clone(),
            destination: descriptor.type_name,
        })?;
        bindings.push(Binding {
            column: column.clone(),
            target: BindingTarget::Field { index: field.index, name: field.name },
        });
    }

    for field in unbound_fields(descriptor, columns) {
        tracing::trace!(
            destination = descriptor.type_name,
            field = field.name,
            key = %field.mapping_key,
            "no column for field, left untouched"
        );
    }

    Ok(BindingPlan { bindings })
}

/// Mapped fields with no column in `columns`, in declaration order.
pub fn unbound_fields<'d>(
    descriptor: &'d DestinationDescriptor,
    columns: &[ColumnDescriptor],
) -> Vec<&'d FieldDescriptor> {
    descriptor
        .fields
        .iter()
        .filter(|f| !f.ignored && !columns.iter().any(|c| c.name == f.mapping_key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BaseType, ShapeKind, SlotType};

    fn field(index: usize, name: &'static str, key: &str, ignored: bool) -> FieldDescriptor {
        FieldDescriptor {
            index,
            name,
            mapping_key: key.to_string(),
            slot: Some(SlotType::owned(BaseType::Int64)),
            ignored,
        }
    }

    fn record(fields: Vec<FieldDescriptor>) -> DestinationDescriptor {
        DestinationDescriptor {
            type_name: "Row",
            kind: ShapeKind::Struct,
            element_is_reference: false,
            slot: None,
            fields,
        }
    }

    fn scalar() -> DestinationDescriptor {
        DestinationDescriptor {
            type_name: "i64",
            kind: ShapeKind::ScalarSlice,
            element_is_reference: false,
            slot: Some(SlotType::owned(BaseType::Int64)),
            fields: Vec::new(),
        }
    }

    #[test]
    fn binds_columns_in_result_order() {
        let descriptor = record(vec![field(0, "a", "a", false), field(1, "b", "b", false)]);
        let plan = plan(&descriptor, &ColumnDescriptor::from_names(["b", "a"])).unwrap();

        let targets: Vec<_> = plan.bindings.iter().map(|b| b.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                BindingTarget::Field { index: 1, name: "b" },
                BindingTarget::Field { index: 0, name: "a" },
            ]
        );
    }

    #[test]
    fn unmapped_column() {
        let descriptor = record(vec![field(0, "a", "a", false)]);
        let err = plan(&descriptor, &ColumnDescriptor::from_names(["a", "zzz"])).unwrap_err();
        assert!(matches!(err, MarshalError::UnmappedColumn { ref column, .. } if column == "zzz"));
    }

    #[test]
    fn match_is_case_sensitive() {
        let descriptor = record(vec![field(0, "a", "a", false)]);
        let err = plan(&descriptor, &ColumnDescriptor::from_names(["A"])).unwrap_err();
        assert!(matches!(err, MarshalError::UnmappedColumn { .. }));
    }

    #[test]
    fn ignored_fields_do_not_match() {
        let descriptor = record(vec![field(0, "ignore", "ignore", true)]);
        let err = plan(&descriptor, &ColumnDescriptor::from_names(["ignore"])).unwrap_err();
        assert!(matches!(err, MarshalError::UnmappedColumn { .. }));
    }

    #[test]
    fn missing_columns_are_fine() {
        let descriptor = record(vec![field(0, "a", "a", false), field(1, "b", "b", false)]);
        let plan = plan(&descriptor, &ColumnDescriptor::from_names(["b"])).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn unbound_fields_in_declaration_order() {
        let descriptor = record(vec![
            field(0, "d", "d", false),
            field(1, "c", "c", false),
            field(2, "b", "b", true),
            field(3, "a", "a", false),
            field(4, "e", "e", false),
        ]);
        let columns = ColumnDescriptor::from_names(["c"]);

        let names: Vec<_> = unbound_fields(&descriptor, &columns).iter().map(|f| f.name).collect();
        assert_eq!(names, ["d", "a", "e"]);
    }

    #[test]
    fn scalar_needs_exactly_one_column() {
        let ok = plan(&scalar(), &ColumnDescriptor::from_names(["a"])).unwrap();
        assert_eq!(ok.bindings[0].label(), "i64");

        for names in [vec![], vec!["a", "b"]] {
            let err = plan(&scalar(), &ColumnDescriptor::from_names(names)).unwrap_err();
            assert!(matches!(err, MarshalError::ColumnCountMismatch { .. }));
        }
    }
}
