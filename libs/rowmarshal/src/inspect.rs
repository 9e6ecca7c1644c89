use std::collections::HashMap;

use crate::error::MarshalError;
use crate::schema::{DestinationDescriptor, FieldDescriptor, FieldSpec, IGNORE_MARKER, ShapeKind};
use crate::target::{Destination, Shape, Target};

/// Resolve the destination handle and its shape.
///
/// Fails with `InvalidDestinationKind` for destinations passed by value.
pub fn inspect<D: Destination>(
    destination: &mut D,
) -> Result<(&mut D::Target, DestinationDescriptor), MarshalError> {
    let target = destination.target().ok_or(MarshalError::InvalidDestinationKind {
        destination: std::any::type_name::<D::Target>(),
        reason: "passed by value, pass a mutable reference",
    })?;
    let descriptor = describe::<D::Target>()?;
    Ok((target, descriptor))
}

/// Classify `T` and build its field catalog.
pub fn describe<T: Target>() -> Result<DestinationDescriptor, MarshalError> {
    let type_name = std::any::type_name::<T>();
    let descriptor = match T::shape() {
        Shape::Scalar(slot) => DestinationDescriptor {
            type_name,
            kind: ShapeKind::Scalar,
            element_is_reference: false,
            slot: Some(slot),
            fields: Vec::new(),
        },
        Shape::ScalarSlice(slot) => DestinationDescriptor {
            type_name,
            kind: ShapeKind::ScalarSlice,
            element_is_reference: slot.is_reference,
            slot: Some(slot),
            fields: Vec::new(),
        },
        Shape::Struct(fields) => DestinationDescriptor {
            type_name,
            kind: ShapeKind::Struct,
            element_is_reference: false,
            slot: None,
            fields: catalog(fields)?,
        },
        Shape::StructSlice { by_reference, fields } => DestinationDescriptor {
            type_name,
            kind: ShapeKind::StructSlice,
            element_is_reference: by_reference,
            slot: None,
            fields: catalog(fields)?,
        },
    };
    Ok(descriptor)
}

/// Resolve mapping keys: explicit tag, else the lowercased field name.
/// Private fields, fields tagged with the ignore marker and fields without
/// a slot type are ignored.
pub fn catalog(specs: Vec<FieldSpec>) -> Result<Vec<FieldDescriptor>, MarshalError> {
    let mut seen: HashMap<String, &'static str> = HashMap::new();
    let mut fields = Vec::with_capacity(specs.len());

    for (index, spec) in specs.into_iter().enumerate() {
        let tag = spec.tag.filter(|t| !t.is_empty());
        let ignored = !spec.exported || spec.slot.is_none() || tag == Some(IGNORE_MARKER);
        let mapping_key = match tag {
            Some(tag) if tag != IGNORE_MARKER => tag.to_string(),
            _ => spec.name.to_lowercase(),
        };

        if !ignored {
            if let Some(first) = seen.insert(mapping_key.clone(), spec.name) {
                return Err(MarshalError::DuplicateMappingKey {
                    key: mapping_key,
                    first,
                    second: spec.name,
                });
            }
        }

        fields.push(FieldDescriptor {
            index,
            name: spec.name,
            mapping_key,
            slot: spec.slot,
            ignored,
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BaseType, SlotType};

    #[test]
    fn keys_resolve_tag_then_lowercase_name() {
        let fields = catalog(vec![
            FieldSpec::of::<i64>("UserId"),
            FieldSpec::of::<String>("name").tagged("display_name"),
            FieldSpec::of::<String>("empty").tagged(""),
        ])
        .unwrap();

        let keys: Vec<_> = fields.iter().map(|f| f.mapping_key.as_str()).collect();
        assert_eq!(keys, ["userid", "display_name", "empty"]);
        assert!(fields.iter().all(|f| !f.ignored));
    }

    #[test]
    fn ignored_fields() {
        let fields = catalog(vec![
            FieldSpec::of::<String>("hidden").private(),
            FieldSpec::of::<i64>("skipped").tagged(IGNORE_MARKER),
            FieldSpec::unsupported("when"),
            FieldSpec::of::<Option<f64>>("d_p"),
        ])
        .unwrap();

        let ignored: Vec<_> = fields.iter().map(|f| f.ignored).collect();
        assert_eq!(ignored, [true, true, true, false]);
        assert_eq!(fields[3].slot, Some(SlotType::reference(BaseType::Float64)));
    }

    #[test]
    fn duplicate_keys() {
        let err = catalog(vec![
            FieldSpec::of::<i64>("a"),
            FieldSpec::of::<i64>("other").tagged("a"),
        ])
        .unwrap_err();

        match err {
            MarshalError::DuplicateMappingKey { key, first, second } => {
                assert_eq!(key, "a");
                assert_eq!(first, "a");
                assert_eq!(second, "other");
            }
            other => panic!("expected DuplicateMappingKey, got {other:?}"),
        }
    }

    #[test]
    fn ignored_fields_may_share_keys() {
        let fields = catalog(vec![
            FieldSpec::of::<i64>("a"),
            FieldSpec::of::<i64>("A").private(),
        ])
        .unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn classifies_scalars_and_slices() {
        let scalar = describe::<i64>().unwrap();
        assert_eq!(scalar.kind, ShapeKind::Scalar);
        assert_eq!(scalar.slot, Some(SlotType::owned(BaseType::Int64)));

        let refs = describe::<Vec<Option<f64>>>().unwrap();
        assert_eq!(refs.kind, ShapeKind::ScalarSlice);
        assert!(refs.element_is_reference);

        let bytes = describe::<Vec<u8>>().unwrap();
        assert_eq!(bytes.kind, ShapeKind::Scalar);
        assert_eq!(bytes.slot, Some(SlotType::owned(BaseType::Bytes)));

        let blobs = describe::<Vec<Vec<u8>>>().unwrap();
        assert_eq!(blobs.kind, ShapeKind::ScalarSlice);
        assert!(!blobs.element_is_reference);
    }

    #[test]
    fn owned_destination_is_rejected() {
        let mut value = 0_i64;
        assert!(inspect(&mut &mut value).is_ok());

        let mut owned = 0_i64;
        let err = inspect(&mut owned).unwrap_err();
        assert!(matches!(err, MarshalError::InvalidDestinationKind { .. }));
    }
}
