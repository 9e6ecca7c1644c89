use std::fmt;

/// Annotation value that excludes a field from mapping.
pub const IGNORE_MARKER: &str = "-";

/// Base type of a destination slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    Int64,
    String,
    Float64,
    Bool,
    Bytes,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Int64 => write!(f, "int64"),
            BaseType::String => write!(f, "string"),
            BaseType::Float64 => write!(f, "float64"),
            BaseType::Bool => write!(f, "bool"),
            BaseType::Bytes => write!(f, "bytes"),
        }
    }
}

/// Storage of a single slot: its base type and whether it can hold "no value".
///
/// `is_reference = true` is the `Option<_>` form: NULL maps to `None`
/// instead of the base type's zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotType {
    pub base: BaseType,
    pub is_reference: bool,
}

impl SlotType {
    pub const fn owned(base: BaseType) -> Self {
        Self { base, is_reference: false }
    }

    pub const fn reference(base: BaseType) -> Self {
        Self { base, is_reference: true }
    }
}

/// One column of the active result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnDescriptor {
    /// Ordinal position in the row.
    pub index: usize,
    pub name: String,
}

impl ColumnDescriptor {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self { index, name: name.into() }
    }

    /// Descriptors for `names`, numbered in order.
    pub fn from_names<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().enumerate().map(|(i, n)| Self::new(i, n)).collect()
    }
}

/// Declared metadata of one struct field, before key resolution.
///
/// Produced by `#[derive(Record)]` or written by hand. The Shape Inspector
/// turns it into a [`FieldDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared field name (`r#` prefix already stripped).
    pub name: &'static str,
    /// Explicit mapping annotation. [`IGNORE_MARKER`] excludes the field.
    pub tag: Option<&'static str>,
    /// Any `pub` visibility. Private fields are never mapped.
    pub exported: bool,
    /// `None` when the field type has no slot form; such fields are ignored.
    pub slot: Option<SlotType>,
}

impl FieldSpec {
    /// Public field of slot type `T`, keyed by its lowercased name.
    pub fn of<T: crate::Slot>(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            exported: true,
            slot: Some(T::TYPE),
        }
    }

    /// Field whose type the marshaller cannot write.
    pub fn unsupported(name: &'static str) -> Self {
        Self {
            name,
            tag: None,
            exported: true,
            slot: None,
        }
    }

    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }
}

/// One struct field after key resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Position in declaration order; the index passed to `Record::set`.
    pub index: usize,
    pub name: &'static str,
    pub mapping_key: String,
    pub slot: Option<SlotType>,
    pub ignored: bool,
}

/// Top-level classification of a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Scalar,
    ScalarSlice,
    Struct,
    StructSlice,
}

impl ShapeKind {
    /// Slice kinds append one element per row; the others take the first row only.
    pub fn is_slice(self) -> bool {
        matches!(self, ShapeKind::ScalarSlice | ShapeKind::StructSlice)
    }

    pub fn is_struct(self) -> bool {
        matches!(self, ShapeKind::Struct | ShapeKind::StructSlice)
    }
}

/// Resolved shape of one destination. Built once per `select` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationDescriptor {
    /// Rust type name of the destination, for error messages.
    pub type_name: &'static str,
    pub kind: ShapeKind,
    /// Slice elements are `Box<_>` / `Option<_>` rather than owned values.
    pub element_is_reference: bool,
    /// The single slot of Scalar/ScalarSlice destinations.
    pub slot: Option<SlotType>,
    /// Field catalog, empty unless `kind.is_struct()`.
    pub fields: Vec<FieldDescriptor>,
}
