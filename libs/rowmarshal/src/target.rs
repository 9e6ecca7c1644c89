use crate::error::{ConversionError, MarshalError};
use crate::mapping::BindingPlan;
use crate::materialize;
use crate::schema::{FieldSpec, SlotType};
use crate::slot::Slot;
use crate::value::{Row, Value};

/// Static shape of a destination type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Scalar(SlotType),
    ScalarSlice(SlotType),
    Struct(Vec<FieldSpec>),
    StructSlice {
        by_reference: bool,
        fields: Vec<FieldSpec>,
    },
}

/// Static shape of one slice element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementShape {
    Scalar(SlotType),
    Struct {
        by_reference: bool,
        fields: Vec<FieldSpec>,
    },
}

/// A value rows can be written into.
pub trait Target {
    fn shape() -> Shape;

    /// Write one row. Slices append, everything else overwrites in place.
    fn materialize(&mut self, row: Row<'_>, plan: &BindingPlan) -> Result<(), MarshalError>;
}

/// A value built from exactly one row, to be appended to a `Vec`.
pub trait Element: Sized {
    fn element_shape() -> ElementShape;

    fn from_row(row: Row<'_>, plan: &BindingPlan) -> Result<Self, MarshalError>;
}

/// A struct whose fields map to columns. Usually derived with `#[derive(Record)]`.
pub trait Record: Default {
    /// Declared fields, in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Write `value` into the field at `index` (position in [`Record::fields`]).
    /// Indexes of ignored fields are never passed.
    fn set(&mut self, index: usize, value: Value<'_>) -> Result<(), ConversionError>;
}

/// What the caller hands to [`select`](crate::select).
///
/// Only `&mut T` is writable. Owned values are accepted by the type system
/// but rejected at run time: nothing written to them would reach the caller.
pub trait Destination {
    type Target: Target;

    fn target(&mut self) -> Option<&mut Self::Target>;
}

impl<T: Target> Destination for &mut T {
    type Target = T;

    fn target(&mut self) -> Option<&mut T> {
        Some(&mut **self)
    }
}

macro_rules! impl_scalar_target {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Target for $ty {
                fn shape() -> Shape {
                    Shape::Scalar(<$ty as Slot>::TYPE)
                }

                fn materialize(&mut self, row: Row<'_>, plan: &BindingPlan) -> Result<(), MarshalError> {
                    *self = materialize::scalar(row, plan)?;
                    Ok(())
                }
            }

            impl Element for $ty {
                fn element_shape() -> ElementShape {
                    ElementShape::Scalar(<$ty as Slot>::TYPE)
                }

                fn from_row(row: Row<'_>, plan: &BindingPlan) -> Result<Self, MarshalError> {
                    materialize::scalar(row, plan)
                }
            }

            impl Destination for $ty {
                type Target = Self;

                fn target(&mut self) -> Option<&mut Self> {
                    None
                }
            }
        )*
    };
}

impl_scalar_target!(
    i64,
    String,
    f64,
    bool,
    Vec<u8>,
    Option<i64>,
    Option<String>,
    Option<f64>,
    Option<bool>,
    Option<Vec<u8>>,
);

impl<E: Element> Target for Vec<E> {
    fn shape() -> Shape {
        match E::element_shape() {
            ElementShape::Scalar(slot) => Shape::ScalarSlice(slot),
            ElementShape::Struct { by_reference, fields } => Shape::StructSlice { by_reference, fields },
        }
    }

    fn materialize(&mut self, row: Row<'_>, plan: &BindingPlan) -> Result<(), MarshalError> {
        let element = E::from_row(row, plan)?;
        self.push(element);
        Ok(())
    }
}

impl<E: Element> Destination for Vec<E> {
    type Target = Self;

    fn target(&mut self) -> Option<&mut Self> {
        None
    }
}

impl<R: Record> Element for Box<R> {
    fn element_shape() -> ElementShape {
        ElementShape::Struct {
            by_reference: true,
            fields: R::fields(),
        }
    }

    fn from_row(row: Row<'_>, plan: &BindingPlan) -> Result<Self, MarshalError> {
        let mut record = Box::<R>::default();
        materialize::fill_record(record.as_mut(), row, plan)?;
        Ok(record)
    }
}

/// Implement [`Target`], [`Element`] and [`Destination`] for a hand-written [`Record`].
///
/// `#[derive(Record)]` emits the same impls itself.
#[macro_export]
macro_rules! record_target {
    ($ty:ty) => {
        impl $crate::Target for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::Struct(<$ty as $crate::Record>::fields())
            }

            fn materialize(
                &mut self,
                row: $crate::Row<'_>,
                plan: &$crate::BindingPlan,
            ) -> ::std::result::Result<(), $crate::MarshalError> {
                $crate::materialize::fill_record(self, row, plan)
            }
        }

        impl $crate::Element for $ty {
            fn element_shape() -> $crate::ElementShape {
                $crate::ElementShape::Struct {
                    by_reference: false,
                    fields: <$ty as $crate::Record>::fields(),
                }
            }

            fn from_row(
                row: $crate::Row<'_>,
                plan: &$crate::BindingPlan,
            ) -> ::std::result::Result<Self, $crate::MarshalError> {
                let mut record = <$ty as ::std::default::Default>::default();
                $crate::materialize::fill_record(&mut record, row, plan)?;
                Ok(record)
            }
        }

        impl $crate::Destination for $ty {
            type Target = Self;

            fn target(&mut self) -> ::std::option::Option<&mut Self> {
                None
            }
        }
    };
}
