//! Slot types: what a single cell can be written into.
//!
//! A plain base type takes NULL as its zero value. The `Option<_>` form takes
//! NULL as `None`, always, whatever it held before; a non-NULL cell becomes a
//! freshly built `Some`.

use crate::coerce::Coerce;
use crate::error::ConversionError;
use crate::schema::SlotType;
use crate::value::Value;

pub trait Slot: Sized {
    const TYPE: SlotType;

    fn from_value(value: Value<'_>) -> Result<Self, ConversionError>;
}

macro_rules! impl_slot {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Slot for $ty {
                const TYPE: SlotType = SlotType::owned(<$ty as Coerce>::BASE);

                fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
                    match value {
                        Value::Null => Ok(<$ty>::default()),
                        value => <$ty as Coerce>::coerce(value),
                    }
                }
            }

            impl Slot for Option<$ty> {
                const TYPE: SlotType = SlotType::reference(<$ty as Coerce>::BASE);

                fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
                    match value {
                        Value::Null => Ok(None),
                        value => <$ty as Coerce>::coerce(value).map(Some),
                    }
                }
            }
        )*
    };
}

impl_slot!(i64, String, f64, bool, Vec<u8>);
