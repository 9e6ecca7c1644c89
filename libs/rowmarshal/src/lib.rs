//! Marshal query results into typed Rust destinations.
//!
//! A destination is a `&mut` to one of:
//!
//! - a scalar: `i64`, `String`, `f64`, `bool`, `Vec<u8>`, or `Option` of those
//! - a struct deriving [`Record`]
//! - a `Vec` of scalars, of records, or of `Box`ed records
//!
//! ```
//! use rowmarshal::{Record, memory::MemoryRows};
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! struct Item {
//!     pub id: i64,
//!     #[column(name = "label")]
//!     pub name: Option<String>,
//! }
//!
//! let rows = MemoryRows::new(["id", "label"])
//!     .row([1_i64.into(), "one".into()])
//!     .row([2_i64.into(), rowmarshal::Value::Null]);
//!
//! let mut items: Vec<Item> = Vec::new();
//! rowmarshal::select(&mut items, rows).unwrap();
//! assert_eq!(items[1], Item { id: 2, name: None });
//! ```

extern crate self as rowmarshal;

pub use rowmarshal_derive::Record;

pub mod coerce;
pub mod error;
pub mod inspect;
pub mod mapping;
pub mod materialize;
pub mod memory;
pub mod schema;
pub mod select;
pub mod slot;
pub mod source;
pub mod target;
pub mod value;

pub use error::{ConversionError, ConversionFailure, MarshalError};
pub use mapping::{Binding, BindingPlan, BindingTarget};
pub use schema::{
    BaseType, ColumnDescriptor, DestinationDescriptor, FieldDescriptor, FieldSpec, ShapeKind, SlotType,
};
pub use select::select;
pub use slot::Slot;
pub use source::RowSource;
pub use target::{Destination, Element, ElementShape, Record, Shape, Target};
pub use value::{Row, Value, ValueKind};
