//! Decoded directory objects.
//!
//! A decoder turns the untyped parse tree into these types. Attribute
//! values start out as [`Value::Raw`] and are converted by the
//! normalization pass.

mod attribute;
mod component;
mod parameter;
mod value;

pub use attribute::Attribute;
pub use component::{Component, InvalidAttribute, InvalidLine};
pub use parameter::Parameters;
pub use value::{DateTimeValue, TimeValue, Value, ValueType, Zone};
