mod error;
mod types;
mod value;

pub use error::{FieldError, Result};
pub use types::{
    DefaultFn, EnumSpec, FieldDescriptor, FieldLevel, FieldMode, IgnoreReason, ObjectSpec, Slot,
    TypeTag,
};
pub use value::{Decimal, Money, Value};
