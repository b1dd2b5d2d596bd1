// ============================================================================
// fieldtrack Library
// ============================================================================

//! Field-state tracking and typed default resolution.
//!
//! A [`FieldTracker`] keeps per-field dirty flags for one declaring level of
//! an object, so the object can retain the difference between "never set"
//! and "set to its natural default". In null mode, non-dirty fields read as
//! [`Value::Null`] no matter what they store. A [`DefaultResolver`] maps
//! declared field types to canonical default values, with per-instance
//! provider overrides.
//!
//! The owning type registers its fields explicitly as a [`FieldLevel`] of
//! [`Slot`] handles and routes its accessors through the tracker:
//!
//! ```
//! use fieldtrack::{FieldLevel, FieldTracker, Slot, TypeTag, Value};
//!
//! struct Order {
//!     quantity: Slot,
//!     note: Slot,
//!     tracker: FieldTracker,
//! }
//!
//! impl Order {
//!     fn new() -> Self {
//!         let quantity = Slot::new(Value::Integer(5));
//!         let note = Slot::null();
//!         let level = FieldLevel::new("Order")
//!             .tracked("quantity", TypeTag::Integer, quantity.clone())
//!             .tracked("note", TypeTag::Text, note.clone());
//!         let tracker = FieldTracker::new(&level);
//!         Self { quantity, note, tracker }
//!     }
//! }
//!
//! # fn main() -> fieldtrack::Result<()> {
//! let mut order = Order::new();
//! assert!(!order.tracker.is_dirty("quantity"));
//! assert_eq!(order.quantity.get()?, Value::Integer(5));
//!
//! order.tracker.set_value("note", Value::from("rush"))?;
//! assert!(order.tracker.is_dirty("note"));
//! assert_eq!(order.note.get()?, Value::from("rush"));
//!
//! // Null mode: non-dirty fields read as absent, dirty ones keep reading.
//! order.tracker.set_null_mode(true);
//! assert_eq!(order.tracker.get_value("quantity", Value::Null)?, Value::Null);
//! assert_eq!(order.tracker.get_value("note", Value::Null)?, Value::from("rush"));
//! # Ok(())
//! # }
//! ```
//!
//! The `hierarchy` module applies one tracker operation across all of an
//! object's declaring levels; the `defaulter` module performs raw,
//! non-tracked resets of a level's slots to resolver defaults.

pub mod core;
pub mod defaults;
pub mod defaulter;
pub mod hierarchy;
pub mod tracker;

// Re-export main types for convenience
pub use crate::core::{
    Decimal, DefaultFn, EnumSpec, FieldDescriptor, FieldError, FieldLevel, FieldMode,
    IgnoreReason, Money, ObjectSpec, Result, Slot, TypeTag, Value,
};
pub use crate::defaults::{DefaultResolver, Provider};
pub use crate::defaulter::{FieldLevels, set_object_defaults, set_object_defaults_with};
pub use crate::hierarchy::{TrackerHierarchy, activate, assign_defaults_to_hierarchy, deactivate};
pub use crate::tracker::FieldTracker;
