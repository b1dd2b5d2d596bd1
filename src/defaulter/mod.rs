//! One-shot reset of an object's fields to resolver defaults.
//!
//! Unlike `FieldTracker::assign_defaults`, this overwrites current values
//! unconditionally and bypasses dirty semantics entirely. Great care should
//! be taken: every eligible slot at the chosen level is replaced.

use crate::core::{FieldError, FieldLevel, FieldMode, IgnoreReason, Result};
use crate::defaults::DefaultResolver;

/// Implemented by objects that expose their declared field layout.
pub trait FieldLevels {
    /// The field layout per declaring level, most-derived level first.
    fn field_levels(&self) -> Vec<FieldLevel>;
}

/// Resets every eligible field of the object's most-derived level to the
/// stock resolver defaults.
pub fn set_object_defaults<T: FieldLevels + ?Sized>(object: &T) -> Result<()> {
    set_object_defaults_with(object, &DefaultResolver::new(), None)
}

/// Resets every eligible field declared at `level` (the most-derived level
/// when `None`) using the given resolver.
///
/// Fails with `TypeMismatch`, before any mutation, if `level` names no
/// declaring level of the object. Constant and shared fields are left
/// alone, as are self-typed slots; primitive slots are reset like any
/// other. A slot that cannot be written is logged and skipped; a resolver
/// failure is fatal and propagates.
pub fn set_object_defaults_with<T: FieldLevels + ?Sized>(
    object: &T,
    resolver: &DefaultResolver,
    level: Option<&str>,
) -> Result<()> {
    let levels = object.field_levels();
    let target = match level {
        Some(name) => levels.iter().find(|l| l.name() == name).ok_or_else(|| {
            FieldError::TypeMismatch(format!("Level '{}' is not declared by this object", name))
        })?,
        None => match levels.first() {
            Some(first) => first,
            None => return Ok(()),
        },
    };

    for descriptor in target.fields() {
        if matches!(
            descriptor.mode,
            FieldMode::Ignored(IgnoreReason::Constant)
                | FieldMode::Ignored(IgnoreReason::Shared)
                | FieldMode::Ignored(IgnoreReason::SelfTyped)
        ) {
            continue;
        }
        let default = resolver.default_for(&descriptor.tag)?;
        if let Err(e) = descriptor.slot.set(default) {
            log::warn!(
                "Unable to set default value for field '{}' at level '{}': {}",
                descriptor.name,
                target.name(),
                e
            );
        }
    }
    Ok(())
}
