//! Applies one tracker operation uniformly across all the per-level
//! trackers an object declares.
//!
//! Instead of crawling type metadata at runtime, the owning type exposes a
//! fixed, ordered list of its trackers via [`TrackerHierarchy`]; the
//! operations here iterate that list directly.

use crate::core::Result;
use crate::tracker::FieldTracker;

/// Implemented by objects whose declaring levels embed trackers.
pub trait TrackerHierarchy {
    /// The object's per-level trackers, most-derived level first. `None`
    /// marks a level that declares no tracker; such levels are skipped.
    /// Each level holds at most one tracker by construction.
    fn tracker_levels(&mut self) -> Vec<Option<&mut FieldTracker>>;
}

/// Turns null mode on for every tracker in the object's hierarchy.
/// Idempotent; dirty flags are never touched.
pub fn activate<T: TrackerHierarchy + ?Sized>(object: &mut T) {
    set_null_status(object, true);
}

/// Turns null mode off for every tracker in the object's hierarchy.
/// The proper inverse of [`activate`] with respect to null mode.
pub fn deactivate<T: TrackerHierarchy + ?Sized>(object: &mut T) {
    set_null_status(object, false);
}

/// Runs `assign_defaults` on every tracker in the object's hierarchy.
pub fn assign_defaults_to_hierarchy<T: TrackerHierarchy + ?Sized>(object: &mut T) -> Result<()> {
    for tracker in object.tracker_levels().into_iter().flatten() {
        tracker.assign_defaults()?;
    }
    Ok(())
}

fn set_null_status<T: TrackerHierarchy + ?Sized>(object: &mut T, status: bool) {
    for tracker in object.tracker_levels().into_iter().flatten() {
        tracker.set_null_mode(status);
    }
}
