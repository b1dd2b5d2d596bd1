mod field_tracker;

pub use field_tracker::FieldTracker;
