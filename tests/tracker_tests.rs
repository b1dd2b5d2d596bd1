use chrono::{NaiveDate, NaiveDateTime};
use fieldtrack::{
    FieldLevel, FieldTracker, IgnoreReason, ObjectSpec, Slot, TrackerHierarchy, TypeTag, Value,
    activate, deactivate,
};
use fieldtrack::{FieldError, Result};
use std::collections::BTreeMap;

static DATE_TIME: ObjectSpec = ObjectSpec {
    name: "DateTime",
    default: None,
};

fn signup_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2013, 3, 7)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Test double in the shape the tracker is meant for: the owning struct
/// keeps the slots, embeds one tracker, and routes accessors through it.
struct Customer {
    id: Slot,
    active: Slot,
    age: Slot,
    signup: Slot,
    verified: Slot,
    note: Slot,
    nickname: Slot,
    tags: Slot,
    attrs: Slot,
    tracker: FieldTracker,
}

impl Customer {
    fn new(
        age: i64,
        signup: NaiveDateTime,
        active: bool,
        verified: bool,
        note: Option<&str>,
    ) -> Result<Self> {
        let id = Slot::new(Value::Integer(1));
        let active_slot = Slot::new(Value::Boolean(active));
        let age_slot = Slot::new(Value::Integer(age));
        let signup_slot = Slot::new(Value::Timestamp(signup));
        let verified_slot = Slot::new(Value::Boolean(verified));
        let note_slot = Slot::null();
        let nickname = Slot::null();
        let tags = Slot::new(Value::List(Vec::new()));
        let attrs = Slot::new(Value::Map(BTreeMap::new()));

        let level = FieldLevel::new("Customer")
            .ignored("id", TypeTag::Long, id.clone(), IgnoreReason::Shared)
            .ignored(
                "active",
                TypeTag::Boolean,
                active_slot.clone(),
                IgnoreReason::Primitive,
            )
            .tracked("age", TypeTag::Integer, age_slot.clone())
            .tracked("signup", TypeTag::Object(&DATE_TIME), signup_slot.clone())
            .tracked("verified", TypeTag::Boolean, verified_slot.clone())
            .tracked("note", TypeTag::Text, note_slot.clone())
            .tracked("nickname", TypeTag::Text, nickname.clone())
            .tracked("tags", TypeTag::List, tags.clone())
            .tracked("attrs", TypeTag::Map, attrs.clone());

        let mut tracker = FieldTracker::new(&level);
        let note_value = note.map(Value::from).unwrap_or(Value::Null);
        tracker.set_value_or("note", note_value, Value::from("standard"))?;

        Ok(Self {
            id,
            active: active_slot,
            age: age_slot,
            signup: signup_slot,
            verified: verified_slot,
            note: note_slot,
            nickname,
            tags,
            attrs,
            tracker,
        })
    }

    fn age(&self) -> Value {
        self.tracker.get_value("age", Value::Null).unwrap()
    }

    fn signup(&self) -> Value {
        self.tracker.get_value("signup", Value::Null).unwrap()
    }

    fn note(&self) -> Value {
        self.tracker.get_value("note", Value::Null).unwrap()
    }

    fn id(&self) -> Value {
        self.tracker.get_value("id", Value::Null).unwrap()
    }
}

impl TrackerHierarchy for Customer {
    fn tracker_levels(&mut self) -> Vec<Option<&mut FieldTracker>> {
        vec![Some(&mut self.tracker)]
    }
}

fn customer() -> Customer {
    Customer::new(10, signup_date(), true, true, None).unwrap()
}

#[test]
fn test_fields_non_dirty_after_construction() {
    let c = customer();
    for name in ["age", "signup", "verified", "note", "nickname", "tags", "attrs"] {
        assert!(!c.tracker.is_dirty(name), "field '{}' dirty", name);
    }
    // The constructor substituted the default for a null note without marking.
    assert_eq!(c.note(), Value::from("standard"));
}

#[test]
fn test_constructor_value_marks_dirty() {
    let c = Customer::new(10, signup_date(), true, true, Some("vip")).unwrap();
    assert!(c.tracker.is_dirty("note"));
    assert_eq!(c.note(), Value::from("vip"));
}

#[test]
fn test_null_mode_activation() {
    let mut c = customer();

    activate(&mut c);
    assert_eq!(c.age(), Value::Null);
    assert_eq!(c.signup(), Value::Null);
    assert_eq!(c.note(), Value::Null);
    // Ignored fields read through regardless of null mode.
    assert_eq!(c.id(), Value::Integer(1));

    deactivate(&mut c);
    assert_eq!(c.age(), Value::Integer(10));
    assert_eq!(c.signup(), Value::Timestamp(signup_date()));
    assert_eq!(c.note(), Value::from("standard"));
    assert_eq!(c.id(), Value::Integer(1));
}

#[test]
fn test_dirty_fields_survive_null_mode() {
    let mut c = customer();
    c.tracker.set_value("age", Value::Integer(100)).unwrap();
    assert!(c.tracker.is_dirty("age"));

    activate(&mut c);
    assert_eq!(c.age(), Value::Integer(100));
    assert_eq!(c.signup(), Value::Null);

    c.tracker.mark_field("age", false).unwrap();
    assert_eq!(c.age(), Value::Null);
    deactivate(&mut c);
    assert_eq!(c.age(), Value::Integer(100));
}

#[test]
fn test_ignored_fields_write_directly_without_dirty() {
    let mut c = customer();

    c.tracker.set_value("id", Value::Integer(42)).unwrap();
    assert_eq!(c.id.get().unwrap(), Value::Integer(42));
    assert!(!c.tracker.is_dirty("id"));

    c.tracker.set_value("active", Value::Boolean(false)).unwrap();
    assert_eq!(c.active.get().unwrap(), Value::Boolean(false));
    assert!(!c.tracker.is_dirty("active"));
}

#[test]
fn test_self_typed_ignored_field_is_never_written() {
    let embedded = Slot::new(Value::Text("sentinel".into()));
    let level = FieldLevel::new("Wrapper").ignored(
        "tracker",
        TypeTag::Custom("FieldTracker"),
        embedded.clone(),
        IgnoreReason::SelfTyped,
    );
    let mut tracker = FieldTracker::new(&level);

    tracker.set_value("tracker", Value::Integer(0)).unwrap();
    assert_eq!(embedded.get().unwrap(), Value::Text("sentinel".into()));
}

#[test]
fn test_mark_all_fields_after_construction() {
    let mut c = Customer::new(10, signup_date(), true, true, Some("vip")).unwrap();

    c.tracker.mark_all_fields();

    assert!(c.tracker.is_dirty("age"));
    assert!(c.tracker.is_dirty("signup"));
    assert!(c.tracker.is_dirty("verified"));
    assert!(c.tracker.is_dirty("note"));
    assert!(!c.tracker.is_dirty("nickname"));
    // Ignored fields never carry a flag.
    assert!(!c.tracker.is_dirty("id"));
    assert!(!c.tracker.is_dirty("active"));
}

#[test]
fn test_empty_containers_as_null_policy_on() {
    let mut c = customer();
    assert!(!c.tracker.is_dirty("tags"));
    assert!(!c.tracker.is_dirty("attrs"));

    c.tracker.set_empty_containers_as_null(true);
    c.tracker.mark_all_fields();

    assert!(!c.tracker.is_dirty("tags"));
    assert!(!c.tracker.is_dirty("attrs"));
}

#[test]
fn test_empty_containers_as_null_policy_off() {
    let mut c = customer();

    c.tracker.set_empty_containers_as_null(false);
    c.tracker.mark_all_fields();

    assert!(c.tracker.is_dirty("tags"));
    assert!(c.tracker.is_dirty("attrs"));
}

#[test]
fn test_set_empty_container_respects_policy() {
    let mut c = customer();
    c.tracker.set_empty_containers_as_null(true);

    c.tracker.set_value("tags", Value::List(Vec::new())).unwrap();
    assert!(!c.tracker.is_dirty("tags"));

    c.tracker
        .set_value("tags", Value::List(vec![Value::from("vip")]))
        .unwrap();
    assert!(c.tracker.is_dirty("tags"));
}

#[test]
fn test_invalid_field_names() {
    let mut c = customer();

    assert!(matches!(
        c.tracker.get_value("bogus", Value::Null),
        Err(FieldError::InvalidField(_, _))
    ));
    assert!(matches!(
        c.tracker.set_value("bogus", Value::Integer(0)),
        Err(FieldError::InvalidField(_, _))
    ));
    assert!(matches!(
        c.tracker.mark_field("bogus", true),
        Err(FieldError::InvalidField(_, _))
    ));
    // is_dirty is deliberately lenient: unknown names are simply not dirty.
    assert!(!c.tracker.is_dirty("bogus"));
}

#[test]
fn test_mark_field_is_idempotent() {
    let mut c = customer();
    c.tracker.mark_field("age", true).unwrap();
    c.tracker.mark_field("age", true).unwrap();
    assert!(c.tracker.is_dirty("age"));
    c.tracker.mark_field("age", false).unwrap();
    c.tracker.mark_field("age", false).unwrap();
    assert!(!c.tracker.is_dirty("age"));
}

#[test]
fn test_assign_defaults_fills_only_null_fields() {
    let mut c = customer();

    c.tracker.assign_defaults().unwrap();

    // Already non-null fields keep their values.
    assert_eq!(c.age.get().unwrap(), Value::Integer(10));
    assert_eq!(c.verified.get().unwrap(), Value::Boolean(true));
    assert_eq!(c.note.get().unwrap(), Value::from("standard"));
    assert_eq!(c.tags.get().unwrap(), Value::List(Vec::new()));
    assert_eq!(c.attrs.get().unwrap(), Value::Map(BTreeMap::new()));
    // The null text field got the resolver default.
    assert_eq!(c.nickname.get().unwrap(), Value::Text(String::new()));
    // An object type without a designator defaults to absence.
    assert_eq!(c.signup.get().unwrap(), Value::Timestamp(signup_date()));

    // Defaulting never marks anything dirty.
    for name in ["age", "signup", "verified", "note", "nickname", "tags", "attrs"] {
        assert!(!c.tracker.is_dirty(name), "field '{}' dirty", name);
    }
}

#[test]
fn test_assign_defaults_on_all_null_object() {
    let age = Slot::null();
    let note = Slot::null();
    let tags = Slot::null();
    let signup = Slot::null();
    let level = FieldLevel::new("Blank")
        .tracked("age", TypeTag::Integer, age.clone())
        .tracked("note", TypeTag::Text, note.clone())
        .tracked("tags", TypeTag::List, tags.clone())
        .tracked("signup", TypeTag::Object(&DATE_TIME), signup.clone());
    let mut tracker = FieldTracker::new(&level);

    tracker.assign_defaults().unwrap();

    assert_eq!(age.get().unwrap(), Value::Integer(0));
    assert_eq!(note.get().unwrap(), Value::Text(String::new()));
    assert_eq!(tags.get().unwrap(), Value::List(Vec::new()));
    assert_eq!(signup.get().unwrap(), Value::Null);
    for name in ["age", "note", "tags", "signup"] {
        assert!(!tracker.is_dirty(name));
    }
}

#[test]
fn test_null_mode_read_scenario() {
    // Tracker over {a: Int = 5, b: Text = null}.
    let a = Slot::new(Value::Integer(5));
    let b = Slot::null();
    let level = FieldLevel::new("Pair")
        .tracked("a", TypeTag::Integer, a.clone())
        .tracked("b", TypeTag::Text, b.clone());
    let mut tracker = FieldTracker::new(&level);

    assert!(!tracker.is_dirty("a"));
    assert!(!tracker.is_dirty("b"));

    tracker.set_null_mode(true);
    assert_eq!(tracker.get_value("a", Value::Null).unwrap(), Value::Null);
    assert_eq!(tracker.get_value("b", Value::Null).unwrap(), Value::Null);

    tracker.set_null_mode(false);
    assert_eq!(tracker.get_value("a", Value::Null).unwrap(), Value::Integer(5));
    assert_eq!(tracker.get_value("b", Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_set_value_substitutes_default_without_marking() {
    let mut c = customer();

    c.tracker
        .set_value_or("nickname", Value::Null, Value::from("anonymous"))
        .unwrap();

    assert_eq!(c.nickname.get().unwrap(), Value::from("anonymous"));
    assert!(!c.tracker.is_dirty("nickname"));
}
