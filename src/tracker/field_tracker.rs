use crate::core::{FieldDescriptor, FieldError, FieldLevel, FieldMode, IgnoreReason, Result, Value};
use crate::defaults::DefaultResolver;
use std::collections::HashMap;

struct FieldState {
    descriptor: FieldDescriptor,
    dirty: bool,
}

/// Tracks the fields declared at one level of an object, retaining the
/// distinction between "never set" and "set to its natural default".
///
/// Fields are marked dirty when changed via `set_value` or when scanned by
/// `mark_all_fields`. In null mode every non-dirty field reads as
/// `Value::Null` regardless of its stored content.
///
/// Intended to be embedded in the owning object, constructed from the field
/// level that object declares; accessors and mutators on the owner route
/// through `get_value`/`set_value`. Objects with several declaring levels
/// embed one tracker per level (see the `hierarchy` module).
pub struct FieldTracker {
    level: String,
    states: HashMap<String, FieldState>,
    ignored: HashMap<String, FieldDescriptor>,
    null_mode: bool,
    empty_containers_as_null: bool,
}

impl FieldTracker {
    pub fn new(level: &FieldLevel) -> Self {
        let mut states = HashMap::new();
        let mut ignored = HashMap::new();
        for descriptor in level.fields() {
            match descriptor.mode {
                FieldMode::Tracked => {
                    states.insert(
                        descriptor.name.clone(),
                        FieldState {
                            descriptor: descriptor.clone(),
                            dirty: false,
                        },
                    );
                }
                FieldMode::Ignored(_) => {
                    ignored.insert(descriptor.name.clone(), descriptor.clone());
                }
            }
        }
        Self {
            level: level.name().to_string(),
            states,
            ignored,
            null_mode: false,
            empty_containers_as_null: false,
        }
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// Retrieves the value of the given field. In null mode, non-dirty
    /// tracked fields read as `Value::Null` regardless of stored content.
    /// If the underlying slot cannot be read, the error is logged and
    /// `fallback` is returned.
    pub fn get_value(&self, name: &str, fallback: Value) -> Result<Value> {
        if let Some(state) = self.states.get(name) {
            if self.null_mode && !state.dirty {
                return Ok(Value::Null);
            }
            return Ok(self.read_slot(&state.descriptor, fallback));
        }
        if let Some(descriptor) = self.ignored.get(name) {
            return Ok(self.read_slot(descriptor, fallback));
        }
        Err(self.invalid_field(name))
    }

    /// Sets the value of the given field, marking it dirty when a non-dirty
    /// field receives a non-null value.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<()> {
        self.set_value_or(name, value, Value::Null)
    }

    /// Like [`set_value`](Self::set_value), but stores `default_if_null`
    /// when `value` is the literal null. The dirty decision still looks at
    /// `value`, so substituting a default does not mark the field.
    pub fn set_value_or(&mut self, name: &str, value: Value, default_if_null: Value) -> Result<()> {
        let counts_null = self.counts_as_null(&value);
        if let Some(state) = self.states.get_mut(name) {
            if !state.dirty && !counts_null {
                state.dirty = true;
            }
            let stored = if value.is_null() { default_if_null } else { value };
            if let Err(e) = state.descriptor.slot.set(stored) {
                log::error!(
                    "Unable to set field value '{}' at level '{}': {}",
                    name,
                    self.level,
                    e
                );
            }
            return Ok(());
        }
        if let Some(descriptor) = self.ignored.get(name) {
            // Self-typed embedded trackers are never written through here.
            if descriptor.mode != FieldMode::Ignored(IgnoreReason::SelfTyped) {
                if let Err(e) = descriptor.slot.set(value) {
                    log::error!(
                        "Unable to set ignored field value '{}' at level '{}': {}",
                        name,
                        self.level,
                        e
                    );
                }
            }
            return Ok(());
        }
        Err(self.invalid_field(name))
    }

    /// Whether the given field is marked dirty. Returns false for ignored
    /// and unknown names; unlike `get_value`/`set_value` this never errors.
    pub fn is_dirty(&self, name: &str) -> bool {
        self.states.get(name).map(|s| s.dirty).unwrap_or(false)
    }

    /// Explicitly marks a field dirty or non-dirty. Idempotent. A no-op for
    /// ignored names.
    pub fn mark_field(&mut self, name: &str, dirty: bool) -> Result<()> {
        if let Some(state) = self.states.get_mut(name) {
            state.dirty = dirty;
            return Ok(());
        }
        if self.ignored.contains_key(name) {
            return Ok(());
        }
        Err(self.invalid_field(name))
    }

    /// Marks every tracked field whose current stored value is non-null as
    /// dirty. Designed to run after construction, to pick up fields the
    /// constructor assigned. Two passes: the non-null set is computed in
    /// full before any flag changes, so marking one field cannot affect the
    /// emptiness evaluation of another.
    pub fn mark_all_fields(&mut self) {
        let non_null: Vec<String> = self
            .states
            .values()
            .filter(|state| match state.descriptor.slot.get() {
                Ok(value) => !self.counts_as_null(&value),
                Err(e) => {
                    log::error!(
                        "Unable to get value for field '{}' at level '{}': {}",
                        state.descriptor.name,
                        self.level,
                        e
                    );
                    false
                }
            })
            .map(|state| state.descriptor.name.clone())
            .collect();

        for name in non_null {
            if let Some(state) = self.states.get_mut(&name) {
                state.dirty = true;
            }
        }
    }

    /// Assigns a resolver default to every tracked field whose current
    /// value is null. Never sets a dirty flag and never overwrites a
    /// non-null field.
    pub fn assign_defaults(&mut self) -> Result<()> {
        self.assign_defaults_with(&DefaultResolver::new())
    }

    /// Reads the raw slot, not `get_value`, so null mode cannot widen the
    /// set of overwritten fields.
    pub fn assign_defaults_with(&mut self, resolver: &DefaultResolver) -> Result<()> {
        let mut pending: Vec<(String, Value)> = Vec::new();
        for state in self.states.values() {
            let current = match state.descriptor.slot.get() {
                Ok(value) => value,
                Err(e) => {
                    log::error!(
                        "Unable to get value for field '{}' at level '{}': {}",
                        state.descriptor.name,
                        self.level,
                        e
                    );
                    continue;
                }
            };
            if self.counts_as_null(&current) {
                let default = resolver.default_for(&state.descriptor.tag)?;
                pending.push((state.descriptor.name.clone(), default));
            }
        }
        for (name, default) in pending {
            self.set_value_or(&name, Value::Null, default)?;
        }
        Ok(())
    }

    /// When on, non-dirty fields read as null regardless of stored content.
    pub fn set_null_mode(&mut self, null_mode: bool) {
        self.null_mode = null_mode;
    }

    pub fn null_mode(&self) -> bool {
        self.null_mode
    }

    /// When on, empty lists and maps count as null for dirty marking and
    /// defaulting.
    pub fn set_empty_containers_as_null(&mut self, empty_containers_as_null: bool) {
        self.empty_containers_as_null = empty_containers_as_null;
    }

    pub fn empty_containers_as_null(&self) -> bool {
        self.empty_containers_as_null
    }

    fn counts_as_null(&self, value: &Value) -> bool {
        if self.empty_containers_as_null && value.is_empty_container() {
            return true;
        }
        value.is_null()
    }

    fn read_slot(&self, descriptor: &FieldDescriptor, fallback: Value) -> Value {
        match descriptor.slot.get() {
            Ok(value) => value,
            Err(e) => {
                log::error!(
                    "Unable to get value for field '{}' at level '{}': {}",
                    descriptor.name,
                    self.level,
                    e
                );
                fallback
            }
        }
    }

    fn invalid_field(&self, name: &str) -> FieldError {
        FieldError::InvalidField(name.to_string(), self.level.clone())
    }
}
