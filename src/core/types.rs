use crate::core::{FieldError, Result, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Explicit-default designator: a zero-argument factory returning the
/// domain-specific default value for an enum or object type. A type without
/// one falls back to the generic rules (first enum constant, or absence).
pub type DefaultFn = fn() -> Value;

/// Static description of an enumeration type: its declared constants in
/// declaration order, plus an optional explicit-default designator.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EnumSpec {
    pub name: &'static str,
    pub constants: &'static [&'static str],
    pub default: Option<DefaultFn>,
}

/// Static description of an arbitrary object type. Without a designator the
/// default for the type is `Value::Null`, never an error.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ObjectSpec {
    pub name: &'static str,
    pub default: Option<DefaultFn>,
}

/// Declared type of a field. Scalar tags (boolean, integer and float widths)
/// resolve their defaults directly to the runtime zero value; the rest go
/// through the resolver's provider tables. `Custom` is the extension point
/// for resolver subtyping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Text,
    List,
    Map,
    Decimal,
    Money,
    Enum(&'static EnumSpec),
    Object(&'static ObjectSpec),
    Custom(&'static str),
}

impl TypeTag {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Integer => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Text => "Text",
            Self::List => "List",
            Self::Map => "Map",
            Self::Decimal => "Decimal",
            Self::Money => "Money",
            Self::Enum(spec) => spec.name,
            Self::Object(spec) => spec.name,
            Self::Custom(name) => name,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Physical storage slot for one field. The owning object keeps one handle
/// and registers a clone with its field level, so tracker and bulk-default
/// operations write the same cell the object reads.
///
/// A slot that is already borrowed fails its read/write with a storage
/// error; callers on the tracker paths log and continue rather than
/// propagate.
#[derive(Debug, Clone)]
pub struct Slot(Rc<RefCell<Value>>);

impl Slot {
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    pub fn get(&self) -> Result<Value> {
        self.0
            .try_borrow()
            .map(|value| value.clone())
            .map_err(|e| FieldError::Storage(e.to_string()))
    }

    pub fn set(&self, value: Value) -> Result<()> {
        let mut slot = self
            .0
            .try_borrow_mut()
            .map_err(|e| FieldError::Storage(e.to_string()))?;
        *slot = value;
        Ok(())
    }

    pub(crate) fn cell(&self) -> &RefCell<Value> {
        &self.0
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::null()
    }
}

/// Why a declared field is excluded from dirty tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Constant storage, never reassigned.
    Constant,
    /// Globally shared storage whose access cannot be controlled.
    Shared,
    /// Primitive slot that cannot hold an absent value.
    Primitive,
    /// Refers back to a tracker of the same kind; never written through
    /// the ignored-field path. The exclusion is one level deep only.
    SelfTyped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Tracked,
    Ignored(IgnoreReason),
}

/// One declared field: name (unique within its level), declared type, the
/// storage slot, and whether it is tracked.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub tag: TypeTag,
    pub slot: Slot,
    pub mode: FieldMode,
}

/// The fields declared at exactly one level of an object. Owning types build
/// one per level at construction time; this replaces reflective field
/// enumeration with an explicit registration step.
#[derive(Debug, Clone, Default)]
pub struct FieldLevel {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl FieldLevel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn tracked(mut self, name: impl Into<String>, tag: TypeTag, slot: Slot) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            tag,
            slot,
            mode: FieldMode::Tracked,
        });
        self
    }

    pub fn ignored(
        mut self,
        name: impl Into<String>,
        tag: TypeTag,
        slot: Slot,
        reason: IgnoreReason,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            tag,
            slot,
            mode: FieldMode::Ignored(reason),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}
