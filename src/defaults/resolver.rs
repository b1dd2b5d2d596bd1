use crate::core::{Decimal, EnumSpec, FieldError, Money, Result, TypeTag, Value};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Default provider: maps a declared type to its canonical reset value.
pub type Provider = Box<dyn Fn(&TypeTag) -> Result<Value>>;

/// Resolves a declared field type to its default value.
///
/// Built-in defaults: boolean = false, all integer widths = 0, all float
/// widths = 0.0, text = "", list = fresh empty list, map = fresh empty map,
/// decimal = 0, money = zero amount. Container defaults are independent
/// instances per call, never a shared one.
///
/// Extension: [`register`](Self::register) adds a type together with its
/// provider. A per-instance provider always wins over the built-in table,
/// so overriding a built-in default (e.g. with a test double) is a plain
/// `register` call. A type registered without a provider anywhere is a
/// configuration error reported at resolution time.
pub struct DefaultResolver {
    supported: Vec<TypeTag>,
    providers: HashMap<TypeTag, Provider>,
}

impl DefaultResolver {
    pub fn new() -> Self {
        Self {
            supported: vec![
                TypeTag::Boolean,
                TypeTag::Byte,
                TypeTag::Short,
                TypeTag::Integer,
                TypeTag::Long,
                TypeTag::Float,
                TypeTag::Double,
                TypeTag::Text,
                TypeTag::List,
                TypeTag::Map,
                TypeTag::Decimal,
                TypeTag::Money,
            ],
            providers: HashMap::new(),
        }
    }

    /// Registers a type and its default provider in one step.
    pub fn register<F>(&mut self, tag: TypeTag, provider: F)
    where
        F: Fn(&TypeTag) -> Result<Value> + 'static,
    {
        self.register_type(tag);
        self.set_provider(tag, provider);
    }

    /// Marks a type as supported without supplying a provider. Resolving it
    /// before [`set_provider`](Self::set_provider) is called fails with
    /// `MissingProvider`; registration and provider must always be paired.
    pub fn register_type(&mut self, tag: TypeTag) {
        if !self.supported.contains(&tag) {
            self.supported.push(tag);
        }
    }

    /// Installs or replaces the per-instance provider for a type.
    pub fn set_provider<F>(&mut self, tag: TypeTag, provider: F)
    where
        F: Fn(&TypeTag) -> Result<Value> + 'static,
    {
        self.providers.insert(tag, Box::new(provider));
    }

    /// Returns the default value for the given declared type.
    ///
    /// Resolution order: per-instance provider, scalar zero value, built-in
    /// provider, then the enum/object conventions. A `Custom` tag that was
    /// never registered is unsupported.
    pub fn default_for(&self, tag: &TypeTag) -> Result<Value> {
        if let Some(provider) = self.providers.get(tag) {
            return provider(tag)
                .map_err(|e| FieldError::ProviderFailed(tag.name().to_string(), e.to_string()));
        }

        if tag.is_scalar() {
            return Ok(scalar_zero(tag));
        }

        if let Some(value) = builtin_default(tag) {
            return Ok(value);
        }

        if self.supported.contains(tag) {
            return Err(FieldError::MissingProvider(tag.name().to_string()));
        }

        match tag {
            TypeTag::Enum(spec) => Ok(enum_default(spec)),
            TypeTag::Object(spec) => Ok(match spec.default {
                Some(factory) => factory(),
                None => Value::Null,
            }),
            _ => Err(FieldError::UnsupportedType(tag.name().to_string())),
        }
    }
}

impl Default for DefaultResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn scalar_zero(tag: &TypeTag) -> Value {
    match tag {
        TypeTag::Boolean => Value::Boolean(false),
        TypeTag::Float | TypeTag::Double => Value::Float(0.0),
        _ => Value::Integer(0),
    }
}

fn builtin_default(tag: &TypeTag) -> Option<Value> {
    match tag {
        TypeTag::Text => Some(Value::Text(String::new())),
        TypeTag::List => Some(Value::List(Vec::new())),
        TypeTag::Map => Some(Value::Map(BTreeMap::new())),
        TypeTag::Decimal => Some(Value::Decimal(Decimal::zero())),
        TypeTag::Money => Some(Value::Money(Money::zero())),
        _ => None,
    }
}

fn enum_default(spec: &EnumSpec) -> Value {
    if let Some(factory) = spec.default {
        return factory();
    }
    match spec.constants.first() {
        Some(first) => Value::enum_constant(spec.name, *first),
        None => Value::Null,
    }
}
