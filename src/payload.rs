//! Untyped payload wrapper and field coercion.
//!
//! The host scripting environment hands every call an opaque, dictionary-like
//! value. This module wraps that value and performs per-field coercion into
//! optional typed scalars. Coercion fails softly: a value that is present but
//! of the wrong shape reads as absent, and a JSON null reads as absent —
//! absence of a field and an invalid value are deliberately indistinct at the
//! scalar level. The one hard failure (a missing required nested field) is
//! raised by the record that declares it, not here.

use serde_json::Value;

/// Opaque, untyped call payload from the host environment.
///
/// Immutable for the lifetime of the bundle wrapping it, which makes every
/// field read a pure function of the underlying value.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(Value);

impl Payload {
    /// Wrap a raw host value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An empty dictionary payload.
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    /// Whether the underlying value is a dictionary at all.
    pub fn is_dictionary(&self) -> bool {
        self.0.is_object()
    }

    /// Borrow the raw underlying value.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Look up a key, treating JSON null as absent.
    fn get(&self, key: &str) -> Option<&Value> {
        match self.0.get(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    /// Coerce a field to a string. Non-string values read as absent.
    pub fn string_field(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_owned)
    }

    /// Coerce a field to a boolean. Only canonical true/false qualify;
    /// truthy numbers and strings read as absent.
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Coerce a field to a 64-bit float. Any JSON number qualifies;
    /// everything else reads as absent.
    pub fn number_field(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Coerce a field to a nested record. Only dictionaries qualify.
    /// The nested payload is cloned out so the record owns it.
    pub fn record_field(&self, key: &str) -> Option<Payload> {
        match self.get(key) {
            Some(v @ Value::Object(_)) => Some(Payload(v.clone())),
            _ => None,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
