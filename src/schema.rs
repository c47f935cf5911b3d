//! Per-variant field schemas.
//!
//! Each picker variant declares its parameter shape as a const table of
//! field descriptors. The generic parameter bundle is parameterized over a
//! schema, so the four variants share one decoding path while keeping
//! distinct typed accessor surfaces.

use serde::{Deserialize, Serialize};

/// The coercion a declared field goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// JSON string.
    String,

    /// Canonical JSON boolean.
    Bool,

    /// Any JSON number, read as `f64`.
    Number,

    /// Epoch-millisecond timestamp (signed-64-bit-representable double).
    Timestamp,

    /// String zone identifier or numeric offset.
    TimeZone,

    /// Nested dialog-button record.
    DialogButtons,
}

/// One declared field of a variant's open-parameter schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Payload key, exactly as the host environment spells it.
    pub name: &'static str,

    /// Coercion applied on access.
    pub kind: FieldKind,

    /// Whether absence is a contract violation. Every top-level field in
    /// every shipped variant is optional; only nested records carry
    /// required fields.
    pub required: bool,
}

impl FieldDescriptor {
    /// Declare an optional field.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    /// Declare a required field.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }
}

/// Schema of one picker variant: a name for diagnostics plus the declared
/// field table. Implemented by zero-sized marker types, one per variant.
pub trait PickerSchema: Send + Sync + 'static {
    /// Module name as registered with the host environment.
    const NAME: &'static str;

    /// Declared open-parameter fields.
    const FIELDS: &'static [FieldDescriptor];

    /// Look up a declared field by payload key.
    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }

    /// Whether the schema declares a field under this key.
    fn declares(name: &str) -> bool {
        Self::field(name).is_some()
    }
}
