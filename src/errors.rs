//! Standard error types for the picker bridge.
//!
//! One taxonomy, three kinds:
//!
//! 1. **Decode** — a payload field is present but unconvertible, or a
//!    required nested field is missing.
//! 2. **Presentation** — the native layer cannot show the dialog
//!    (no foreground context, dialog already torn down, ...).
//! 3. **State** — an `open` call arrived while a session is already
//!    presenting.
//!
//! Every error is delivered by rejecting a completion ticket; none is fatal
//! to the module instance, which returns to idle and accepts future calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Machine-readable error kinds surfaced across the bridge boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BridgeErrorKind {
    /// Payload field present but unconvertible, or required nested field
    /// missing.
    #[serde(rename = "DECODE_ERROR")]
    Decode,

    /// Native layer failed to present or tear down the dialog.
    #[serde(rename = "PRESENTATION_ERROR")]
    Presentation,

    /// `open` invoked while a session is already presenting.
    #[serde(rename = "STATE_ERROR")]
    State,
}

impl BridgeErrorKind {
    /// Whether the caller can recover by issuing a new call.
    ///
    /// All bridge errors are recoverable; the distinction only matters for
    /// hosts that fold bridge errors into a wider taxonomy.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Decode => true,       // fix the payload and retry
            Self::Presentation => true, // retry once a foreground context exists
            Self::State => true,        // wait for the active session to complete
        }
    }
}

impl std::fmt::Display for BridgeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Decode => "DECODE_ERROR",
            Self::Presentation => "PRESENTATION_ERROR",
            Self::State => "STATE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Error type for all bridge operations.
///
/// Carried across the boundary as a kind code plus a human-readable message,
/// the shape the host environment turns into its own rejection object.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("[{kind}] {message}")]
pub struct BridgeError {
    /// Error kind (machine-readable)
    pub kind: BridgeErrorKind,

    /// Human-readable message (should name the offending field or state)
    pub message: String,

    /// Additional context (for debugging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl BridgeError {
    /// Create a new error
    pub fn new(kind: BridgeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let context = self.context.get_or_insert_with(HashMap::new);
        if let Ok(v) = serde_json::to_value(value) {
            context.insert(key.into(), v);
        }
        self
    }

    // Common constructors

    /// Decode error with a free-form message
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::Decode, message)
    }

    /// Decode error for a required field that is missing
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            BridgeErrorKind::Decode,
            format!("Required field missing: {}", field),
        )
        .with_context("field", field)
    }

    /// Presentation error from the native layer
    pub fn presentation(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::Presentation, message)
    }

    /// State error for an `open` call during an active session
    pub fn session_already_active(module: &str) -> Self {
        Self::new(
            BridgeErrorKind::State,
            format!("{}: a picker session is already presenting", module),
        )
        .with_context("module", module)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::new(BridgeErrorKind::Decode, format!("JSON error: {}", e))
    }
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
