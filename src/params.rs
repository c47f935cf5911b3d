//! The validated parameter bundle over one open-call payload.
//!
//! A bundle wraps exactly one payload for exactly one `open` call. It is
//! constructed through [`OpenParams::decode`], which only checks that the
//! payload is a dictionary — individual fields stay untouched until their
//! accessor runs, and every accessor is a pure function of the immutable
//! payload, so repeated reads always agree.
//!
//! Typed accessors (one per declared field) live in inherent impls next to
//! each variant's schema; the generic helpers here do the actual coercion
//! and refuse keys the schema does not declare.

use crate::errors::{BridgeError, BridgeResult};
use crate::payload::Payload;
use crate::schema::{FieldKind, PickerSchema};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Localized override label for one dialog action button.
///
/// Nested inside the `dialogButtons` payload field. The label text is the
/// single field of this record and the only required field anywhere in the
/// bridge: the host-side type system guarantees it, so a present record
/// lacking it is a caller contract violation surfaced as a decode error.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogButtonLabel {
    payload: Payload,
}

/// Payload key carrying the button label text.
const BUTTON_TEXT_KEY: &str = "string";

impl DialogButtonLabel {
    fn new(payload: Payload) -> Self {
        Self { payload }
    }

    /// The button label text. Required.
    pub fn text(&self) -> BridgeResult<String> {
        self.payload
            .string_field(BUTTON_TEXT_KEY)
            .ok_or_else(|| BridgeError::missing_field(BUTTON_TEXT_KEY))
    }
}

/// Time zone selector: a named zone identifier or a raw minute offset.
///
/// The host side sends whichever the app was configured with; both spellings
/// are accepted and preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeZoneName {
    /// IANA-style zone name, e.g. `"Europe/Paris"`.
    Named(String),

    /// Numeric offset identifier.
    Offset(f64),
}

/// Validated, strongly-typed wrapper over one open-call payload.
///
/// Generic over the variant schema `S`; one decoding path serves all four
/// picker variants.
pub struct OpenParams<S: PickerSchema> {
    payload: Payload,
    _schema: PhantomData<S>,
}

// Manual impls: the schema marker is phantom, so no `S` bounds are needed.

impl<S: PickerSchema> Clone for OpenParams<S> {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            _schema: PhantomData,
        }
    }
}

impl<S: PickerSchema> std::fmt::Debug for OpenParams<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenParams")
            .field("module", &S::NAME)
            .field("payload", &self.payload)
            .finish()
    }
}

impl<S: PickerSchema> OpenParams<S> {
    /// Decode a payload into a bundle.
    ///
    /// Fails only when the payload is not a dictionary; an empty dictionary
    /// decodes into a bundle whose every optional accessor returns `None`.
    pub fn decode(payload: Payload) -> BridgeResult<Self> {
        if !payload.is_dictionary() {
            return Err(
                BridgeError::decode(format!("{}: open parameters must be a dictionary", S::NAME))
                    .with_context("module", S::NAME),
            );
        }
        Ok(Self {
            payload,
            _schema: PhantomData,
        })
    }

    /// Borrow the wrapped payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    // Generic coercion helpers. Each checks the declaration table so a typo
    // in a variant accessor shows up as `None` in tests instead of silently
    // reading an undeclared key.

    fn declared(&self, name: &str, kind: FieldKind) -> bool {
        S::field(name).is_some_and(|f| f.kind == kind)
    }

    pub(crate) fn string_value(&self, name: &str) -> Option<String> {
        self.declared(name, FieldKind::String)
            .then(|| self.payload.string_field(name))
            .flatten()
    }

    pub(crate) fn bool_value(&self, name: &str) -> Option<bool> {
        self.declared(name, FieldKind::Bool)
            .then(|| self.payload.bool_field(name))
            .flatten()
    }

    pub(crate) fn number_value(&self, name: &str) -> Option<f64> {
        self.declared(name, FieldKind::Number)
            .then(|| self.payload.number_field(name))
            .flatten()
    }

    pub(crate) fn timestamp_value(&self, name: &str) -> Option<f64> {
        self.declared(name, FieldKind::Timestamp)
            .then(|| self.payload.number_field(name))
            .flatten()
    }

    pub(crate) fn time_zone_value(&self, name: &str) -> Option<TimeZoneName> {
        if !self.declared(name, FieldKind::TimeZone) {
            return None;
        }
        if let Some(s) = self.payload.string_field(name) {
            return Some(TimeZoneName::Named(s));
        }
        self.payload.number_field(name).map(TimeZoneName::Offset)
    }

    /// The `dialogButtons` nested record, shared by all variants.
    ///
    /// Absent record yields `None` without attempting the nested decode;
    /// the required `text` inside is only checked when read.
    pub fn dialog_buttons(&self) -> Option<DialogButtonLabel> {
        self.declared("dialogButtons", FieldKind::DialogButtons)
            .then(|| self.payload.record_field("dialogButtons"))
            .flatten()
            .map(DialogButtonLabel::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use serde_json::json;

    struct Probe;

    impl PickerSchema for Probe {
        const NAME: &'static str = "Probe";
        const FIELDS: &'static [FieldDescriptor] = &[
            FieldDescriptor::optional("dialogButtons", FieldKind::DialogButtons),
            FieldDescriptor::optional("display", FieldKind::String),
            FieldDescriptor::optional("minimumDate", FieldKind::Timestamp),
            FieldDescriptor::optional("is24Hour", FieldKind::Bool),
            FieldDescriptor::optional("timeZoneName", FieldKind::TimeZone),
        ];
    }

    fn decode(v: serde_json::Value) -> OpenParams<Probe> {
        OpenParams::decode(Payload::new(v)).unwrap()
    }

    #[test]
    fn test_empty_payload_decodes() {
        let params = decode(json!({}));
        assert_eq!(params.string_value("display"), None);
        assert_eq!(params.bool_value("is24Hour"), None);
        assert_eq!(params.timestamp_value("minimumDate"), None);
        assert!(params.dialog_buttons().is_none());
    }

    #[test]
    fn test_non_dictionary_is_decode_error() {
        let err = OpenParams::<Probe>::decode(Payload::new(json!("nope"))).unwrap_err();
        assert_eq!(err.kind, crate::errors::BridgeErrorKind::Decode);
        assert!(err.message.contains("Probe"));
    }

    #[test]
    fn test_undeclared_key_reads_as_none() {
        // `fullscreen` is not in Probe's table even if the payload has it.
        let params = decode(json!({ "fullscreen": true }));
        assert_eq!(params.bool_value("fullscreen"), None);
    }

    #[test]
    fn test_kind_mismatch_reads_as_none() {
        // `display` is declared as a string, not a bool.
        let params = decode(json!({ "display": "spinner" }));
        assert_eq!(params.bool_value("display"), None);
        assert_eq!(params.string_value("display"), Some("spinner".to_string()));
    }

    #[test]
    fn test_button_label_text_required() {
        let params = decode(json!({ "dialogButtons": { "string": "OK" } }));
        let label = params.dialog_buttons().unwrap();
        assert_eq!(label.text().unwrap(), "OK");

        let params = decode(json!({ "dialogButtons": {} }));
        let label = params.dialog_buttons().unwrap();
        let err = label.text().unwrap_err();
        assert_eq!(err.kind, crate::errors::BridgeErrorKind::Decode);
    }

    #[test]
    fn test_absent_buttons_skip_nested_decode() {
        let params = decode(json!({ "display": "inline" }));
        assert!(params.dialog_buttons().is_none());
    }

    #[test]
    fn test_time_zone_accepts_both_spellings() {
        let params = decode(json!({ "timeZoneName": "Europe/Paris" }));
        assert_eq!(
            params.time_zone_value("timeZoneName"),
            Some(TimeZoneName::Named("Europe/Paris".to_string()))
        );

        let params = decode(json!({ "timeZoneName": -120 }));
        assert_eq!(
            params.time_zone_value("timeZoneName"),
            Some(TimeZoneName::Offset(-120.0))
        );

        let params = decode(json!({ "timeZoneName": true }));
        assert_eq!(params.time_zone_value("timeZoneName"), None);
    }

    #[test]
    fn test_double_read_is_idempotent() {
        let params = decode(json!({
            "display": "compact",
            "minimumDate": 1704067200000_i64,
            "is24Hour": false,
            "dialogButtons": { "string": "Done" },
        }));
        for _ in 0..2 {
            assert_eq!(params.string_value("display"), Some("compact".to_string()));
            assert_eq!(params.timestamp_value("minimumDate"), Some(1.7040672e12));
            assert_eq!(params.bool_value("is24Hour"), Some(false));
            assert_eq!(params.dialog_buttons().unwrap().text().unwrap(), "Done");
        }
    }
}
