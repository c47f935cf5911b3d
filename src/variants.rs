//! The four picker module variants.
//!
//! Each variant is a zero-sized schema marker carrying its field-descriptor
//! table, plus a typed accessor surface on [`OpenParams`] for exactly the
//! fields it declares. The variants share no runtime state; a host embeds
//! one [`PickerModule`](crate::module::PickerModule) per variant it exposes.
//!
//! Legal values for `display` / `initialInputMode` are a closed set per
//! variant but are deliberately not validated here; the native presenter is
//! the authority on what it can render and falls back to its default for
//! anything it does not recognize.

use crate::params::{OpenParams, TimeZoneName};
use crate::schema::{FieldDescriptor, FieldKind, PickerSchema};
use chrono::{DateTime, TimeZone, Utc};

fn epoch_millis_to_utc(millis: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis as i64).single()
}

// ───────────────────────────────────────────────────────────────────
// DatePicker — platform-default date dialog
// ───────────────────────────────────────────────────────────────────

/// Platform-default date picker dialog.
pub struct DatePicker;

impl PickerSchema for DatePicker {
    const NAME: &'static str = "DatePicker";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::optional("dialogButtons", FieldKind::DialogButtons),
        FieldDescriptor::optional("display", FieldKind::String),
        FieldDescriptor::optional("maximumDate", FieldKind::Timestamp),
        FieldDescriptor::optional("minimumDate", FieldKind::Timestamp),
        FieldDescriptor::optional("testID", FieldKind::String),
        FieldDescriptor::optional("timeZoneName", FieldKind::TimeZone),
        FieldDescriptor::optional("timeZoneOffsetInMinutes", FieldKind::Number),
    ];
}

impl OpenParams<DatePicker> {
    /// Requested display style (`"spinner"`, `"calendar"`, ...).
    pub fn display(&self) -> Option<String> {
        self.string_value("display")
    }

    /// Latest selectable date, epoch milliseconds.
    pub fn maximum_date(&self) -> Option<f64> {
        self.timestamp_value("maximumDate")
    }

    /// Earliest selectable date, epoch milliseconds.
    pub fn minimum_date(&self) -> Option<f64> {
        self.timestamp_value("minimumDate")
    }

    /// Latest selectable date as a UTC datetime.
    pub fn maximum_date_utc(&self) -> Option<DateTime<Utc>> {
        self.maximum_date().and_then(epoch_millis_to_utc)
    }

    /// Earliest selectable date as a UTC datetime.
    pub fn minimum_date_utc(&self) -> Option<DateTime<Utc>> {
        self.minimum_date().and_then(epoch_millis_to_utc)
    }

    /// Accessibility/test identifier.
    pub fn test_id(&self) -> Option<String> {
        self.string_value("testID")
    }

    /// Time zone to interpret dates in.
    pub fn time_zone_name(&self) -> Option<TimeZoneName> {
        self.time_zone_value("timeZoneName")
    }

    pub fn time_zone_offset_in_minutes(&self) -> Option<f64> {
        self.number_value("timeZoneOffsetInMinutes")
    }
}

// ───────────────────────────────────────────────────────────────────
// MaterialDatePicker — material-style date dialog
// ───────────────────────────────────────────────────────────────────

/// Material-style date picker dialog.
pub struct MaterialDatePicker;

impl PickerSchema for MaterialDatePicker {
    const NAME: &'static str = "MaterialDatePicker";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::optional("dialogButtons", FieldKind::DialogButtons),
        FieldDescriptor::optional("initialInputMode", FieldKind::String),
        FieldDescriptor::optional("title", FieldKind::String),
        FieldDescriptor::optional("maximumDate", FieldKind::Timestamp),
        FieldDescriptor::optional("minimumDate", FieldKind::Timestamp),
        FieldDescriptor::optional("fullscreen", FieldKind::Bool),
        FieldDescriptor::optional("testID", FieldKind::String),
        FieldDescriptor::optional("timeZoneName", FieldKind::TimeZone),
        FieldDescriptor::optional("timeZoneOffsetInMinutes", FieldKind::Number),
        FieldDescriptor::optional("firstDayOfWeek", FieldKind::Number),
    ];
}

impl OpenParams<MaterialDatePicker> {
    /// Initial input mode (`"calendar"` or `"keyboard"`).
    pub fn initial_input_mode(&self) -> Option<String> {
        self.string_value("initialInputMode")
    }

    /// Dialog title override.
    pub fn title(&self) -> Option<String> {
        self.string_value("title")
    }

    /// Latest selectable date, epoch milliseconds.
    pub fn maximum_date(&self) -> Option<f64> {
        self.timestamp_value("maximumDate")
    }

    /// Earliest selectable date, epoch milliseconds.
    pub fn minimum_date(&self) -> Option<f64> {
        self.timestamp_value("minimumDate")
    }

    /// Latest selectable date as a UTC datetime.
    pub fn maximum_date_utc(&self) -> Option<DateTime<Utc>> {
        self.maximum_date().and_then(epoch_millis_to_utc)
    }

    /// Earliest selectable date as a UTC datetime.
    pub fn minimum_date_utc(&self) -> Option<DateTime<Utc>> {
        self.minimum_date().and_then(epoch_millis_to_utc)
    }

    /// Present the dialog fullscreen instead of as a modal sheet.
    pub fn fullscreen(&self) -> Option<bool> {
        self.bool_value("fullscreen")
    }

    /// Accessibility/test identifier.
    pub fn test_id(&self) -> Option<String> {
        self.string_value("testID")
    }

    /// Time zone to interpret dates in.
    pub fn time_zone_name(&self) -> Option<TimeZoneName> {
        self.time_zone_value("timeZoneName")
    }

    pub fn time_zone_offset_in_minutes(&self) -> Option<f64> {
        self.number_value("timeZoneOffsetInMinutes")
    }

    /// First day of the week, 0 (Sunday) through 6 (Saturday).
    pub fn first_day_of_week(&self) -> Option<f64> {
        self.number_value("firstDayOfWeek")
    }
}

// ───────────────────────────────────────────────────────────────────
// MaterialTimePicker — material-style time dialog
// ───────────────────────────────────────────────────────────────────

/// Material-style time picker dialog.
pub struct MaterialTimePicker;

impl PickerSchema for MaterialTimePicker {
    const NAME: &'static str = "MaterialTimePicker";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::optional("dialogButtons", FieldKind::DialogButtons),
        FieldDescriptor::optional("initialInputMode", FieldKind::String),
        FieldDescriptor::optional("title", FieldKind::String),
        FieldDescriptor::optional("is24Hour", FieldKind::Bool),
        FieldDescriptor::optional("timeZoneOffsetInMinutes", FieldKind::Number),
    ];
}

impl OpenParams<MaterialTimePicker> {
    /// Initial input mode (`"clock"` or `"keyboard"`).
    pub fn initial_input_mode(&self) -> Option<String> {
        self.string_value("initialInputMode")
    }

    /// Dialog title override.
    pub fn title(&self) -> Option<String> {
        self.string_value("title")
    }

    /// Use a 24-hour clock face instead of the locale default.
    pub fn is_24_hour(&self) -> Option<bool> {
        self.bool_value("is24Hour")
    }

    pub fn time_zone_offset_in_minutes(&self) -> Option<f64> {
        self.number_value("timeZoneOffsetInMinutes")
    }
}

// ───────────────────────────────────────────────────────────────────
// TimePicker — platform-default time dialog
// ───────────────────────────────────────────────────────────────────

/// Platform-default time picker dialog.
pub struct TimePicker;

impl PickerSchema for TimePicker {
    const NAME: &'static str = "TimePicker";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::optional("dialogButtons", FieldKind::DialogButtons),
        FieldDescriptor::optional("display", FieldKind::String),
        FieldDescriptor::optional("is24Hour", FieldKind::Bool),
        FieldDescriptor::optional("minuteInterval", FieldKind::Number),
        FieldDescriptor::optional("timeZoneOffsetInMinutes", FieldKind::Number),
    ];
}

impl OpenParams<TimePicker> {
    /// Requested display style (`"spinner"`, `"clock"`, ...).
    pub fn display(&self) -> Option<String> {
        self.string_value("display")
    }

    /// Use a 24-hour clock face instead of the locale default.
    pub fn is_24_hour(&self) -> Option<bool> {
        self.bool_value("is24Hour")
    }

    /// Minute step of the selector.
    pub fn minute_interval(&self) -> Option<f64> {
        self.number_value("minuteInterval")
    }

    pub fn time_zone_offset_in_minutes(&self) -> Option<f64> {
        self.number_value("timeZoneOffsetInMinutes")
    }
}

/// Parameter bundle aliases, one per variant.
pub type DatePickerParams = OpenParams<DatePicker>;
pub type MaterialDatePickerParams = OpenParams<MaterialDatePicker>;
pub type MaterialTimePickerParams = OpenParams<MaterialTimePicker>;
pub type TimePickerParams = OpenParams<TimePicker>;
