//! # datetime-picker-bridge
//!
//! Typed bridge contracts for a family of native date/time picker dialog
//! modules exposed to a dynamically-typed host scripting environment.
//!
//! The host only ever produces untyped key/value payloads at the call
//! boundary; this crate is the compile-time-checked contract on the native
//! side of that boundary:
//!
//! - **Payload / field accessors**: lazy, soft-failing coercion of untyped
//!   dictionary values into optional typed fields
//! - **Parameter bundles**: one generic bundle type parameterized over a
//!   per-variant field-descriptor table, with typed accessors per variant
//! - **Module contract**: `open`/`dismiss` per picker, each completing
//!   exactly once via a one-shot resolve/reject ticket, plus a multi-fire
//!   event channel from the native layer to the host
//! - **Variants**: DatePicker, MaterialDatePicker, MaterialTimePicker,
//!   TimePicker — same contract, distinct field schemas
//!
//! What this crate is NOT: the dialog renderer (that lives behind the
//! [`DialogPresenter`] trait), a serialization framework, or a wire format.
//! The contract is purely an in-process call boundary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use datetime_picker_bridge::prelude::*;
//!
//! let module = PickerModule::new(MyTimePickerPresenter::new());
//! let ticket = module.open(Payload::new(payload_from_host));
//! match ticket.await? {
//!     Ok(PickerOutcome::TimeSelected { hour, minute }) => { /* ... */ }
//!     Ok(PickerOutcome::Dismissed) => { /* user backed out */ }
//!     Err(err) => { /* decode / presentation / state error */ }
//! }
//! ```
//!
//! ## The contract
//!
//! - At most one session presents per module instance; a second `open` is
//!   rejected with a state error, never silently replaces the first
//! - Every ticket settles exactly once; user cancellation resolves with a
//!   `Dismissed` outcome rather than rejecting
//! - `dismiss` with no active session resolves as a no-op, never rejects
//! - No error is fatal to a module instance

pub mod completion;
pub mod errors;
pub mod events;
pub mod module;
pub mod params;
pub mod payload;
pub mod schema;
pub mod variants;

// Re-export everything in prelude for convenience
pub mod prelude {
    pub use crate::completion::*;
    pub use crate::errors::*;
    pub use crate::events::*;
    pub use crate::module::*;
    pub use crate::params::*;
    pub use crate::payload::*;
    pub use crate::schema::*;
    pub use crate::variants::*;
}

// Also re-export at crate root
pub use prelude::*;
