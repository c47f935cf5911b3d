//! The module capability contract: `open`, `dismiss`, event binding.
//!
//! One [`PickerModule`] per variant per host runtime. Each instance runs a
//! tiny session state machine:
//!
//! - **Idle** → `open` → **Presenting** (the native dialog is up, the caller
//!   holds a ticket).
//! - **Presenting** → exactly one settlement of the session's completion →
//!   back to **Idle**. Settlement comes from user confirmation, user
//!   cancellation, an external `dismiss`, or a presentation failure.
//!
//! `open` during **Presenting** rejects the second ticket with a state error
//! and leaves the first session untouched. All calls return immediately;
//! results arrive through the tickets.

use crate::completion::{
    Completion, DismissOutcome, DismissTicket, OpenTicket, PickerOutcome, SessionGuard,
};
use crate::errors::{BridgeError, BridgeResult};
use crate::events::{EventEmitter, EventManager, EventReceiver, PickerEvent};
use crate::params::OpenParams;
use crate::payload::Payload;
use crate::schema::PickerSchema;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// The native presentation boundary.
///
/// Implemented by whatever actually shows the dialog. The bridge validates
/// parameters and manages the session slot; everything visual is behind
/// this trait.
pub trait DialogPresenter: Send + Sync {
    /// The variant schema this presenter renders.
    type Schema: PickerSchema;

    /// Receive the event emission handle. Called exactly once, at module
    /// construction. Presenters with nothing to push can ignore it.
    fn bind_events(&self, _emitter: EventEmitter) {}

    /// Show the dialog for a validated parameter bundle.
    ///
    /// The presenter owns the completion from here on and must settle it
    /// exactly once: resolve on user confirmation or cancellation, reject
    /// with a presentation error if the dialog cannot be shown.
    fn present(&self, params: OpenParams<Self::Schema>, completion: Completion<PickerOutcome>);

    /// Tear down the currently presented dialog.
    ///
    /// Must settle the pending session's completion as part of teardown.
    /// Only called while a session is presenting.
    fn dismiss(&self) -> BridgeResult<()>;
}

/// Bridge object for one picker variant.
pub struct PickerModule<P: DialogPresenter> {
    presenter: P,
    events: EventManager,
    // Current-session slot: `Some(id)` while presenting. The only shared
    // mutable state in the module.
    session: Arc<Mutex<Option<u64>>>,
    next_session: AtomicU64,
}

impl<P: DialogPresenter> PickerModule<P> {
    /// Create a module, binding the event emitter to the presenter.
    pub fn new(presenter: P) -> Self {
        let events = EventManager::default();
        presenter.bind_events(events.emitter());
        Self {
            presenter,
            events,
            session: Arc::new(Mutex::new(None)),
            next_session: AtomicU64::new(1),
        }
    }

    /// Module name as registered with the host environment.
    pub fn name(&self) -> &'static str {
        P::Schema::NAME
    }

    /// Whether a session is currently presenting.
    pub fn is_presenting(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }

    /// Open the picker dialog with an untyped payload.
    ///
    /// Never panics and never blocks on the dialog: every failure mode
    /// (malformed payload, session already active, presentation failure)
    /// arrives as a rejection on the returned ticket.
    pub fn open(&self, payload: Payload) -> OpenTicket {
        let (completion, ticket) = Completion::channel();

        let (params, session_id) = {
            let mut slot = self.session.lock().unwrap();
            if slot.is_some() {
                completion.reject(BridgeError::session_already_active(P::Schema::NAME));
                return ticket;
            }
            let params = match OpenParams::decode(payload) {
                Ok(params) => params,
                Err(err) => {
                    completion.reject(err);
                    return ticket;
                }
            };
            let id = self.next_session.fetch_add(1, Ordering::Relaxed);
            *slot = Some(id);
            (params, id)
        };

        // From here the presenter owns the completion; the guard frees the
        // slot whenever it settles (or is dropped unsettled).
        let completion =
            completion.guarded(SessionGuard::new(self.session.clone(), session_id));
        self.presenter.present(params, completion);
        ticket
    }

    /// Dismiss the currently presented dialog, if any.
    ///
    /// With no active session this resolves `NoOp`; it never rejects for an
    /// idle module. With an active session the presenter's teardown settles
    /// that session's completion, then this ticket resolves `Dismissed`.
    pub fn dismiss(&self) -> DismissTicket {
        let (completion, ticket) = Completion::channel();

        if self.session.lock().unwrap().is_none() {
            completion.resolve(DismissOutcome::NoOp);
            return ticket;
        }

        match self.presenter.dismiss() {
            Ok(()) => completion.resolve(DismissOutcome::Dismissed),
            Err(err) => completion.reject(err),
        }
        ticket
    }

    /// Subscribe to events pushed by the native layer.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Recent events, newest first.
    pub fn recent_events(&self, limit: usize) -> Vec<PickerEvent> {
        self.events.recent(limit)
    }

    /// Borrow the presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

impl<P: DialogPresenter> std::fmt::Debug for PickerModule<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerModule")
            .field("name", &P::Schema::NAME)
            .field("presenting", &self.is_presenting())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BridgeErrorKind;
    use crate::schema::{FieldDescriptor, FieldKind};
    use serde_json::json;

    struct Probe;

    impl PickerSchema for Probe {
        const NAME: &'static str = "Probe";
        const FIELDS: &'static [FieldDescriptor] =
            &[FieldDescriptor::optional("display", FieldKind::String)];
    }

    /// Holds the completion until the test settles it by hand.
    #[derive(Default)]
    struct HoldingPresenter {
        pending: Mutex<Option<Completion<PickerOutcome>>>,
    }

    impl DialogPresenter for HoldingPresenter {
        type Schema = Probe;

        fn present(&self, _params: OpenParams<Probe>, completion: Completion<PickerOutcome>) {
            *self.pending.lock().unwrap() = Some(completion);
        }

        fn dismiss(&self) -> BridgeResult<()> {
            let completion = self
                .pending
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| BridgeError::presentation("nothing presented"))?;
            completion.resolve(PickerOutcome::Dismissed);
            Ok(())
        }
    }

    impl HoldingPresenter {
        fn settle(&self, outcome: PickerOutcome) {
            self.pending
                .lock()
                .unwrap()
                .take()
                .expect("no pending completion")
                .resolve(outcome);
        }
    }

    #[tokio::test]
    async fn test_open_presents_and_completes() {
        let module = PickerModule::new(HoldingPresenter::default());
        let ticket = module.open(Payload::new(json!({})));
        assert!(module.is_presenting());

        module
            .presenter()
            .settle(PickerOutcome::DateSelected { timestamp: 1.5e12 });
        assert_eq!(
            ticket.await.unwrap(),
            Ok(PickerOutcome::DateSelected { timestamp: 1.5e12 })
        );
        assert!(!module.is_presenting());
    }

    #[tokio::test]
    async fn test_second_open_rejected_with_state_error() {
        let module = PickerModule::new(HoldingPresenter::default());
        let first = module.open(Payload::new(json!({})));
        let second = module.open(Payload::new(json!({})));

        let err = second.await.unwrap().unwrap_err();
        assert_eq!(err.kind, BridgeErrorKind::State);

        // First session is untouched and still settleable.
        module.presenter().settle(PickerOutcome::Dismissed);
        assert_eq!(first.await.unwrap(), Ok(PickerOutcome::Dismissed));
    }

    #[tokio::test]
    async fn test_malformed_payload_rejected_module_stays_idle() {
        let module = PickerModule::new(HoldingPresenter::default());
        let ticket = module.open(Payload::new(json!("not a dictionary")));

        let err = ticket.await.unwrap().unwrap_err();
        assert_eq!(err.kind, BridgeErrorKind::Decode);
        assert!(!module.is_presenting());

        // Module accepts future calls.
        let ticket = module.open(Payload::new(json!({})));
        assert!(module.is_presenting());
        module.presenter().settle(PickerOutcome::Dismissed);
        assert!(ticket.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_dismiss_with_no_session_is_noop() {
        let module = PickerModule::new(HoldingPresenter::default());
        let ticket = module.dismiss();
        assert_eq!(ticket.await.unwrap(), Ok(DismissOutcome::NoOp));
    }

    #[tokio::test]
    async fn test_dismiss_settles_open_then_itself() {
        let module = PickerModule::new(HoldingPresenter::default());
        let open_ticket = module.open(Payload::new(json!({})));
        let dismiss_ticket = module.dismiss();

        assert_eq!(open_ticket.await.unwrap(), Ok(PickerOutcome::Dismissed));
        assert_eq!(dismiss_ticket.await.unwrap(), Ok(DismissOutcome::Dismissed));
        assert!(!module.is_presenting());
    }

    #[tokio::test]
    async fn test_dropped_completion_frees_the_slot() {
        /// Drops the completion without settling, simulating a buggy
        /// presenter. The module must still return to idle.
        struct LeakyPresenter;

        impl DialogPresenter for LeakyPresenter {
            type Schema = Probe;
            fn present(&self, _p: OpenParams<Probe>, completion: Completion<PickerOutcome>) {
                drop(completion);
            }
            fn dismiss(&self) -> BridgeResult<()> {
                Ok(())
            }
        }

        let module = PickerModule::new(LeakyPresenter);
        let ticket = module.open(Payload::new(json!({})));
        assert!(ticket.await.is_err()); // channel closed, no settlement
        assert!(!module.is_presenting());
    }
}
