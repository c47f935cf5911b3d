//! One-shot completion channels for `open` and `dismiss`.
//!
//! Each bridge operation completes exactly once. The completing side holds
//! an owned [`Completion`] whose `resolve`/`reject` methods consume it, so
//! double settlement is unrepresentable; the calling side holds the paired
//! [`CompletionTicket`] and awaits it. Settling (or dropping) a completion
//! also releases the module's session slot, returning the module to idle.

use crate::errors::BridgeError;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Successful outcome of one picker session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PickerOutcome {
    /// A date was confirmed; epoch milliseconds.
    DateSelected { timestamp: f64 },

    /// A time of day was confirmed.
    TimeSelected { hour: u8, minute: u8 },

    /// The user backed out of the dialog. A normal outcome, not an error.
    Dismissed,
}

/// Successful outcome of one `dismiss` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissOutcome {
    /// An active session was torn down.
    Dismissed,

    /// No session was active; nothing to do.
    NoOp,
}

/// Receiving half of a completion channel.
///
/// Yields `Err(RecvError)` only if the completing side was dropped without
/// settling, which a conforming presenter never does.
pub type CompletionTicket<T> = oneshot::Receiver<Result<T, BridgeError>>;

/// Ticket for an `open` call.
pub type OpenTicket = CompletionTicket<PickerOutcome>;

/// Ticket for a `dismiss` call.
pub type DismissTicket = CompletionTicket<DismissOutcome>;

/// Clears a module's current-session slot when the session settles.
///
/// Dropped (and therefore run) on resolve, reject, or an unsettled drop of
/// the completion, so the module never wedges in the presenting state.
pub(crate) struct SessionGuard {
    slot: Arc<Mutex<Option<u64>>>,
    session_id: u64,
}

impl SessionGuard {
    pub(crate) fn new(slot: Arc<Mutex<Option<u64>>>, session_id: u64) -> Self {
        Self { slot, session_id }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap();
        if *slot == Some(self.session_id) {
            *slot = None;
        }
    }
}

/// Owned, single-shot resolve/reject handle.
///
/// Handed to whoever is responsible for finishing the operation (the native
/// presenter for `open`, the module itself for `dismiss`). Both settling
/// methods take `self` by value: settling twice is a compile error, not a
/// runtime check.
pub struct Completion<T> {
    tx: oneshot::Sender<Result<T, BridgeError>>,
    _guard: Option<SessionGuard>,
}

impl<T> Completion<T> {
    /// Create an unguarded completion/ticket pair.
    pub fn channel() -> (Self, CompletionTicket<T>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx, _guard: None }, rx)
    }

    /// Attach a session guard; released when this completion settles.
    pub(crate) fn guarded(mut self, guard: SessionGuard) -> Self {
        self._guard = Some(guard);
        self
    }

    /// Settle successfully.
    pub fn resolve(self, value: T) {
        // Ticket may have been dropped by the caller; that is its right.
        let _ = self.tx.send(Ok(value));
    }

    /// Settle with an error.
    pub fn reject(self, error: BridgeError) {
        let _ = self.tx.send(Err(error));
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("guarded", &self._guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_delivers_once() {
        let (completion, ticket) = Completion::channel();
        completion.resolve(PickerOutcome::Dismissed);
        assert_eq!(ticket.await.unwrap(), Ok(PickerOutcome::Dismissed));
    }

    #[tokio::test]
    async fn test_reject_delivers_error() {
        let (completion, ticket) = Completion::<PickerOutcome>::channel();
        completion.reject(BridgeError::presentation("no foreground context"));
        let err = ticket.await.unwrap().unwrap_err();
        assert_eq!(err.kind, crate::errors::BridgeErrorKind::Presentation);
    }

    #[tokio::test]
    async fn test_dropped_completion_closes_ticket() {
        let (completion, ticket) = Completion::<PickerOutcome>::channel();
        drop(completion);
        assert!(ticket.await.is_err());
    }

    #[test]
    fn test_session_guard_releases_matching_slot() {
        let slot = Arc::new(Mutex::new(Some(7)));
        drop(SessionGuard::new(slot.clone(), 7));
        assert_eq!(*slot.lock().unwrap(), None);
    }

    #[test]
    fn test_session_guard_ignores_stale_slot() {
        // A newer session already took the slot; the stale guard leaves it.
        let slot = Arc::new(Mutex::new(Some(8)));
        drop(SessionGuard::new(slot.clone(), 7));
        assert_eq!(*slot.lock().unwrap(), Some(8));
    }

    #[test]
    fn test_outcome_serialization() {
        let json =
            serde_json::to_string(&PickerOutcome::DateSelected { timestamp: 1.5e12 }).unwrap();
        assert!(json.contains("date_selected"));

        let json = serde_json::to_string(&DismissOutcome::NoOp).unwrap();
        assert!(json.contains("no_op"));
    }
}
