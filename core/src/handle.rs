//! Cancellable request handles.
//!
//! # Design
//! Cancellation and delivery race through a single atomic cell. Whichever
//! side moves it out of `PENDING` first wins: a delivered outcome can no
//! longer be cancelled, and a cancelled request never reaches its callback,
//! whatever the transport does afterwards.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::transport::CancelToken;

const PENDING: u8 = 0;
const DELIVERED: u8 = 1;
const CANCELLED: u8 = 2;

/// At-most-once switch shared between a handle and its delivery callback.
#[derive(Debug, Default)]
pub(crate) struct DeliveryGate {
    state: AtomicU8,
}

impl DeliveryGate {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Claim the right to deliver. Returns `false` if cancelled or already delivered.
    pub(crate) fn try_deliver(&self) -> bool {
        self.transition(DELIVERED)
    }

    /// Claim the right to cancel. Returns `false` if delivered or already cancelled.
    pub(crate) fn try_cancel(&self) -> bool {
        self.transition(CANCELLED)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }

    fn transition(&self, to: u8) -> bool {
        self.state
            .compare_exchange(PENDING, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Handle to an in-flight request started by a callback-style client call.
///
/// Dropping the handle does not cancel the request.
pub struct RequestHandle {
    id: Uuid,
    gate: Arc<DeliveryGate>,
    token: Box<dyn CancelToken>,
}

impl RequestHandle {
    pub(crate) fn new(id: Uuid, gate: Arc<DeliveryGate>, token: Box<dyn CancelToken>) -> Self {
        Self { id, gate, token }
    }

    /// Identifier generated when the request was dispatched.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Abort the request.
    ///
    /// Returns `true` if the completion callback is now guaranteed never to
    /// run. Returns `false` if the result was already delivered or the handle
    /// was already cancelled; in that case this is a no-op.
    pub fn cancel(&self) -> bool {
        if !self.gate.try_cancel() {
            return false;
        }
        debug!(id = %self.id, "request cancelled");
        self.token.cancel();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.gate.is_cancelled()
    }
}

impl fmt::Debug for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHandle")
            .field("id", &self.id)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    use super::*;

    struct CountingToken(Arc<AtomicUsize>);

    impl CancelToken for CountingToken {
        fn cancel(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn handle(gate: Arc<DeliveryGate>, calls: Arc<AtomicUsize>) -> RequestHandle {
        RequestHandle::new(Uuid::new_v4(), gate, Box::new(CountingToken(calls)))
    }

    #[test]
    fn cancel_before_delivery_blocks_delivery() {
        let gate = DeliveryGate::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let h = handle(Arc::clone(&gate), Arc::clone(&calls));

        assert!(h.cancel());
        assert!(h.is_cancelled());
        assert!(!gate.try_deliver());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_after_delivery_is_noop() {
        let gate = DeliveryGate::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let h = handle(Arc::clone(&gate), Arc::clone(&calls));

        assert!(gate.try_deliver());
        assert!(!h.cancel());
        assert!(!h.is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn second_cancel_does_not_reach_transport() {
        let gate = DeliveryGate::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let h = handle(gate, Arc::clone(&calls));

        assert!(h.cancel());
        assert!(!h.cancel());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn delivery_happens_once() {
        let gate = DeliveryGate::new();
        assert!(gate.try_deliver());
        assert!(!gate.try_deliver());
    }

    #[test]
    fn racing_cancel_and_delivery_have_one_winner() {
        for _ in 0..200 {
            let gate = DeliveryGate::new();
            let flag = Arc::new(AtomicBool::new(false));
            let h = RequestHandle::new(Uuid::new_v4(), Arc::clone(&gate), Box::new(Arc::clone(&flag)));

            let deliverer = {
                let gate = Arc::clone(&gate);
                std::thread::spawn(move || gate.try_deliver())
            };
            let cancelled = h.cancel();
            let delivered = deliverer.join().unwrap();

            assert!(cancelled ^ delivered);
            assert_eq!(flag.load(Ordering::SeqCst), cancelled);
        }
    }

    #[test]
    fn ids_are_unique() {
        let a = handle(DeliveryGate::new(), Arc::new(AtomicUsize::new(0)));
        let b = handle(DeliveryGate::new(), Arc::new(AtomicUsize::new(0)));
        assert_ne!(a.id(), b.id());
    }
}
