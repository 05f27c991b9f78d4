//! The transport capability the client depends on.
//!
//! # Design
//! The core never opens sockets. A `Transport` receives a built `HttpRequest`,
//! runs it on whatever executor or thread it owns, and reports exactly one
//! `TransportOutcome` through the callback. Implementations only have to
//! provide `submit`; the async `execute` is derived from it.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::http::{HttpRequest, TransportError, TransportOutcome};

/// Callback a transport invokes with the outcome of a submitted request.
pub type OutcomeCallback = Box<dyn FnOnce(TransportOutcome) + Send + 'static>;

/// Transport-side handle used to abort an in-flight exchange.
pub trait CancelToken: Send + Sync {
    fn cancel(&self);
}

/// For transports that cannot abort anything.
impl CancelToken for () {
    fn cancel(&self) {}
}

/// A shared flag the transport polls.
impl CancelToken for Arc<AtomicBool> {
    fn cancel(&self) {
        self.store(true, Ordering::Release);
    }
}

/// A transport that runs each exchange as a tokio task.
impl CancelToken for tokio::task::AbortHandle {
    fn cancel(&self) {
        self.abort();
    }
}

/// Executes wire requests.
pub trait Transport: Send + Sync {
    /// Start the exchange and return immediately.
    ///
    /// `on_outcome` must be called at most once. After the returned token is
    /// cancelled the transport may skip calling it.
    fn submit(&self, request: HttpRequest, on_outcome: OutcomeCallback) -> Box<dyn CancelToken>;

    /// Run the exchange to completion.
    ///
    /// If the transport drops the callback without calling it, this resolves
    /// to a transport error instead of waiting forever.
    fn execute(&self, request: HttpRequest) -> impl Future<Output = TransportOutcome> + Send {
        let (tx, rx) = oneshot::channel();
        let token = self.submit(
            request,
            Box::new(move |outcome| {
                let _ = tx.send(outcome);
            }),
        );
        let mut guard = CancelOnDrop { token: Some(token) };
        async move {
            let outcome = rx.await.unwrap_or_else(|_| {
                TransportOutcome::failed(TransportError::new(
                    "transport dropped the request without an outcome",
                ))
            });
            guard.disarm();
            outcome
        }
    }
}

/// Cancels the exchange if the waiting future is dropped before the outcome
/// arrives.
struct CancelOnDrop {
    token: Option<Box<dyn CancelToken>>,
}

impl CancelOnDrop {
    fn disarm(&mut self) {
        self.token = None;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn submit(&self, request: HttpRequest, on_outcome: OutcomeCallback) -> Box<dyn CancelToken> {
        (**self).submit(request, on_outcome)
    }

    fn execute(&self, request: HttpRequest) -> impl Future<Output = TransportOutcome> + Send {
        (**self).execute(request)
    }
}
