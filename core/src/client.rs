//! Transport-agnostic HTTP client facade.
//!
//! # Design
//! `HttpClient` holds only an injected `Transport` and an immutable
//! `ClientConfig`; it carries no state between calls, so one instance can be
//! shared across threads. Every operation comes in two forms:
//!
//! - async (`get`, `post`, ...) returns the payload or an `HttpError`;
//! - callback (`get_with`, `post_with`, ...) returns a `RequestHandle`
//!   immediately and calls the completion closure at most once.
//!
//! Both forms go through the same `prepare` (request builder) and `finish`
//! (classifier plus empty-body policy) steps, so URL, parameter, header and
//! body handling is identical regardless of call style.

use std::sync::Arc;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::builder::build_request;
use crate::classify::{classify_outcome, EmptyBodyPolicy, HttpResult};
use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::handle::{DeliveryGate, RequestHandle};
use crate::http::{HttpMethod, HttpRequest, TransportOutcome};
use crate::transport::Transport;
use crate::types::RequestOptions;
use crate::url_like::UrlLike;

/// HTTP client over an arbitrary transport.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Async operations
    // -----------------------------------------------------------------------

    /// Send a request with any method and wait for the classified result.
    ///
    /// `body` is ignored for GET and DELETE.
    pub async fn request(
        &self,
        url: impl Into<UrlLike>,
        method: HttpMethod,
        options: RequestOptions,
        body: Option<Vec<u8>>,
    ) -> HttpResult {
        let request = self.prepare(url, method, options, body)?;
        let outcome = self.transport.execute(request).await;
        finish(self.config.empty_body, outcome)
    }

    pub async fn get(&self, url: impl Into<UrlLike>, options: RequestOptions) -> HttpResult {
        self.request(url, HttpMethod::Get, options, None).await
    }

    pub async fn post(
        &self,
        url: impl Into<UrlLike>,
        body: impl Into<Vec<u8>>,
        options: RequestOptions,
    ) -> HttpResult {
        self.request(url, HttpMethod::Post, options, Some(body.into())).await
    }

    pub async fn put(
        &self,
        url: impl Into<UrlLike>,
        body: impl Into<Vec<u8>>,
        options: RequestOptions,
    ) -> HttpResult {
        self.request(url, HttpMethod::Put, options, Some(body.into())).await
    }

    pub async fn patch(
        &self,
        url: impl Into<UrlLike>,
        body: impl Into<Vec<u8>>,
        options: RequestOptions,
    ) -> HttpResult {
        self.request(url, HttpMethod::Patch, options, Some(body.into())).await
    }

    pub async fn delete(&self, url: impl Into<UrlLike>, options: RequestOptions) -> HttpResult {
        self.request(url, HttpMethod::Delete, options, None).await
    }

    // -----------------------------------------------------------------------
    // Callback operations
    // -----------------------------------------------------------------------

    /// Dispatch a request and deliver its classified result to `on_complete`.
    ///
    /// If the URL cannot be resolved, `on_complete` receives
    /// `HttpError::InvalidUrl` before this returns, nothing is submitted, and
    /// the return value is `None`. Otherwise the returned handle can cancel the
    /// request; once `cancel` succeeds `on_complete` is never called.
    pub fn request_with<F>(
        &self,
        url: impl Into<UrlLike>,
        method: HttpMethod,
        options: RequestOptions,
        body: Option<Vec<u8>>,
        on_complete: F,
    ) -> Option<RequestHandle>
    where
        F: FnOnce(HttpResult) + Send + 'static,
    {
        let request = match self.prepare(url, method, options, body) {
            Ok(request) => request,
            Err(err) => {
                on_complete(Err(err));
                return None;
            }
        };

        let id = Uuid::new_v4();
        let gate = DeliveryGate::new();
        let delivery = Arc::clone(&gate);
        let policy = self.config.empty_body;
        debug!(%id, method = %request.method(), url = %request.url(), "dispatching request");

        let token = self.transport.submit(
            request,
            Box::new(move |outcome| {
                if !delivery.try_deliver() {
                    trace!(%id, "outcome suppressed");
                    return;
                }
                on_complete(finish(policy, outcome));
            }),
        );
        Some(RequestHandle::new(id, gate, token))
    }

    pub fn get_with<F>(
        &self,
        url: impl Into<UrlLike>,
        options: RequestOptions,
        on_complete: F,
    ) -> Option<RequestHandle>
    where
        F: FnOnce(HttpResult) + Send + 'static,
    {
        self.request_with(url, HttpMethod::Get, options, None, on_complete)
    }

    pub fn post_with<F>(
        &self,
        url: impl Into<UrlLike>,
        body: impl Into<Vec<u8>>,
        options: RequestOptions,
        on_complete: F,
    ) -> Option<RequestHandle>
    where
        F: FnOnce(HttpResult) + Send + 'static,
    {
        self.request_with(url, HttpMethod::Post, options, Some(body.into()), on_complete)
    }

    pub fn put_with<F>(
        &self,
        url: impl Into<UrlLike>,
        body: impl Into<Vec<u8>>,
        options: RequestOptions,
        on_complete: F,
    ) -> Option<RequestHandle>
    where
        F: FnOnce(HttpResult) + Send + 'static,
    {
        self.request_with(url, HttpMethod::Put, options, Some(body.into()), on_complete)
    }

    pub fn patch_with<F>(
        &self,
        url: impl Into<UrlLike>,
        body: impl Into<Vec<u8>>,
        options: RequestOptions,
        on_complete: F,
    ) -> Option<RequestHandle>
    where
        F: FnOnce(HttpResult) + Send + 'static,
    {
        self.request_with(url, HttpMethod::Patch, options, Some(body.into()), on_complete)
    }

    pub fn delete_with<F>(
        &self,
        url: impl Into<UrlLike>,
        options: RequestOptions,
        on_complete: F,
    ) -> Option<RequestHandle>
    where
        F: FnOnce(HttpResult) + Send + 'static,
    {
        self.request_with(url, HttpMethod::Delete, options, None, on_complete)
    }

    fn prepare(
        &self,
        url: impl Into<UrlLike>,
        method: HttpMethod,
        options: RequestOptions,
        body: Option<Vec<u8>>,
    ) -> Result<HttpRequest, HttpError> {
        let body = body.filter(|_| method.allows_body());
        build_request(url, method, options.params.as_ref(), options.headers.as_ref(), body)
    }
}

fn finish(policy: EmptyBodyPolicy, outcome: TransportOutcome) -> HttpResult {
    debug!(status = ?outcome.status, failed = outcome.error.is_some(), "request completed");
    let result = policy.apply(classify_outcome(outcome));
    match &result {
        Ok(body) => trace!(bytes = body.as_ref().map(Vec::len), "classified as success"),
        Err(_) => trace!("classified as failure"),
    }
    result
}
