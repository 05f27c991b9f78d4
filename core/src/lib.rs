//! Transport-agnostic HTTP client core.
//!
//! # Overview
//! Turns a URL, method, optional query parameters, headers and body into an
//! `HttpRequest`, hands it to a caller-supplied `Transport`, and classifies
//! the raw outcome into a payload or an `HttpError`. The core never touches
//! the network itself.
//!
//! # Design
//! - `build_request` and `classify` are pure functions; everything else is
//!   glue around them.
//! - `HttpClient` exposes GET/POST/PUT/PATCH/DELETE plus a generic `request`
//!   in async and callback form. Both forms share one pipeline.
//! - The transport is injected at construction; there is no global session.
//! - Callback-style calls return a `RequestHandle` whose `cancel` guarantees
//!   the completion closure is never called afterwards.

pub mod builder;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
mod handle;
pub mod http;
pub mod transport;
pub mod types;
pub mod url_like;

pub use builder::build_request;
pub use classify::{classify, classify_outcome, EmptyBodyPolicy, HttpResult};
pub use client::HttpClient;
pub use config::ClientConfig;
pub use error::HttpError;
pub use handle::RequestHandle;
pub use http::{HttpMethod, HttpRequest, TransportError, TransportOutcome};
pub use transport::{CancelToken, OutcomeCallback, Transport};
pub use types::{Headers, ParamValue, QueryParams, RequestOptions};
pub use url_like::UrlLike;

pub use url::Url;
