//! Error taxonomy for the HTTP client.
//!
//! # Design
//! The taxonomy is flat: every failure the pipeline can produce is one
//! variant of `HttpError`, whether it came from request construction, from
//! the transport, or from the HTTP status line. Status-carrying variants keep
//! the raw body so callers can inspect server-provided error payloads; empty
//! bodies are normalized to `None` before they get here so equality on
//! `HttpError` does not depend on how a transport reports "no body".

use thiserror::Error;

/// Failure kinds delivered to callers of `HttpClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The URL-like input was absent or could not be parsed.
    #[error("invalid URL")]
    InvalidUrl,

    /// The transport outcome carried neither an error nor a usable HTTP status.
    #[error("invalid response")]
    InvalidResponse,

    /// A successful response had no body and the client rejects empty bodies.
    #[error("invalid data")]
    InvalidData,

    /// The server answered with a 4xx status.
    #[error("client error: HTTP {status}")]
    Client { status: u16, body: Option<Vec<u8>> },

    /// The server answered with a 5xx status.
    #[error("server error: HTTP {status}")]
    Server { status: u16, body: Option<Vec<u8>> },

    /// The transport failed before an HTTP exchange completed.
    #[error("unknown error: {message}")]
    Unknown { message: String },
}

impl HttpError {
    /// Status code for `Client` and `Server` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Client { status, .. } | HttpError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body for `Client` and `Server` errors, if the server sent one.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            HttpError::Client { body, .. } | HttpError::Server { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}
