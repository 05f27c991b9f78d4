//! HTTP types exchanged with the transport.
//!
//! # Design
//! These types describe requests and transport outcomes as plain data. The
//! core builds `HttpRequest` values and classifies `TransportOutcome` values
//! without touching the network; a `Transport` implementation performs the
//! actual I/O in between. All fields use owned types so values can move to
//! whatever thread or event loop the transport runs on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether the facade sends a payload for this method.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request, ready to hand to a transport.
///
/// Built by `build_request`. Immutable once built: the transport receives it
/// by value and the client keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub(crate) fn new(
        method: HttpMethod,
        url: Url,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Consume the request, returning its parts.
    pub fn into_parts(self) -> (HttpMethod, Url, Vec<(String, String)>, Option<Vec<u8>>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Failure reported by a transport before an HTTP exchange completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture the description of any error type.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self::new(err.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The raw result of one exchange as a transport reports it.
///
/// Any combination of fields may be present; `classify` decides what the
/// combination means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOutcome {
    pub body: Option<Vec<u8>>,
    pub status: Option<u16>,
    pub error: Option<TransportError>,
}

impl TransportOutcome {
    /// An HTTP exchange that produced a status line and optional body.
    pub fn response(status: u16, body: Option<Vec<u8>>) -> Self {
        Self {
            body,
            status: Some(status),
            error: None,
        }
    }

    /// A transport-level failure with no HTTP response.
    pub fn failed(error: TransportError) -> Self {
        Self {
            body: None,
            status: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_uppercase() {
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(serde_json::to_string(&HttpMethod::Get).unwrap(), "\"GET\"");
    }

    #[test]
    fn only_write_methods_allow_body() {
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Delete.allows_body());
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
        assert!(HttpMethod::Patch.allows_body());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::new(
            HttpMethod::Get,
            Url::parse("http://localhost/").unwrap(),
            vec![("Content-Type".to_string(), "text/plain".to_string())],
            None,
        );
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert!(req.header("accept").is_none());
    }

    #[test]
    fn transport_error_keeps_description() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = TransportError::from_error(&io);
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }
}
