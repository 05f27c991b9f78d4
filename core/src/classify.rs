//! Response classification.
//!
//! # Design
//! `classify` is a pure function from a transport outcome to a result. Rules
//! are evaluated in order and the first match wins:
//!
//! 1. a transport error becomes `Unknown` regardless of status or body;
//! 2. a missing or out-of-range status becomes `InvalidResponse`;
//! 3. 4xx becomes `Client`, 5xx becomes `Server`, with empty bodies
//!    normalized to `None`;
//! 4. anything else is success, with the body passed through as-is.
//!
//! Treating an empty success body as an error is a caller policy, applied
//! afterwards through `EmptyBodyPolicy`.

use serde::{Deserialize, Serialize};

use crate::error::HttpError;
use crate::http::{TransportError, TransportOutcome};

/// The classified result of one request: the payload on success.
pub type HttpResult = Result<Option<Vec<u8>>, HttpError>;

/// Classify the parts of a transport outcome.
pub fn classify(
    body: Option<Vec<u8>>,
    status: Option<u16>,
    error: Option<&TransportError>,
) -> HttpResult {
    if let Some(error) = error {
        return Err(HttpError::Unknown {
            message: error.message().to_string(),
        });
    }

    let status = match status {
        Some(code) if is_valid_status(code) => code,
        _ => return Err(HttpError::InvalidResponse),
    };

    match status {
        400..=499 => Err(HttpError::Client {
            status,
            body: non_empty(body),
        }),
        500..=599 => Err(HttpError::Server {
            status,
            body: non_empty(body),
        }),
        _ => Ok(body),
    }
}

/// Classify a whole `TransportOutcome`.
pub fn classify_outcome(outcome: TransportOutcome) -> HttpResult {
    classify(outcome.body, outcome.status, outcome.error.as_ref())
}

/// Status codes are three digits; anything else did not come from an HTTP
/// status line.
fn is_valid_status(code: u16) -> bool {
    (100..=999).contains(&code)
}

fn non_empty(body: Option<Vec<u8>>) -> Option<Vec<u8>> {
    body.filter(|b| !b.is_empty())
}

/// What to do with a successful response that carries no body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyBodyPolicy {
    /// Deliver `Ok(None)` or `Ok(Some(vec![]))` unchanged.
    #[default]
    Accept,
    /// Turn absent or zero-length success bodies into `HttpError::InvalidData`.
    Reject,
}

impl EmptyBodyPolicy {
    /// Post-process a classified result. Failures pass through untouched.
    pub fn apply(self, result: HttpResult) -> HttpResult {
        match (self, result) {
            (EmptyBodyPolicy::Reject, Ok(body)) if body.as_ref().map_or(true, Vec::is_empty) => {
                Err(HttpError::InvalidData)
            }
            (_, result) => result,
        }
    }
}
