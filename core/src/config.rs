//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::classify::EmptyBodyPolicy;

/// Environment variable read by `ClientConfig::from_env`.
pub const EMPTY_BODY_ENV: &str = "NETCLIENT_EMPTY_BODY";

/// Settings fixed for the lifetime of an `HttpClient`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// How successful responses without a body are reported.
    pub empty_body: EmptyBodyPolicy,
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults, overridden by `NETCLIENT_EMPTY_BODY` (`accept` or `reject`)
    /// when it is set to a recognized value.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(policy) = std::env::var(EMPTY_BODY_ENV)
            .ok()
            .and_then(|v| parse_policy(&v))
        {
            config.empty_body = policy;
        }
        config
    }
}

fn parse_policy(value: &str) -> Option<EmptyBodyPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "accept" => Some(EmptyBodyPolicy::Accept),
        "reject" => Some(EmptyBodyPolicy::Reject),
        _ => None,
    }
}
