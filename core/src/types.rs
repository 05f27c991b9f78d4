//! Query parameter and header values.
//!
//! # Design
//! Parameters and headers share one shape: a map from name to a small closed
//! set of scalars. `ParamValue::Absent` is a first-class variant so callers can
//! build a map from optional fields without filtering it themselves; the
//! request builder drops absent entries.

use std::collections::BTreeMap;
use std::fmt;

/// A scalar query parameter or header value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Absent,
}

impl ParamValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ParamValue::Absent)
    }

    /// Wire representation, or `None` for `Absent`.
    pub fn to_wire(&self) -> Option<String> {
        match self {
            ParamValue::Absent => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::UInt(n) => write!(f, "{n}"),
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Absent => Ok(()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue::Text(v.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(f64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for ParamValue {
            fn from(v: $t) -> Self {
                ParamValue::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for ParamValue {
            fn from(v: $t) -> Self {
                ParamValue::UInt(u64::from(v))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::UInt(v as u64)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(ParamValue::Absent)
    }
}

/// Query parameters keyed by name. Iteration order is by name, which keeps
/// the built query string deterministic.
pub type QueryParams = BTreeMap<String, ParamValue>;

/// Header values keyed by field name.
pub type Headers = BTreeMap<String, ParamValue>;

/// Optional per-request settings shared by every client operation.
///
/// `RequestOptions::default()` means no query parameters and no headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub params: Option<QueryParams>,
    pub headers: Option<Headers>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params
            .get_or_insert_with(QueryParams::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add one header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }
}
