//! URL-like inputs accepted by the client.

use url::Url;

/// Anything a caller may pass where a URL is expected.
///
/// Resolution happens once, in `build_request`. An absent value is a normal
/// input that resolves to nothing, so `Option<&str>` and friends can be passed
/// straight through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlLike {
    Url(Url),
    Text(String),
    Absent,
}

impl UrlLike {
    /// Resolve to an absolute URL, or `None` if absent or malformed.
    pub fn resolve(self) -> Option<Url> {
        match self {
            UrlLike::Url(url) => Some(url),
            UrlLike::Text(text) => Url::parse(&text).ok(),
            UrlLike::Absent => None,
        }
    }
}

impl From<Url> for UrlLike {
    fn from(url: Url) -> Self {
        UrlLike::Url(url)
    }
}

impl From<&Url> for UrlLike {
    fn from(url: &Url) -> Self {
        UrlLike::Url(url.clone())
    }
}

impl From<&str> for UrlLike {
    fn from(text: &str) -> Self {
        UrlLike::Text(text.to_string())
    }
}

impl From<String> for UrlLike {
    fn from(text: String) -> Self {
        UrlLike::Text(text)
    }
}

impl From<&String> for UrlLike {
    fn from(text: &String) -> Self {
        UrlLike::Text(text.clone())
    }
}

impl<T: Into<UrlLike>> From<Option<T>> for UrlLike {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(UrlLike::Absent)
    }
}
