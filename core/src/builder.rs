//! Request construction.
//!
//! Turns a URL-like input, a method, optional parameters and headers, and an
//! optional body into an `HttpRequest`. Does not touch the network.

use crate::error::HttpError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{Headers, QueryParams};
use crate::url_like::UrlLike;

/// Build a wire request.
///
/// The only failure is `HttpError::InvalidUrl`, returned when `url` is absent
/// or cannot be parsed as an absolute URL. Parameters and headers whose value
/// is `ParamValue::Absent` are skipped. Query items are appended after any
/// query the URL already carries.
pub fn build_request(
    url: impl Into<UrlLike>,
    method: HttpMethod,
    params: Option<&QueryParams>,
    headers: Option<&Headers>,
    body: Option<Vec<u8>>,
) -> Result<HttpRequest, HttpError> {
    let url: UrlLike = url.into();
    let mut url = url.resolve().ok_or(HttpError::InvalidUrl)?;

    if let Some(params) = params {
        let items: Vec<(&str, String)> = params
            .iter()
            .filter_map(|(name, value)| value.to_wire().map(|v| (name.as_str(), v)))
            .collect();
        // query_pairs_mut leaves a bare `?` behind when nothing is appended.
        if !items.is_empty() {
            url.query_pairs_mut().extend_pairs(items);
        }
    }

    let mut fields: Vec<(String, String)> = Vec::new();
    if let Some(headers) = headers {
        for (name, value) in headers {
            if let Some(value) = value.to_wire() {
                set_header(&mut fields, name, value);
            }
        }
    }

    Ok(HttpRequest::new(method, url, fields, body))
}

/// Replace any existing field with the same name, ignoring ASCII case.
fn set_header(fields: &mut Vec<(String, String)>, name: &str, value: String) {
    fields.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    fields.push((name.to_string(), value));
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::types::{ParamValue, RequestOptions};

    const BASE: &str = "http://localhost:3000/items";

    fn query_pairs(req: &HttpRequest) -> Vec<(String, String)> {
        req.url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn empty_url_is_invalid() {
        let err = build_request("", HttpMethod::Get, None, None, None).unwrap_err();
        assert_eq!(err, HttpError::InvalidUrl);
    }

    #[test]
    fn absent_and_malformed_urls_are_invalid() {
        for input in [UrlLike::Absent, UrlLike::from("not a url"), UrlLike::from("/items")] {
            let err = build_request(input, HttpMethod::Get, None, None, None).unwrap_err();
            assert_eq!(err, HttpError::InvalidUrl);
        }
    }

    #[test]
    fn plain_get_has_no_query_headers_or_body() {
        let req = build_request(BASE, HttpMethod::Get, None, None, None).unwrap();
        assert_eq!(req.method(), HttpMethod::Get);
        assert_eq!(req.url().as_str(), BASE);
        assert!(req.headers().is_empty());
        assert!(req.body().is_none());
    }

    #[test]
    fn absent_params_are_dropped() {
        let opts = RequestOptions::new().param("id", 1).param("skip", ParamValue::Absent);
        let req = build_request(BASE, HttpMethod::Get, opts.params.as_ref(), None, None).unwrap();

        let query = req.url().query().unwrap();
        assert!(query.contains("id=1"));
        assert!(!query.contains("skip"));
    }

    #[test]
    fn all_absent_params_leave_url_untouched() {
        let opts = RequestOptions::new().param("skip", None::<i32>);
        let req = build_request(BASE, HttpMethod::Get, opts.params.as_ref(), None, None).unwrap();
        assert_eq!(req.url().as_str(), BASE);
        assert!(req.url().query().is_none());
    }

    #[test]
    fn params_append_to_existing_query() {
        let opts = RequestOptions::new().param("page", 2).param("q", "a b&c");
        let req = build_request(
            "http://localhost/search?lang=en",
            HttpMethod::Get,
            opts.params.as_ref(),
            None,
            None,
        )
        .unwrap();

        assert_eq!(
            query_pairs(&req),
            vec![
                ("lang".to_string(), "en".to_string()),
                ("page".to_string(), "2".to_string()),
                ("q".to_string(), "a b&c".to_string()),
            ]
        );
    }

    #[test]
    fn headers_are_stringified_and_filtered() {
        let opts = RequestOptions::new()
            .header("id", 1)
            .header("name", "James")
            .header("height", 170.5)
            .header("optional", None::<String>);
        let req = build_request(BASE, HttpMethod::Get, None, opts.headers.as_ref(), None).unwrap();

        assert_eq!(req.header("id"), Some("1"));
        assert_eq!(req.header("name"), Some("James"));
        assert_eq!(req.header("height"), Some("170.5"));
        assert!(req.header("optional").is_none());
        assert_eq!(req.headers().len(), 3);
    }

    #[test]
    fn header_names_differing_in_case_collapse() {
        let opts = RequestOptions::new()
            .header("X-Trace", "first")
            .header("x-trace", "second");
        let req = build_request(BASE, HttpMethod::Get, None, opts.headers.as_ref(), None).unwrap();
        assert_eq!(req.headers().len(), 1);
        // BTreeMap order puts "X-Trace" before "x-trace"; the later one wins.
        assert_eq!(req.header("X-TRACE"), Some("second"));
    }

    #[test]
    fn body_is_attached_verbatim() {
        let req = build_request(
            Url::parse(BASE).unwrap(),
            HttpMethod::Post,
            None,
            None,
            Some(b"{\"a\":1}".to_vec()),
        )
        .unwrap();
        assert_eq!(req.body(), Some(&b"{\"a\":1}"[..]));
    }

    #[test]
    fn empty_body_is_distinct_from_no_body() {
        let req = build_request(BASE, HttpMethod::Put, None, None, Some(Vec::new())).unwrap();
        assert_eq!(req.body(), Some(&b""[..]));
    }
}
