//! Request construction helpers: per-call options, option merging and URL
//! building.

use crate::error::{ApiError, TransportError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};

/// Partial request specification. Every field is optional so that several of
/// them can be layered with [`merge_request_options`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a header from strings, rejecting names or values HTTP does not allow.
    pub fn header(self, name: &str, value: &str) -> Result<Self, ApiError> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.typed_header(header_name, header_value))
    }

    pub fn typed_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Layer partial request specifications in order.
///
/// `method` and `body` from later inputs replace earlier ones. Headers
/// accumulate; a header name present in several inputs keeps the values of the
/// last input that sets it.
pub fn merge_request_options<'a, I>(layers: I) -> RequestOptions
where
    I: IntoIterator<Item = Option<&'a RequestOptions>>,
{
    let mut merged = RequestOptions::default();

    for layer in layers.into_iter().flatten() {
        if let Some(method) = &layer.method {
            merged.method = Some(method.clone());
        }
        if let Some(body) = &layer.body {
            merged.body = Some(body.clone());
        }
        for name in layer.headers.keys() {
            merged.headers.remove(name);
            for value in layer.headers.get_all(name) {
                merged.headers.append(name.clone(), value.clone());
            }
        }
    }

    merged
}

/// Ordered query parameters. `None` values are kept here and dropped when the
/// URL is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        self.entries
            .push((key.to_string(), value.map(|v| v.to_string())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key.as_str(), v)))
    }
}

/// Join `base_url` and `path` and append the present query parameters.
///
/// Duplicate keys are appended, never replaced.
pub fn build_url(base_url: &str, path: &str, params: &QueryParams) -> Result<Url, TransportError> {
    let raw = format!("{}{}", base_url, path);
    let mut url = Url::parse(&raw).map_err(|e| TransportError::InvalidUrl {
        url: raw.clone(),
        message: e.to_string(),
    })?;

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params.present() {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
