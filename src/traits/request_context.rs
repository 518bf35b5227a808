//! The producer seam: request data offered to the capture site.
//!
//! Web frameworks differ in how they expose request data, so capture only
//! depends on [`RequestContext`]. [`CapturedRequest`] is an owned
//! implementation for callers that assemble request data themselves.
//!
//! # Examples
//!
//! ```
//! use error_record::traits::{CapturedRequest, RequestContext};
//!
//! let request = CapturedRequest::new()
//!     .server_variable("HTTP_HOST", "example.com")
//!     .with_query_string("a=1&a=2");
//!
//! let query = request.query_string();
//! assert_eq!(query.get_all("a").collect::<Vec<_>>(), ["1", "2"]);
//! assert_eq!(request.server_variables().get("QUERY_STRING"), Some("a=1&a=2"));
//! ```

use std::net::IpAddr;

use crate::types::OrderedMultiMap;

/// A cookie as seen on the request. Only `name` and `value` are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

impl RequestCookie {
    #[inline]
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into(), ..Default::default() }
    }
}

/// Request data available when an error is captured.
///
/// Each collection is ordered and may repeat names. Capture takes a snapshot;
/// later changes to the request are not reflected in the record.
pub trait RequestContext {
    /// Server / CGI-style variables such as `HTTP_HOST`, `URL`, `REQUEST_METHOD`.
    fn server_variables(&self) -> OrderedMultiMap;

    /// Decoded query string parameters.
    fn query_string(&self) -> OrderedMultiMap;

    /// Decoded form fields.
    fn form(&self) -> OrderedMultiMap;

    fn cookies(&self) -> Vec<RequestCookie>;

    /// Peer address of the connection, if known.
    #[inline]
    fn remote_addr(&self) -> Option<IpAddr> {
        None
    }
}

/// Owned request snapshot implementing [`RequestContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedRequest {
    server_variables: OrderedMultiMap,
    query_string: OrderedMultiMap,
    form: OrderedMultiMap,
    cookies: Vec<RequestCookie>,
    remote_addr: Option<IpAddr>,
}

impl CapturedRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn server_variable<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.server_variables.add(name, value);
        self
    }

    #[must_use]
    pub fn query<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.query_string.add(name, value);
        self
    }

    /// Records a raw query string: stored verbatim as the `QUERY_STRING`
    /// server variable and decoded (`application/x-www-form-urlencoded`) into
    /// query parameters, keeping repeated names.
    #[must_use]
    pub fn with_query_string(mut self, raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        self.server_variables.add("QUERY_STRING", raw);
        self.query_string.extend(url::form_urlencoded::parse(raw.as_bytes()).into_owned());
        self
    }

    #[must_use]
    pub fn form_value<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.form.add(name, value);
        self
    }

    /// Decodes an `application/x-www-form-urlencoded` body into form fields.
    #[must_use]
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        self.form.extend(url::form_urlencoded::parse(body).into_owned());
        self
    }

    #[must_use]
    pub fn cookie(mut self, cookie: RequestCookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    #[must_use]
    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }
}

impl RequestContext for CapturedRequest {
    fn server_variables(&self) -> OrderedMultiMap {
        self.server_variables.clone()
    }

    fn query_string(&self) -> OrderedMultiMap {
        self.query_string.clone()
    }

    fn form(&self) -> OrderedMultiMap {
        self.form.clone()
    }

    fn cookies(&self) -> Vec<RequestCookie> {
        self.cookies.clone()
    }

    fn remote_addr(&self) -> Option<IpAddr> {
        self.remote_addr
    }
}
