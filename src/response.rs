//! Outgoing HTTP-shaped response.
//!
//! A [`Response`] is host-agnostic: status, ordered headers, string body.
//! The Lambda adapter and the local server each convert it into their own
//! response type at the very edge.

use bytes::Bytes;
use http_body_util::Full;

use crate::status::Status;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing response.
///
/// ```rust
/// use render_html::{Response, Status};
///
/// let res = Response::builder()
///     .status(Status::Ok)
///     .header("Content-Type", "application/xml")
///     .body("<ok/>");
/// assert_eq!(res.header("content-type"), Some("application/xml"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub(crate) status: u16,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: String,
}

impl Response {
    /// `text/html` response with the given status.
    pub fn html(status: Status, body: impl Into<String>) -> Self {
        Self::builder()
            .status(status)
            .header("content-type", "text/html")
            .body(body)
    }

    /// `text/plain` response with the given status.
    pub fn text(status: Status, body: impl Into<String>) -> Self {
        Self::builder()
            .status(status)
            .header("content-type", "text/plain; charset=utf-8")
            .body(body)
    }

    /// Builder for responses that need a custom content type or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &str { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Appends `name: value` unless a header with that name already exists.
    pub(crate) fn insert_default_header(&mut self, name: &str, value: &str) {
        if self.header(name).is_none() {
            self.headers.push((name.to_owned(), value.to_owned()));
        }
    }

    /// Converts into the `http` crate's response type used by hyper.
    pub(crate) fn into_http(self) -> Result<http::Response<Full<Bytes>>, http::Error> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(Bytes::from(self.body)))
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn body(self, body: impl Into<String>) -> Response {
        Response { status: self.status, headers: self.headers, body: body.into() }
    }
}
