//! Input and output schema validation.

use super::Middleware;
use crate::error::Error;
use crate::request::RequestEvent;
use crate::response::Response;
use crate::status::Status;

type Check<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Rejects malformed events before the handler and malformed responses
/// after it.
///
/// Input failures surface as [`Error::InvalidEvent`] (`400`), output failures
/// as [`Error::InvalidResponse`] (`500`). The default schemas are
/// [`event_schema`] and [`response_schema`].
pub struct Validate {
    input: Check<RequestEvent>,
    output: Check<Response>,
}

impl Default for Validate {
    fn default() -> Self {
        Self::new(event_schema, response_schema)
    }
}

impl Validate {
    pub fn new(
        input: impl Fn(&RequestEvent) -> Result<(), String> + Send + Sync + 'static,
        output: impl Fn(&Response) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self { input: Box::new(input), output: Box::new(output) }
    }
}

impl Middleware for Validate {
    fn name(&self) -> &'static str { "validate" }

    fn before(&self, event: &mut RequestEvent) -> Result<(), Error> {
        (self.input)(event).map_err(Error::InvalidEvent)
    }

    fn after(&self, res: &mut Response) -> Result<(), Error> {
        (self.output)(res).map_err(Error::InvalidResponse)
    }
}

/// Default input schema.
///
/// The path is absolute and free of control characters; header names are
/// HTTP tokens.
pub fn event_schema(event: &RequestEvent) -> Result<(), String> {
    let path = event.path();
    if !path.starts_with('/') {
        return Err(format!("path `{path}` must start with `/`"));
    }
    if path.chars().any(char::is_control) {
        return Err("path must not contain control characters".to_owned());
    }
    for name in event.headers().into_iter().flat_map(|h| h.keys()) {
        if !is_token(name) {
            return Err(format!("invalid header name `{name}`"));
        }
    }
    Ok(())
}

/// Default output schema.
///
/// The status is one render-html produces, header names are tokens, and no
/// header value contains a line break.
pub fn response_schema(res: &Response) -> Result<(), String> {
    Status::try_from(res.status_code())
        .map_err(|code| format!("unexpected status code {code}"))?;
    for (name, value) in res.headers() {
        if !is_token(name) {
            return Err(format!("invalid header name `{name}`"));
        }
        if value.contains(['\r', '\n']) {
            return Err(format!("header `{name}` contains a line break"));
        }
    }
    Ok(())
}

/// RFC 9110 `token`.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
