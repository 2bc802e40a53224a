//! Last-resort error interception.

use tracing::{error, warn};

use super::Middleware;
use crate::error::Error;
use crate::response::Response;

/// Converts any error reaching it into a plain-text response.
///
/// Client errors (`4xx`) carry the error message; server errors only carry
/// the reason phrase, so nothing internal leaks past this layer. The page
/// orchestrator already turns its own failures into `500` pages, so this
/// only sees validation failures and errors from custom handlers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatchErrors;

impl Middleware for CatchErrors {
    fn name(&self) -> &'static str { "catch" }

    fn on_error(&self, err: &Error) -> Option<Response> {
        let status = err.status();
        let code = u16::from(status);
        let body = if code < 500 {
            warn!(status = code, error = %err, "request rejected");
            err.to_string()
        } else {
            error!(status = code, error = %err, "unhandled error");
            status.reason().to_owned()
        };
        Some(Response::text(status, body))
    }
}
