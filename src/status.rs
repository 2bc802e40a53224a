//! The status codes a render-html handler can answer with.
//!
//! The orchestrator produces exactly three outcomes (`200`, `404`, `500`);
//! input validation adds `400`. Anything else leaving the chain is rejected by
//! the output schema.
//!
//! ```rust
//! use render_html::{Response, Status};
//!
//! let res = Response::html(Status::NotFound, "<h1>404</h1>");
//! assert_eq!(res.status_code(), 404);
//! ```

/// A status code a render-html response may carry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    Ok,                  // 200
    BadRequest,          // 400
    NotFound,            // 404
    InternalServerError, // 500
}

impl Status {
    /// Canonical reason phrase, used as the body of intercepted errors.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                  => "OK",
            Self::BadRequest          => "Bad Request",
            Self::NotFound            => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::InternalServerError => 500,
        }
    }
}

impl TryFrom<u16> for Status {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, u16> {
        match code {
            200 => Ok(Self::Ok),
            400 => Ok(Self::BadRequest),
            404 => Ok(Self::NotFound),
            500 => Ok(Self::InternalServerError),
            other => Err(other),
        }
    }
}
