//! Unified error type.

use crate::status::Status;

/// A boxed collaborator failure. Same shape as `lambda_http::Error`, so
/// routers, loaders and renderers can use `?` on anything that implements
/// `std::error::Error`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by render-html's fallible operations.
///
/// A missing route is not an error: it is a `404` [`Response`](crate::Response).
/// `Error` covers collaborator failures, validation failures and
/// infrastructure failures (binding a port, building a host response).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("route matching failed: {0}")]
    Routing(#[source] BoxError),

    #[error("failed to load data for `{route}`: {source}")]
    LoadData {
        route: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to render template `{template}`: {source}")]
    Render {
        template: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("response: {0}")]
    Response(#[from] http::Error),
}

impl Error {
    /// The status code this error surfaces as when it reaches the client.
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidEvent(_) => Status::BadRequest,
            _ => Status::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_keep_the_cause_in_their_message() {
        let err = Error::LoadData { route: "about".into(), source: "db down".into() };
        assert_eq!(err.to_string(), "failed to load data for `about`: db down");
        assert_eq!(err.status(), Status::InternalServerError);
    }

    #[test]
    fn invalid_event_is_a_client_error() {
        assert_eq!(Error::InvalidEvent("no path".into()).status(), Status::BadRequest);
    }
}
