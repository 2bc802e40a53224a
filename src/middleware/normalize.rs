//! Event shape normalization.

use std::collections::BTreeMap;

use super::Middleware;
use crate::error::Error;
use crate::request::RequestEvent;

/// Gives the handler a predictable event.
///
/// - `query_string_parameters` and `headers` are always present (empty when
///   the host sent none).
/// - header names are lower-cased; on a case-only collision the last one
///   in iteration order wins.
/// - an empty path becomes `/`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizeEvent;

impl Middleware for NormalizeEvent {
    fn name(&self) -> &'static str { "normalize" }

    fn before(&self, event: &mut RequestEvent) -> Result<(), Error> {
        if event.path.is_empty() {
            event.path.push('/');
        }
        event.query_string_parameters.get_or_insert_with(BTreeMap::new);

        let headers = event.headers.take().unwrap_or_default();
        event.headers = Some(
            headers.into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_in_missing_maps() {
        let mut event = RequestEvent::new("");
        NormalizeEvent.before(&mut event).unwrap();

        assert_eq!(event.path(), "/");
        assert!(event.query_string_parameters().is_some_and(BTreeMap::is_empty));
        assert!(event.headers().is_some_and(BTreeMap::is_empty));
    }

    #[test]
    fn lower_cases_header_names() {
        let mut event = RequestEvent::new("/about")
            .with_header("Host", "example.com")
            .with_header("X-Request-Id", "abc");
        NormalizeEvent.before(&mut event).unwrap();

        let names: Vec<_> = event.headers().unwrap().keys().map(String::as_str).collect();
        assert_eq!(names, ["host", "x-request-id"]);
        assert_eq!(event.path(), "/about");
    }
}
