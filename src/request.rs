//! Incoming request event.
//!
//! The shape mirrors an API Gateway proxy event, trimmed to what rendering
//! needs. Hosts build it from their own request type; the normalization
//! middleware fills in the optional maps before the handler sees it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An inbound HTTP request descriptor.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    pub(crate) path: String,
    #[serde(default)]
    pub(crate) query_string_parameters: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub(crate) headers: Option<BTreeMap<String, String>>,
}

impl RequestEvent {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query_string_parameters: None, headers: None }
    }

    /// Adds one query parameter. A repeated key keeps the last value.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn path(&self) -> &str { &self.path }
    pub fn query_string_parameters(&self) -> Option<&BTreeMap<String, String>> {
        self.query_string_parameters.as_ref()
    }
    pub fn headers(&self) -> Option<&BTreeMap<String, String>> { self.headers.as_ref() }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref()?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a query parameter by exact key.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query_string_parameters.as_ref()?.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let event = RequestEvent::new("/").with_header("Host", "example.com");
        assert_eq!(event.header("host"), Some("example.com"));
        assert_eq!(event.header("HOST"), Some("example.com"));
        assert_eq!(event.header("accept"), None);
    }

    #[test]
    fn deserializes_a_proxy_event() {
        let event: RequestEvent = serde_json::from_str(
            r#"{"path":"/posts/hello","queryStringParameters":{"page":"2"},"headers":null}"#,
        ).unwrap();
        assert_eq!(event.path(), "/posts/hello");
        assert_eq!(event.query("page"), Some("2"));
        assert!(event.headers().is_none());
    }
}
