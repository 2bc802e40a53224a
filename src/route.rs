//! Route types shared by routers, loaders and renderers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What the orchestrator asks a router to resolve.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RouteQuery {
    pub url_path: String,
    pub query_params: BTreeMap<String, String>,
}

/// The result of matching a request path against a route table.
///
/// Serializes with the camel-case keys templates see under `_route`:
/// `isMatch`, `name`, `urlPath`, `params`, `queryParams`, `host`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub is_match: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url_path: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    #[serde(default)]
    pub query_params: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl Route {
    /// A matched route rendering template `name`.
    pub fn matched(
        name: impl Into<String>,
        url_path: impl Into<String>,
        params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            is_match: true,
            name: Some(name.into()),
            url_path: url_path.into(),
            params,
            ..Self::default()
        }
    }

    pub fn not_found(url_path: impl Into<String>) -> Self {
        Self { url_path: url_path.into(), ..Self::default() }
    }

    /// Template name, or `""` for an unmatched route.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_template_facing_keys() {
        let mut route = Route::matched(
            "post",
            "/posts/hello",
            BTreeMap::from([("slug".to_owned(), "hello".to_owned())]),
        );
        route.host = Some("example.com".into());

        let value = serde_json::to_value(&route).unwrap();
        assert_eq!(value["isMatch"], true);
        assert_eq!(value["name"], "post");
        assert_eq!(value["urlPath"], "/posts/hello");
        assert_eq!(value["params"]["slug"], "hello");
        assert_eq!(value["host"], "example.com");
        assert!(value["queryParams"].as_object().unwrap().is_empty());
    }

    #[test]
    fn unmatched_routes_have_no_name() {
        let route = Route::not_found("/missing");
        assert!(!route.is_match);
        assert_eq!(route.name(), "");
        assert!(serde_json::to_value(&route).unwrap().get("name").is_none());
    }
}
