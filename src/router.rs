//! Route matching.
//!
//! [`RouteMatcher`] is the seam the orchestrator calls. [`RouteTable`] is the
//! stock implementation: a radix tree from path patterns to template names.
//! Anything smarter (routes from a CMS, redirects, locales) implements the
//! trait or is passed as an async closure.

use std::future::Future;

use matchit::Router as MatchitRouter;

use crate::error::BoxError;
use crate::handler::BoxFuture;
use crate::route::{Route, RouteQuery};

/// Resolves a request path to a [`Route`].
///
/// An unmatched path is `Ok(Route::not_found(..))`, not an error. `Err` means
/// the router itself failed.
pub trait RouteMatcher: Send + Sync + 'static {
    fn match_route(&self, query: RouteQuery) -> BoxFuture<'_, Result<Route, BoxError>>;
}

impl<F, Fut> RouteMatcher for F
where
    F: Fn(RouteQuery) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Route, BoxError>> + Send + 'static,
{
    fn match_route(&self, query: RouteQuery) -> BoxFuture<'_, Result<Route, BoxError>> {
        Box::pin((self)(query))
    }
}

/// Path-pattern → template-name table.
///
/// One radix tree, O(path-length) lookup. Build it once at startup.
///
/// ```rust
/// use render_html::RouteTable;
///
/// let routes = RouteTable::new()
///     .page("/",             "home")
///     .page("/posts/{slug}", "post")
///     .page("/feed.xml",     "feed");
/// ```
pub struct RouteTable {
    tree: MatchitRouter<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { tree: MatchitRouter::new() }
    }

    /// Registers `pattern` to render `template`. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and end up in [`Route::params`].
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is malformed or conflicts with one already
    /// registered. Route tables are static, so this fails at startup.
    pub fn page(mut self, pattern: &str, template: &str) -> Self {
        self.tree
            .insert(pattern, template.to_owned())
            .unwrap_or_else(|e| panic!("invalid route `{pattern}`: {e}"));
        self
    }

    /// Synchronous lookup behind [`RouteMatcher::match_route`].
    pub fn lookup(&self, query: RouteQuery) -> Route {
        let Ok(matched) = self.tree.at(&query.url_path) else {
            return Route::not_found(query.url_path.clone());
        };
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        let mut route = Route::matched(matched.value.as_str(), query.url_path.as_str(), params);
        route.query_params = query.query_params;
        route
    }
}

impl Default for RouteTable {
    fn default() -> Self { Self::new() }
}

impl RouteMatcher for RouteTable {
    fn match_route(&self, query: RouteQuery) -> BoxFuture<'_, Result<Route, BoxError>> {
        let route = self.lookup(query);
        Box::pin(async move { Ok(route) })
    }
}
