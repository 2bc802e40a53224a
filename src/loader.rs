//! Data loading seam.

use std::future::Future;

use serde_json::Value;

use crate::error::BoxError;
use crate::handler::BoxFuture;
use crate::route::Route;

/// Fetches the data a matched route's template needs.
///
/// Called once per request, after routing succeeded. The returned value is
/// usually a JSON object; its top-level fields become template variables.
pub trait DataLoader: Send + Sync + 'static {
    fn load<'a>(&'a self, route: &'a Route) -> BoxFuture<'a, Result<Value, BoxError>>;
}

/// Async closures taking `&Route` are loaders. The returned future must not
/// borrow the route; clone what it needs.
///
/// ```rust
/// use render_html::{BoxError, Route};
/// use serde_json::json;
///
/// let loader = |route: &Route| {
///     let slug = route.param("slug").unwrap_or_default().to_owned();
///     async move { Ok::<_, BoxError>(json!({ "title": slug })) }
/// };
/// # fn assert_loader(_: impl render_html::DataLoader) {}
/// # assert_loader(loader);
/// ```
impl<F, Fut> DataLoader for F
where
    F: Fn(&Route) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    fn load<'a>(&'a self, route: &'a Route) -> BoxFuture<'a, Result<Value, BoxError>> {
        Box::pin((self)(route))
    }
}

/// A loader that hands every route the same data. Handy for static sites and
/// tests.
#[derive(Clone, Debug, Default)]
pub struct StaticData(pub Value);

impl DataLoader for StaticData {
    fn load<'a>(&'a self, _route: &'a Route) -> BoxFuture<'a, Result<Value, BoxError>> {
        Box::pin(async move { Ok(self.0.clone()) })
    }
}
