//! Rendering seam and the context handed to templates.

use std::future::{Future, ready};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BoxError;
use crate::handler::BoxFuture;
use crate::route::Route;

/// Keys the orchestrator always owns in a [`RenderContext`].
pub const DATA_KEY: &str = "_data";
pub const ROUTE_KEY: &str = "_route";
pub const PARAMS_KEY: &str = "_params";

// ── RenderContext ─────────────────────────────────────────────────────────────

/// The variables a template is rendered with.
///
/// Top-level fields of the loaded data, then the reserved keys `_data`,
/// `_route` and `_params`. Reserved keys are written last, so a loader that
/// returns its own `_route` field cannot hide the real route from templates.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(Map<String, Value>);

impl RenderContext {
    pub fn new(data: Value, route: &Route) -> Result<Self, serde_json::Error> {
        let mut vars = data.as_object().cloned().unwrap_or_default();
        vars.insert(DATA_KEY.to_owned(), data);
        vars.insert(ROUTE_KEY.to_owned(), serde_json::to_value(route)?);
        vars.insert(PARAMS_KEY.to_owned(), serde_json::to_value(&route.params)?);
        Ok(Self(vars))
    }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    /// The loaded data, exactly as the loader returned it.
    pub fn data(&self) -> &Value { self.0.get(DATA_KEY).unwrap_or(&Value::Null) }

    pub fn as_map(&self) -> &Map<String, Value> { &self.0 }

    pub fn into_value(self) -> Value { Value::Object(self.0) }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

/// Turns a template name plus context into a response body.
pub trait Renderer: Send + Sync + 'static {
    fn render<'a>(
        &'a self,
        template: &'a str,
        context: RenderContext,
    ) -> BoxFuture<'a, Result<String, BoxError>>;
}

impl<F, Fut> Renderer for F
where
    F: Fn(&str, RenderContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, BoxError>> + Send + 'static,
{
    fn render<'a>(
        &'a self,
        template: &'a str,
        context: RenderContext,
    ) -> BoxFuture<'a, Result<String, BoxError>> {
        Box::pin((self)(template, context))
    }
}

/// Adapts a synchronous render function.
///
/// ```rust
/// use render_html::{BoxError, RenderContext, render::sync_renderer};
///
/// let renderer = sync_renderer(|template: &str, ctx: &RenderContext| {
///     let title = ctx.get("title").and_then(|v| v.as_str()).unwrap_or(template);
///     Ok::<_, BoxError>(format!("<h1>{title}</h1>"))
/// });
/// # fn assert_renderer(_: impl render_html::Renderer) {}
/// # assert_renderer(renderer);
/// ```
pub fn sync_renderer<F>(f: F) -> SyncRenderer<F>
where
    F: Fn(&str, &RenderContext) -> Result<String, BoxError> + Send + Sync + 'static,
{
    SyncRenderer(f)
}

/// See [`sync_renderer`].
pub struct SyncRenderer<F>(F);

impl<F> Renderer for SyncRenderer<F>
where
    F: Fn(&str, &RenderContext) -> Result<String, BoxError> + Send + Sync + 'static,
{
    fn render<'a>(
        &'a self,
        template: &'a str,
        context: RenderContext,
    ) -> BoxFuture<'a, Result<String, BoxError>> {
        Box::pin(ready((self.0)(template, &context)))
    }
}
