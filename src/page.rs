//! The page orchestrator: route, load, render, respond.
//!
//! ```text
//! START → ROUTING ─┬─ no match ─────────────────────────────→ 404
//!                  └─ match → LOADING → RENDERING → RESPONDING → 200
//!                                 any failure ───────────────→ 500
//! ```
//!
//! Every expected outcome, including collaborator failures, leaves
//! [`PageHandler::handle`] as a [`Response`]. Only the middleware chain can
//! still produce an `Err`.

use std::sync::Arc;

use serde_json::json;
use tracing::{Instrument, debug, info_span};

use crate::config::Config;
use crate::error::Error;
use crate::handler::{BoxFuture, Handler};
use crate::loader::DataLoader;
use crate::mime;
use crate::render::{RenderContext, Renderer};
use crate::request::RequestEvent;
use crate::response::Response;
use crate::route::{Route, RouteQuery};
use crate::router::RouteMatcher;
use crate::sink::{ErrorSink, TracingSink};
use crate::status::Status;
use crate::timing::ServerTimer;

pub const TOTAL_TIMING: &str = "Request (total)";
pub const ROUTING_TIMING: &str = "Routing";
pub const LOAD_TIMING: &str = "Load data";
pub const RENDER_TIMING: &str = "Rendering";

pub const PRODUCTION_ERROR_BODY: &str = "Server Error (500)";

const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Renders one page per request from a router, a loader and a renderer.
///
/// Cheap to clone: collaborators are shared behind `Arc`.
///
/// ```rust
/// use render_html::{Config, PageHandler, RouteTable, StaticData, render::sync_renderer};
/// use serde_json::json;
///
/// let pages = PageHandler::new(
///     Config::default().verbose_errors(false),
///     RouteTable::new().page("/about", "about"),
///     StaticData(json!({ "title": "About" })),
///     sync_renderer(|_, ctx| {
///         let title = ctx.get("title").and_then(|v| v.as_str()).unwrap_or_default();
///         Ok(format!("<h1>{title}</h1>"))
///     }),
/// );
/// # let _ = pages;
/// ```
#[derive(Clone)]
pub struct PageHandler {
    config: Arc<Config>,
    router: Arc<dyn RouteMatcher>,
    loader: Arc<dyn DataLoader>,
    renderer: Arc<dyn Renderer>,
    sink: Arc<dyn ErrorSink>,
}

impl PageHandler {
    pub fn new(
        config: Config,
        router: impl RouteMatcher,
        loader: impl DataLoader,
        renderer: impl Renderer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            router: Arc::new(router),
            loader: Arc::new(loader),
            renderer: Arc::new(renderer),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replaces the default [`TracingSink`].
    pub fn error_sink(mut self, sink: impl ErrorSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn config(&self) -> &Config { &self.config }

    /// Handles one request. Never fails: collaborator errors become `500`s.
    pub async fn handle(&self, event: RequestEvent) -> Response {
        let span = info_span!("page", path = %event.path());
        async {
            let mut timer = self.config.timing_enabled.then(|| ServerTimer::start(TOTAL_TIMING));
            match self.render_page(&event, &mut timer).await {
                Ok(res) => res,
                Err(err) => {
                    self.sink.record(&err);
                    self.server_error(&err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn render_page(
        &self,
        event: &RequestEvent,
        timer: &mut Option<ServerTimer>,
    ) -> Result<Response, Error> {
        let query = RouteQuery {
            url_path: event.path().to_owned(),
            query_params: event.query_string_parameters().cloned().unwrap_or_default(),
        };
        let mut route = timed(timer, ROUTING_TIMING, self.router.match_route(query))
            .await
            .map_err(Error::Routing)?;

        if !route.is_match {
            debug!(url_path = %route.url_path, "no route matched");
            return Ok(self.not_found());
        }
        merge_request_fields(&mut route, event);

        let data = timed(timer, LOAD_TIMING, self.loader.load(&route))
            .await
            .map_err(|source| Error::LoadData { route: route.name().to_owned(), source })?;

        let context = RenderContext::new(data, &route).map_err(|e| Error::Render {
            template: route.name().to_owned(),
            source: e.into(),
        })?;
        let body = timed(timer, RENDER_TIMING, self.renderer.render(route.name(), context))
            .await
            .map_err(|source| Error::Render { template: route.name().to_owned(), source })?;

        let content_type = mime::lookup(&route.url_path).unwrap_or(DEFAULT_CONTENT_TYPE);
        let mut res = Response::builder()
            .status(Status::Ok)
            .header("Content-Type", content_type);
        if let Some(timer) = timer {
            res = res.header("Server-Timing", &timer.timings_to_string());
        }
        Ok(res.body(body))
    }

    fn not_found(&self) -> Response {
        Response::html(Status::NotFound, self.config.not_found_body.as_str())
    }

    fn server_error(&self, err: &Error) -> Response {
        if !self.config.verbose_errors {
            return Response::html(Status::InternalServerError, PRODUCTION_ERROR_BODY);
        }
        let detail = json!({ "statusCode": 500, "error": err.to_string() });
        let detail = serde_json::to_string_pretty(&detail).unwrap_or_else(|_| err.to_string());
        Response::html(
            Status::InternalServerError,
            format!("<h1>{PRODUCTION_ERROR_BODY}</h1><pre><code>{}</code></pre>", escape_html(&detail)),
        )
    }
}

impl Handler for PageHandler {
    fn call(&self, event: RequestEvent) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin(async move { Ok(self.handle(event).await) })
    }
}

/// Awaits `fut`, timing it when a timer session is active.
async fn timed<F: std::future::Future>(
    timer: &mut Option<ServerTimer>,
    phase: &str,
    fut: F,
) -> F::Output {
    match timer {
        Some(timer) => timer.with_timing(phase, fut).await,
        None => fut.await,
    }
}

/// Copies request-derived fields the router does not know about.
fn merge_request_fields(route: &mut Route, event: &RequestEvent) {
    if let Some(query) = event.query_string_parameters() {
        route.query_params.extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    route.host = event.header("host").map(str::to_owned);
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;
    use crate::error::BoxError;
    use crate::loader::StaticData;
    use crate::render::sync_renderer;
    use crate::router::RouteTable;

    #[derive(Clone, Default)]
    struct Recorded(Arc<Mutex<Vec<String>>>);

    impl ErrorSink for Recorded {
        fn record(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    fn title_renderer() -> impl Renderer {
        sync_renderer(|_: &str, ctx: &RenderContext| {
            let title = ctx.get("title").and_then(Value::as_str).unwrap_or_default();
            Ok::<_, BoxError>(format!("<h1>{title}</h1>"))
        })
    }

    fn about_pages(config: Config) -> PageHandler {
        PageHandler::new(
            config,
            RouteTable::new().page("/about", "about").page("/feed.xml", "feed"),
            StaticData(json!({ "title": "About" })),
            title_renderer(),
        )
    }

    fn failing_loader(config: Config) -> (PageHandler, Recorded) {
        let sink = Recorded::default();
        let loader = |_: &Route| async { Err::<Value, BoxError>("db down".into()) };
        let pages = PageHandler::new(config, RouteTable::new().page("/about", "about"), loader, title_renderer())
            .error_sink(sink.clone());
        (pages, sink)
    }

    #[tokio::test]
    async fn matched_page_renders_as_html() {
        let res = about_pages(Config::default().timing(false))
            .handle(RequestEvent::new("/about"))
            .await;

        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), "<h1>About</h1>");
        assert_eq!(res.headers(), [("Content-Type".to_owned(), "text/html".to_owned())]);
    }

    #[tokio::test]
    async fn content_type_follows_the_url_extension() {
        let res = about_pages(Config::default()).handle(RequestEvent::new("/feed.xml")).await;
        assert_eq!(res.header("content-type"), Some("application/xml"));
    }

    #[tokio::test]
    async fn unmatched_path_is_a_404() {
        let res = about_pages(Config::default()).handle(RequestEvent::new("/missing")).await;

        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), "<h1>404</h1>");
        assert_eq!(res.header("content-type"), Some("text/html"));
        assert_eq!(res.header("server-timing"), None);
    }

    #[tokio::test]
    async fn not_found_body_is_configurable() {
        let res = about_pages(Config::default().not_found_body("404"))
            .handle(RequestEvent::new("/missing"))
            .await;
        assert_eq!(res.body(), "404");
    }

    #[tokio::test]
    async fn loader_failure_is_a_verbose_500_outside_production() {
        let (pages, sink) = failing_loader(Config::default());
        let res = pages.handle(RequestEvent::new("/about")).await;

        assert_eq!(res.status_code(), 500);
        assert_eq!(res.header("content-type"), Some("text/html"));
        assert!(res.body().starts_with("<h1>Server Error (500)</h1><pre><code>"));
        assert!(res.body().contains("db down"));
        assert!(res.body().contains("&quot;statusCode&quot;: 500"));
        assert_eq!(sink.0.lock().unwrap().as_slice(), ["failed to load data for `about`: db down"]);
    }

    #[tokio::test]
    async fn loader_failure_is_opaque_in_production() {
        let (pages, sink) = failing_loader(Config::default().verbose_errors(false));
        let res = pages.handle(RequestEvent::new("/about")).await;

        assert_eq!(res.status_code(), 500);
        assert_eq!(res.body(), "Server Error (500)");
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn routing_failures_are_caught_too() {
        let sink = Recorded::default();
        let router = |_: RouteQuery| async { Err::<Route, BoxError>("routes unavailable".into()) };
        let pages = PageHandler::new(Config::default(), router, StaticData::default(), title_renderer())
            .error_sink(sink.clone());

        let res = pages.handle(RequestEvent::new("/")).await;
        assert_eq!(res.status_code(), 500);
        assert!(res.body().contains("routes unavailable"));
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn renderer_failure_is_a_500() {
        let renderer = sync_renderer(|template: &str, _: &RenderContext| {
            Err::<String, BoxError>(format!("no template named {template}").into())
        });
        let pages = PageHandler::new(
            Config::default(),
            RouteTable::new().page("/about", "about"),
            StaticData::default(),
            renderer,
        )
        .error_sink(Recorded::default());

        let res = pages.handle(RequestEvent::new("/about")).await;
        assert_eq!(res.status_code(), 500);
        assert!(res.body().contains("no template named about"));
    }

    #[tokio::test]
    async fn server_timing_lists_each_phase() {
        let res = about_pages(Config::default()).handle(RequestEvent::new("/about")).await;

        let timing = res.header("Server-Timing").unwrap();
        let names: Vec<_> = timing.split(", ")
            .map(|entry| entry.split_once(";dur=").unwrap().0)
            .collect();
        assert_eq!(names, [ROUTING_TIMING, LOAD_TIMING, RENDER_TIMING, TOTAL_TIMING]);
    }

    #[tokio::test]
    async fn context_carries_route_query_and_host() {
        let renderer = |_: &str, ctx: RenderContext| async move {
            Ok::<_, BoxError>(serde_json::to_string(&ctx).unwrap())
        };
        let pages = PageHandler::new(
            Config::default(),
            RouteTable::new().page("/posts/{slug}", "post"),
            StaticData(json!({ "title": "Hello" })),
            renderer,
        );

        let res = pages
            .handle(
                RequestEvent::new("/posts/hello")
                    .with_query("page", "2")
                    .with_header("Host", "example.com"),
            )
            .await;
        let ctx: Value = serde_json::from_str(res.body()).unwrap();

        assert_eq!(ctx["title"], "Hello");
        assert_eq!(ctx["_data"], json!({ "title": "Hello" }));
        assert_eq!(ctx["_params"], json!({ "slug": "hello" }));
        assert_eq!(ctx["_route"]["name"], "post");
        assert_eq!(ctx["_route"]["queryParams"], json!({ "page": "2" }));
        assert_eq!(ctx["_route"]["host"], "example.com");
    }

    #[tokio::test]
    async fn same_event_twice_gives_the_same_page() {
        let pages = about_pages(Config::default());
        let first = pages.handle(RequestEvent::new("/about")).await;
        let second = pages.handle(RequestEvent::new("/about")).await;

        assert_eq!(first.status_code(), second.status_code());
        assert_eq!(first.body(), second.body());
    }

    #[test]
    fn escapes_markup_in_error_details() {
        assert_eq!(escape_html(r#"<b>"x" & 'y'</b>"#), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn merges_query_and_host_into_the_route() {
        let mut route = Route::matched("post", "/p", BTreeMap::new());
        merge_request_fields(
            &mut route,
            &RequestEvent::new("/p").with_query("q", "1").with_header("HOST", "h"),
        );
        assert_eq!(route.query_params.get("q").map(String::as_str), Some("1"));
        assert_eq!(route.host.as_deref(), Some("h"));
    }
}
