//! # render-html
//!
//! A serverless page renderer. One function, one job: turn a URL into a page.
//!
//! ## The contract
//!
//! Every request walks the same four steps:
//!
//! 1. **Route**: a [`RouteMatcher`] resolves the path to a template name.
//! 2. **Load**: a [`DataLoader`] fetches the data that template needs.
//! 3. **Render**: a [`Renderer`] turns name + [`RenderContext`] into a body.
//! 4. **Respond**: the content type comes from the URL's extension
//!    (`text/html` when there is none), phase timings go in `Server-Timing`.
//!
//! An unknown path is a `404` page. A failing loader or renderer is a `500`
//! page, detailed in development and opaque in production. Nothing escapes
//! [`PageHandler`] as an error.
//!
//! Around it, a [`Chain`](middleware::Chain) normalizes the event, validates
//! input and output, intercepts stray errors and adds security headers.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use render_html::{BoxError, Config, PageHandler, Route, RouteTable, middleware::Chain};
//! use render_html::render::sync_renderer;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_http::Error> {
//!     let pages = PageHandler::new(
//!         Config::from_env()?,
//!         RouteTable::new()
//!             .page("/",             "home")
//!             .page("/posts/{slug}", "post"),
//!         |route: &Route| {
//!             let slug = route.param("slug").unwrap_or("home").to_owned();
//!             async move { Ok::<_, BoxError>(json!({ "title": slug })) }
//!         },
//!         sync_renderer(|template, ctx| {
//!             Ok(format!("<h1>{template}: {}</h1>", ctx.get("title").unwrap_or(&json!(null))))
//!         }),
//!     );
//!
//!     render_html::lambda::run(Chain::standard(pages)).await
//! }
//! ```

mod error;
mod handler;
mod loader;
mod page;
mod request;
mod response;
mod route;
mod router;
mod server;
mod sink;
mod status;
mod timing;

pub mod config;
pub mod lambda;
pub mod middleware;
pub mod mime;
pub mod render;

pub use config::Config;
pub use error::{BoxError, Error};
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use loader::{DataLoader, StaticData};
pub use page::PageHandler;
pub use render::{RenderContext, Renderer};
pub use request::RequestEvent;
pub use response::{Response, ResponseBuilder};
pub use route::{Route, RouteQuery};
pub use router::{RouteMatcher, RouteTable};
pub use server::{Server, event_from_http};
pub use sink::{ErrorSink, TracingSink};
pub use status::Status;
pub use timing::ServerTimer;
