//! Minimal render-html site: three pages, one feed, served on Lambda or
//! locally.
//!
//! Run locally with:
//!   LOCAL_ADDR=127.0.0.1:3000 RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/
//!   curl -i http://localhost:3000/posts/hello-world?ref=home
//!   curl -i http://localhost:3000/feed.xml
//!   curl -i http://localhost:3000/missing
//!   curl -i http://localhost:3000/posts/broken           # loader failure → 500

use render_html::render::sync_renderer;
use render_html::{BoxError, Config, PageHandler, RenderContext, Route, RouteTable, Server};
use render_html::middleware::Chain;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = Config::from_env()?;

    let logs = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    if config.local().is_some() {
        logs.init();
    } else {
        // CloudWatch adds its own timestamps.
        logs.with_target(false).without_time().init();
    }

    let routes = RouteTable::new()
        .page("/",             "home")
        .page("/posts/{slug}", "post")
        .page("/feed.xml",     "feed");

    let local = config.local();
    let pages = PageHandler::new(config, routes, load, sync_renderer(render));
    let chain = Chain::standard(pages);

    match local {
        Some(addr) => Ok(Server::bind(addr).serve(chain).await?),
        None => render_html::lambda::run(chain).await,
    }
}

// Stand-in for a CMS or database call.
fn load(route: &Route) -> std::future::Ready<Result<Value, BoxError>> {
    let data = match (route.name(), route.param("slug")) {
        (_, Some("broken")) => Err("post store unavailable".into()),
        ("post", Some(slug)) => Ok(json!({ "title": slug.replace('-', " "), "slug": slug })),
        ("home" | "feed", _) => Ok(json!({ "title": "Home", "posts": ["hello-world"] })),
        _ => Ok(json!({})),
    };
    std::future::ready(data)
}

fn render(template: &str, ctx: &RenderContext) -> Result<String, BoxError> {
    let title = ctx.get("title").and_then(Value::as_str).unwrap_or_default();
    match template {
        "home" => Ok(format!(r#"<h1>{title}</h1><a href="/posts/hello-world">hello world</a>"#)),
        "post" => Ok(format!("<article><h1>{title}</h1></article>")),
        "feed" => Ok(format!("<rss version=\"2.0\"><channel><title>{title}</title></channel></rss>")),
        other => Err(format!("no template named `{other}`").into()),
    }
}
