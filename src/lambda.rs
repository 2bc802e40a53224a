//! AWS Lambda host.
//!
//! API Gateway proxy events arrive as `lambda_http::Request`s; they are
//! flattened into a [`RequestEvent`], run through the [`Chain`], and the
//! [`Response`] is converted back at the edge.

use std::collections::BTreeMap;

use lambda_http::{Body, Request as LambdaRequest, RequestExt, service_fn};
use tracing::error;

use crate::error::Error;
use crate::middleware::Chain;
use crate::request::RequestEvent;
use crate::response::Response;

/// Serves `chain` on the Lambda runtime until the runtime shuts it down.
pub async fn run(chain: Chain) -> Result<(), lambda_http::Error> {
    let chain = &chain;
    lambda_http::run(service_fn(move |req: LambdaRequest| async move {
        invoke(chain, req).await
    }))
    .await
}

async fn invoke(
    chain: &Chain,
    req: LambdaRequest,
) -> Result<lambda_http::Response<Body>, lambda_http::Error> {
    let res = chain.run(event_from_lambda(&req)).await.inspect_err(|e| {
        error!(error = %e, "request failed outside the page handler");
    })?;
    Ok(into_lambda(res)?)
}

/// Builds a [`RequestEvent`] from an API Gateway / function URL request.
pub fn event_from_lambda(req: &LambdaRequest) -> RequestEvent {
    let query = req.query_string_parameters();
    let query: BTreeMap<String, String> = query.iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

    let headers = req.headers().iter()
        .filter_map(|(name, value)| Some((name.as_str().to_owned(), value.to_str().ok()?.to_owned())))
        .collect();

    // Function URLs and hand-built requests carry no raw path extension.
    let path = match req.raw_http_path() {
        "" => req.uri().path(),
        raw => raw,
    };

    RequestEvent {
        path: path.to_owned(),
        query_string_parameters: (!query.is_empty()).then_some(query),
        headers: Some(headers),
    }
}

/// Converts a [`Response`] into the Lambda runtime's response type.
pub fn into_lambda(res: Response) -> Result<lambda_http::Response<Body>, Error> {
    let mut builder = lambda_http::Response::builder().status(res.status);
    for (name, value) in &res.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    Ok(builder.body(Body::Text(res.body))?)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::{Value, json};

    use super::*;
    use crate::config::Config;
    use crate::error::BoxError;
    use crate::loader::StaticData;
    use crate::page::PageHandler;
    use crate::render::{RenderContext, sync_renderer};
    use crate::router::RouteTable;
    use crate::status::Status;

    fn proxy_request(uri: &str, raw_path: &str, query: &[(&str, &str)]) -> LambdaRequest {
        let query: HashMap<String, String> = query.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        lambda_http::http::Request::builder()
            .uri(uri)
            .header("Host", "example.com")
            .body(Body::Empty)
            .unwrap()
            .with_query_string_parameters(query)
            .with_raw_http_path(raw_path)
    }

    fn post_chain() -> Chain {
        Chain::standard(PageHandler::new(
            Config::default(),
            RouteTable::new().page("/posts/{slug}", "post"),
            StaticData(json!({ "title": "Hello" })),
            sync_renderer(|_: &str, ctx: &RenderContext| {
                let title = ctx.get("title").and_then(Value::as_str).unwrap_or_default();
                let page = ctx.get("_route")
                    .and_then(|route| route["queryParams"]["page"].as_str())
                    .unwrap_or("none");
                Ok::<_, BoxError>(format!("<h1>{title}</h1><p>page {page}</p>"))
            }),
        ))
    }

    fn text(res: &lambda_http::Response<Body>) -> &str {
        match res.body() {
            Body::Text(body) => body,
            other => panic!("expected a text body, got {other:?}"),
        }
    }

    #[test]
    fn converts_responses_to_text_bodies() {
        let res = Response::builder()
            .status(Status::NotFound)
            .header("content-type", "text/html")
            .body("<h1>404</h1>");
        let lambda = into_lambda(res).unwrap();

        assert_eq!(lambda.status(), 404);
        assert_eq!(lambda.headers()["content-type"], "text/html");
        assert!(matches!(lambda.body(), Body::Text(body) if body == "<h1>404</h1>"));
    }

    #[test]
    fn reads_headers_from_plain_requests() {
        let req = lambda_http::http::Request::builder()
            .uri("https://example.com/about")
            .header("Host", "example.com")
            .body(Body::Empty)
            .unwrap();
        let event = event_from_lambda(&req);

        assert_eq!(event.path(), "/about");
        assert_eq!(event.header("host"), Some("example.com"));
        assert!(event.query_string_parameters().is_none());
    }

    #[test]
    fn proxy_events_use_the_raw_path_and_query_map() {
        let req = proxy_request(
            "https://example.com/prod/posts/hello?page=2",
            "/posts/hello",
            &[("page", "2"), ("sort", "new")],
        );
        let event = event_from_lambda(&req);

        assert_eq!(event.path(), "/posts/hello");
        assert_eq!(event.query("page"), Some("2"));
        assert_eq!(event.query("sort"), Some("new"));
        assert_eq!(event.query_string_parameters().map(|q| q.len()), Some(2));
    }

    #[tokio::test]
    async fn invoke_renders_through_the_standard_chain() {
        let chain = post_chain();
        let req = proxy_request("https://example.com/posts/hello?page=2", "/posts/hello", &[("page", "2")]);
        let res = invoke(&chain, req).await.unwrap();

        assert_eq!(res.status(), 200);
        assert_eq!(text(&res), "<h1>Hello</h1><p>page 2</p>");
        assert_eq!(res.headers()["content-type"], "text/html");
        assert_eq!(res.headers()["x-content-type-options"], "nosniff");
        assert_eq!(res.headers()["x-frame-options"], "DENY");
        assert!(res.headers().contains_key("server-timing"));
    }

    #[tokio::test]
    async fn invoke_answers_unknown_paths_with_404() {
        let chain = post_chain();
        let res = invoke(&chain, proxy_request("https://example.com/nope", "/nope", &[])).await.unwrap();

        assert_eq!(res.status(), 404);
        assert_eq!(text(&res), "<h1>404</h1>");
        assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    }
}
