//! Middleware layer.
//!
//! Middleware is the place for cross-cutting concerns the page orchestrator
//! should not know about: event normalization, schema validation, error
//! interception and response hardening.
//!
//! # Execution order
//!
//! A [`Chain`] runs its middleware in three phases:
//!
//! ```text
//! before:   normalize → validate → catch → security → handler
//! after:    handler → security → catch → validate → normalize
//! on_error: security → catch → validate → normalize   (first Some wins)
//! ```
//!
//! Any `before` hook, the handler, or any `after` hook may fail. The error
//! then goes to the `on_error` hooks in reverse order until one turns it into
//! a response, and that response runs through every `after` hook, so
//! intercepted errors still get security headers and output validation. If
//! nothing recovers, or the recovered response fails an `after` hook, the
//! error leaves the chain.

mod catch;
mod normalize;
mod security;
mod validate;

use std::sync::Arc;

use tracing::{Instrument, debug, info_span};

pub use catch::CatchErrors;
pub use normalize::NormalizeEvent;
pub use security::SecurityHeaders;
pub use validate::{Validate, event_schema, response_schema};

use crate::error::Error;
use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::RequestEvent;
use crate::response::Response;

/// A cross-cutting concern hooked around the handler.
///
/// Every hook is optional; the defaults do nothing.
pub trait Middleware: Send + Sync + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Runs before the handler, in registration order.
    fn before(&self, _event: &mut RequestEvent) -> Result<(), Error> {
        Ok(())
    }

    /// Runs on every outgoing response, in reverse registration order.
    fn after(&self, _res: &mut Response) -> Result<(), Error> {
        Ok(())
    }

    /// Turns an error into a response, or passes it on with `None`.
    fn on_error(&self, _err: &Error) -> Option<Response> {
        None
    }
}

/// A handler wrapped in an ordered middleware stack.
///
/// ```rust
/// use render_html::{RequestEvent, Response, Status, Error};
/// use render_html::middleware::{Chain, NormalizeEvent, SecurityHeaders};
///
/// async fn hello(_: RequestEvent) -> Result<Response, Error> {
///     Ok(Response::html(Status::Ok, "<p>hello</p>"))
/// }
///
/// let chain = Chain::new(hello)
///     .with(NormalizeEvent)
///     .with(SecurityHeaders::default());
/// ```
#[derive(Clone)]
pub struct Chain {
    handler: BoxedHandler,
    stack: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    pub fn new(handler: impl Handler) -> Self {
        Self { handler: Arc::new(handler), stack: Vec::new() }
    }

    /// The standard stack: normalize, validate, catch errors, security
    /// headers.
    pub fn standard(handler: impl Handler) -> Self {
        Self::new(handler)
            .with(NormalizeEvent)
            .with(Validate::default())
            .with(CatchErrors)
            .with(SecurityHeaders::default())
    }

    /// Appends `middleware` inside the ones already registered.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.stack.push(Arc::new(middleware));
        self
    }

    /// Runs one event through the stack.
    pub async fn run(&self, event: RequestEvent) -> Result<Response, Error> {
        let span = info_span!("request", path = %event.path());
        async {
            let res = match self.forward(event).await {
                Ok(res) => return Ok(res),
                Err(err) => self.recover(err)?,
            };
            self.after_all(res)
        }
        .instrument(span)
        .await
    }

    async fn forward(&self, mut event: RequestEvent) -> Result<Response, Error> {
        for m in &self.stack {
            m.before(&mut event)?;
        }
        let res = self.handler.call(event).await?;
        self.after_all(res)
    }

    fn after_all(&self, mut res: Response) -> Result<Response, Error> {
        for m in self.stack.iter().rev() {
            m.after(&mut res)?;
        }
        Ok(res)
    }

    fn recover(&self, err: Error) -> Result<Response, Error> {
        for m in self.stack.iter().rev() {
            if let Some(res) = m.on_error(&err) {
                debug!(middleware = m.name(), error = %err, "error intercepted");
                return Ok(res);
            }
        }
        Err(err)
    }
}

impl Handler for Chain {
    fn call(&self, event: RequestEvent) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin(self.run(event))
    }
}
