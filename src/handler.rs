//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! The middleware [`Chain`](crate::middleware::Chain) wraps exactly one
//! handler, but that handler can be the built-in [`PageHandler`] or any
//! `async fn(RequestEvent) -> Result<Response, Error>`. Both are hidden behind
//! `Arc<dyn Handler>` so the chain has one concrete type and can be shared
//! across concurrent invocations.
//!
//! ```text
//! async fn page(event: RequestEvent) -> Result<Response, Error> { … }
//!        ↓ Chain::new(page)
//! Arc::new(page)                         ← BoxedHandler = Arc<dyn Handler>
//!        ↓
//! handler.call(event)  at request time  ← one vtable dispatch
//!        ↓
//! Box::pin(page(event))                  ← BoxFuture
//! ```
//!
//! [`PageHandler`]: crate::PageHandler

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::request::RequestEvent;
use crate::response::Response;

/// A heap-allocated, type-erased future.
///
/// `Pin<Box<…>>` because the runtime polls the future in place; `Send` so a
/// multi-threaded runtime may move it between workers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn Handler>;

/// The innermost service of a chain: one event in, one response out.
///
/// Implemented for [`PageHandler`](crate::PageHandler) and, via the blanket
/// impl below, for every function with the signature
///
/// ```text
/// async fn name(event: RequestEvent) -> Result<Response, Error>
/// ```
///
/// `Err` is reserved for failures nothing below the chain could handle; a
/// missing page is an `Ok` 404.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, event: RequestEvent) -> BoxFuture<'_, Result<Response, Error>>;
}

impl<F, Fut> Handler for F
where
    F: Fn(RequestEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, Error>> + Send + 'static,
{
    fn call(&self, event: RequestEvent) -> BoxFuture<'_, Result<Response, Error>> {
        Box::pin((self)(event))
    }
}
