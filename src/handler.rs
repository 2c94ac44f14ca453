//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* concrete types in one table, and
//! middleware must wrap any of them. Both work through a single trait object,
//! [`BoxedHandler`], which is what a middleware receives as `next` and what it
//! hands back.
//!
//! ```text
//! async fn notify(req: Request) -> Response { … }   ← user writes this
//!        ↓ Route::new(.., notify)
//! notify.into_boxed_handler()                      ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(notify))                      ← BoxedHandler
//!        ↓ chain.apply(handler)
//! log.wrap(token.wrap(record.wrap(handler)))       ← still a BoxedHandler
//!        ↓
//! handler.call(req) at request time                ← one vtable dispatch per layer
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` let tokio move the future across worker threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// The dispatch interface every composed handler exposes.
///
/// Implementations must be reentrant: one value serves every concurrent
/// request routed to it, so per-request state belongs in the future, not in
/// `self`.
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` (or closure returning a future) with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is sealed so that the blanket impl below stays the only one.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use http::{HeaderMap, StatusCode};

    async fn echo(req: Request) -> String {
        req.body_text().into_owned()
    }

    #[tokio::test]
    async fn async_fn_is_a_handler() {
        let handler = echo.into_boxed_handler();
        let res = handler
            .call(Request::new(Method::Post, "/", HeaderMap::new(), "hi"))
            .await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"hi");
    }

    #[tokio::test]
    async fn closure_is_a_handler() {
        let handler = (|_req: Request| async { StatusCode::ACCEPTED }).into_boxed_handler();
        let res = handler
            .call(Request::new(Method::Get, "/", HeaderMap::new(), ""))
            .await;
        assert_eq!(res.status_code(), StatusCode::ACCEPTED);
    }
}
