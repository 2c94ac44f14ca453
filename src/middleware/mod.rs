//! Middleware layer.
//!
//! A middleware is a transform from handler to handler: it receives the
//! downstream handler (`next`) and returns a new handler that may do work
//! before and/or after calling it. That is the whole abstraction. Any
//! `Fn(BoxedHandler) -> BoxedHandler` closure qualifies, and [`from_fn`]
//! adapts the more convenient `async fn(Request, Next) -> Response` shape.
//!
//! Middleware are attached to routes as a [`Chain`], listed outermost first.
//! The chain `[log, token, record]` runs `log`, then `token`, then `record`,
//! then the route handler; after-logic unwinds in the opposite order.
//!
//! # Stopping the chain
//!
//! A middleware short-circuits by returning a [`Response`](crate::Response) without calling
//! `next`. Nothing downstream runs:
//!
//! ```rust
//! use strata::middleware::{self, Next};
//! use strata::{Request, Response, StatusCode};
//!
//! async fn require_token(req: Request, next: Next) -> Response {
//!     if req.header("authorization").is_none() {
//!         return Response::status(StatusCode::UNAUTHORIZED);
//!     }
//!     next.call(req).await
//! }
//!
//! let guard = middleware::from_fn(require_token).named("require-token");
//! ```
//!
//! Built-in middleware: [`log()`], [`token()`], [`archive()`], [`record()`].
//! None of them short-circuit.

mod archive;
mod chain;
mod log;
mod record;
mod token;

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use tracing::info;

pub use self::archive::archive;
pub use self::chain::{Chain, compose};
pub use self::log::log;
pub use self::record::record;
pub use self::token::token;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;
use crate::response::IntoResponse;

/// The downstream handler a middleware delegates to.
pub type Next = BoxedHandler;

/// A transform that wraps a handler with additional behavior.
pub trait Middleware: Send + Sync + 'static {
    /// Returns a handler that runs this middleware around `next`.
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;

    /// Label used for route introspection and log fields.
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// A shared, type-erased middleware as stored in a [`Chain`].
pub type BoxedMiddleware = Arc<dyn Middleware>;

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self(next)
    }
}

/// Builds a middleware from an async function of the request and the
/// downstream handler.
pub fn from_fn<F, Fut, R>(f: F) -> FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    FromFn { f: Arc::new(f), name: Cow::Borrowed("anonymous") }
}

/// Middleware returned by [`from_fn`].
pub struct FromFn<F> {
    f: Arc<F>,
    name: Cow<'static, str>,
}

impl<F> FromFn<F> {
    /// Sets the name reported by [`Middleware::name`].
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F, Fut, R> Middleware for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(Around { f: Arc::clone(&self.f), next })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One layer of a composed chain: the middleware function plus the handler
/// it was wrapped around.
struct Around<F> {
    f: Arc<F>,
    next: BoxedHandler,
}

impl<F, Fut, R> ErasedHandler for Around<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.f)(req, Arc::clone(&self.next));
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Emits the entry line and the body line shared by the built-in middleware.
fn announce(middleware: &'static str, req: &Request) {
    info!(middleware, method = %req.method(), path = req.path(), "entering middleware");
    info!(middleware, body = %req.body_text(), "request body");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use crate::method::Method;
    use crate::response::Response;
    use http::{HeaderMap, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request() -> Request {
        Request::new(Method::Get, "/", HeaderMap::new(), "")
    }

    #[tokio::test]
    async fn closure_middleware_wraps_next() {
        let teapot = |_next: BoxedHandler| -> BoxedHandler {
            (|_req: Request| async { StatusCode::IM_A_TEAPOT }).into_boxed_handler()
        };
        let handler = teapot.wrap((|_req: Request| async { "ok" }).into_boxed_handler());
        let res = handler.call(request()).await;
        assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);
        assert_eq!(teapot.name(), "anonymous");
    }

    #[tokio::test]
    async fn short_circuit_skips_downstream() {
        let reached = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&reached);
        let base = (move |_req: Request| {
            seen.fetch_add(1, Ordering::SeqCst);
            async { "handled" }
        })
        .into_boxed_handler();

        let guard = from_fn(|req: Request, next: Next| async move {
            if req.header("authorization").is_none() {
                return Response::status(StatusCode::UNAUTHORIZED);
            }
            next.call(req).await
        })
        .named("guard");

        let handler = guard.wrap(base);
        let res = handler.call(request()).await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(reached.load(Ordering::SeqCst), 0);

        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer t".parse().unwrap());
        let res = handler.call(Request::new(Method::Get, "/", headers, "")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(reached.load(Ordering::SeqCst), 1);
        assert_eq!(guard.name(), "guard");
    }

    #[tokio::test]
    async fn middleware_can_replace_the_body() {
        let upper = from_fn(|mut req: Request, next: Next| async move {
            let shouted = req.body_text().to_uppercase();
            req.set_body(shouted);
            next.call(req).await
        });
        let echo = (|req: Request| async move { req.body_text().into_owned() }).into_boxed_handler();

        let res = upper
            .wrap(echo)
            .call(Request::new(Method::Post, "/", HeaderMap::new(), "quiet"))
            .await;
        assert_eq!(res.body().as_ref(), b"QUIET");
    }
}
