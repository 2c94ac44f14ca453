use tracing::info;

use super::{Middleware, Next, announce, from_fn};
use crate::request::Request;
use crate::response::Response;

/// Request logging: method, path and body of every request passing through.
pub fn log() -> impl Middleware {
    from_fn(log_request).named("log")
}

async fn log_request(req: Request, next: Next) -> Response {
    announce("log", &req);
    info!(method = %req.method(), path = req.path(), "request");
    next.call(req).await
}
