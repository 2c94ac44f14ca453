use std::time::Instant;

use tracing::info;

use super::{Middleware, Next, announce, from_fn};
use crate::request::Request;
use crate::response::Response;

/// Recording hook: logs the request on the way in and the outcome (status and
/// latency) on the way out.
pub fn record() -> impl Middleware {
    from_fn(record_request).named("record")
}

async fn record_request(req: Request, next: Next) -> Response {
    announce("record", &req);
    let started = Instant::now();
    let method = req.method();
    let path = req.path().to_owned();

    let res = next.call(req).await;

    info!(
        middleware = "record",
        %method,
        path = %path,
        status = res.status_code().as_u16(),
        elapsed = ?started.elapsed(),
        "request recorded"
    );
    res
}
