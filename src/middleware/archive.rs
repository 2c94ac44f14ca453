use super::{Middleware, Next, announce, from_fn};
use crate::request::Request;
use crate::response::Response;

/// Archival hook: writes the request URL and body to the log before the
/// request is handled.
pub fn archive() -> impl Middleware {
    from_fn(archive_request).named("archive")
}

async fn archive_request(req: Request, next: Next) -> Response {
    announce("archive", &req);
    next.call(req).await
}
