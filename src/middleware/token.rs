use tracing::info;

use super::{Middleware, Next, announce, from_fn};
use crate::request::Request;
use crate::response::Response;

/// Auth-token inspection. Reports whether the request carries credentials and
/// under which scheme; the credential itself is never logged. Requests
/// without a token are passed on, not rejected.
pub fn token() -> impl Middleware {
    from_fn(inspect_token).named("token")
}

async fn inspect_token(req: Request, next: Next) -> Response {
    announce("token", &req);
    let scheme = auth_scheme(&req);
    info!(
        middleware = "token",
        present = scheme.is_some(),
        bearer = scheme.is_some_and(|s| s.eq_ignore_ascii_case("bearer")),
        scheme = scheme.unwrap_or("none"),
        "authorization inspected"
    );
    next.call(req).await
}

/// The scheme part of the `authorization` header (`Bearer`, `Basic`, ...).
fn auth_scheme(req: &Request) -> Option<&str> {
    let value = req.header("authorization")?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.split_once(' ').map_or(value, |(scheme, _)| scheme))
}
