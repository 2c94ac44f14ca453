//! The notification service: its handler and its route table.

use tracing::info;

use crate::chain;
use crate::method::Method;
use crate::middleware::{archive, log, record, token};
use crate::request::Request;
use crate::response::Response;
use crate::route::{Route, RouteTable};

pub const ROUTE_NAME: &str = "Notification";

/// Acknowledges a notification. The work happens in the middleware around it.
pub async fn notification(req: Request) -> Response {
    info!(method = %req.method(), path = req.path(), "notification received");
    Response::status(http::StatusCode::OK)
}

/// The service's routes.
///
/// `/ccc` carries an explicitly empty chain and `/ddd` none at all; both end
/// up serving the bare handler.
pub fn routes() -> RouteTable {
    RouteTable::new(vec![
        Route::new(ROUTE_NAME, Method::Post, "/aaa", notification)
            .with_chain(chain![log(), token(), record()]),
        Route::new(ROUTE_NAME, Method::Delete, "/aaa", notification)
            .with_chain(chain![log(), token(), archive()]),
        Route::new(ROUTE_NAME, Method::Get, "/bbb", notification)
            .with_chain(chain![token()]),
        Route::new(ROUTE_NAME, Method::Get, "/ccc", notification)
            .with_chain(chain![]),
        Route::new(ROUTE_NAME, Method::Get, "/ddd", notification),
    ])
}
