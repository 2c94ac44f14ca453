//! # strata
//!
//! A minimal HTTP router where every route carries an ordered middleware
//! chain.
//!
//! A middleware is a function from handler to handler. A [`Chain`] lists
//! middleware outermost first, and [`Chain::apply`] nests them so they run in
//! exactly that order: `[log, token, record]` runs `log`, `token`, `record`,
//! then the handler. Chains are composed once, when the [`Router`] is built
//! from a [`RouteTable`]; at request time a composed handler is a plain shared
//! value with no locks and no per-request setup.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use strata::{Method, Request, Response, Route, RouteTable, Router, Server, chain, middleware};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), strata::Error> {
//!     let table = RouteTable::new(vec![
//!         Route::new("Notify", Method::Post, "/notify", notify)
//!             .with_chain(chain![middleware::log(), middleware::token(), middleware::record()]),
//!     ]);
//!
//!     Server::bind(([0, 0, 0, 0], 9999).into())
//!         .serve(Router::from_table(table)?)
//!         .await
//! }
//!
//! async fn notify(req: Request) -> Response {
//!     // Middleware read the body too; it is still all here.
//!     Response::text(format!("{} bytes", req.body().len()))
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod route;
mod router;
mod server;

pub mod app;
pub mod config;
pub mod middleware;
pub mod telemetry;

pub use config::Config;
pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use http::StatusCode;
pub use method::{Method, UnknownMethod};
pub use middleware::{Chain, Middleware, Next};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use route::{Route, RouteTable};
pub use router::{RouteInfo, Router};
pub use server::Server;
