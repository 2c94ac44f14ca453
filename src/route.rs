//! Route declarations.
//!
//! A [`Route`] binds a method and path pattern to a handler plus the
//! middleware chain that decorates it. Routes are collected into a
//! [`RouteTable`], an ordinary immutable value built at startup and handed to
//! [`Router::from_table`](crate::Router::from_table). There is no global
//! registry.
//!
//! ```rust
//! use strata::{Method, Request, Route, RouteTable, chain, middleware};
//!
//! async fn notify(_req: Request) -> &'static str { "ok" }
//!
//! let table = RouteTable::new(vec![
//!     Route::new("Notify", Method::Post, "/notify", notify)
//!         .with_chain(chain![middleware::log(), middleware::record()]),
//!     Route::new("Notify", Method::Get, "/notify", notify),
//! ]);
//! assert_eq!(table.len(), 2);
//! ```

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Chain, compose};

/// One route: `name`, `method`, `pattern`, base handler and middleware.
pub struct Route {
    name: String,
    method: Method,
    pattern: String,
    handler: BoxedHandler,
    middleware: Option<Chain>,
}

impl Route {
    /// A route with no middleware attached.
    pub fn new(name: impl Into<String>, method: Method, pattern: impl Into<String>, handler: impl Handler) -> Self {
        Self {
            name: name.into(),
            method,
            pattern: pattern.into(),
            handler: handler.into_boxed_handler(),
            middleware: None,
        }
    }

    /// Attaches `chain`, replacing any chain set before. An empty chain is
    /// allowed and behaves exactly like no chain.
    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.middleware = Some(chain);
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn method(&self) -> Method { self.method }
    pub fn pattern(&self) -> &str { &self.pattern }
    pub fn middleware(&self) -> Option<&Chain> { self.middleware.as_ref() }

    /// The base handler wrapped in this route's chain, outermost first.
    pub fn composed(&self) -> BoxedHandler {
        compose(self.handler.clone(), self.middleware.as_ref())
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("middleware", &self.middleware)
            .finish_non_exhaustive()
    }
}

/// The static set of routes a [`Router`](crate::Router) is built from.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn len(&self) -> usize { self.routes.len() }
    pub fn is_empty(&self) -> bool { self.routes.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, Route> { self.routes.iter() }
}

impl FromIterator<Route> for RouteTable {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self { routes: iter.into_iter().collect() }
    }
}

impl IntoIterator for RouteTable {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}
