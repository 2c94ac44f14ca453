//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. The router
//! never composes middleware itself: it stores whatever handler it is given.
//! [`Router::from_table`] composes each [`Route`]'s chain once, at build time,
//! and registers the result.

use std::collections::HashMap;
use std::sync::Arc;

use http::StatusCode;
use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::route::{Route, RouteTable};

/// Introspection record for one registration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteInfo {
    pub name: String,
    pub method: Method,
    pub pattern: String,
    /// Middleware names, outermost first. Empty when none were attached.
    pub middleware: Vec<String>,
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    registry: Vec<RouteInfo>,
}

pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), registry: Vec::new() }
    }

    /// Builds a router from a route table, composing every route's chain.
    ///
    /// Fails if `matchit` rejects a pattern, e.g. two routes with the same
    /// method and conflicting paths.
    pub fn from_table(table: RouteTable) -> Result<Self, Error> {
        let mut router = Self::new();
        for route in table {
            router.add_route(&route)?;
        }
        debug!(routes = router.registry.len(), "router built");
        Ok(router)
    }

    /// Registers an already-composed handler under `method` + `pattern`.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        name: &str,
        handler: BoxedHandler,
    ) -> Result<&mut Self, Error> {
        self.insert(method, pattern, name, Vec::new(), handler)?;
        Ok(self)
    }

    /// Registers a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid or conflicts with an existing route.
    /// Use [`Router::from_table`] to get an error instead.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.insert(method, path, path, Vec::new(), handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("{e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self { self.on(Method::Get, path, handler) }
    pub fn post(self, path: &str, handler: impl Handler) -> Self { self.on(Method::Post, path, handler) }
    pub fn put(self, path: &str, handler: impl Handler) -> Self { self.on(Method::Put, path, handler) }
    pub fn patch(self, path: &str, handler: impl Handler) -> Self { self.on(Method::Patch, path, handler) }
    pub fn delete(self, path: &str, handler: impl Handler) -> Self { self.on(Method::Delete, path, handler) }

    /// Every registration, in registration order.
    pub fn routes(&self) -> &[RouteInfo] {
        &self.registry
    }

    /// The pattern of the first route registered under `name`.
    pub fn pattern_for(&self, name: &str) -> Option<&str> {
        self.registry
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.pattern.as_str())
    }

    /// Routes `req` and runs the matching composed handler.
    ///
    /// Unmatched paths get `404`; paths registered only under other methods
    /// get `405` with an `allow` header.
    pub async fn handle(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Lookup::Found(handler, params) => handler.call(req.with_params(params)).await,
            Lookup::MethodNotAllowed(allowed) => method_not_allowed(&allowed),
            Lookup::NotFound => Response::status(StatusCode::NOT_FOUND),
        }
    }

    fn add_route(&mut self, route: &Route) -> Result<(), Error> {
        let middleware: Vec<String> = route
            .middleware()
            .map(|chain| chain.names().into_iter().map(str::to_owned).collect())
            .unwrap_or_default();
        self.insert(route.method(), route.pattern(), route.name(), middleware, route.composed())
    }

    fn insert(
        &mut self,
        method: Method,
        pattern: &str,
        name: &str,
        middleware: Vec<String>,
        handler: BoxedHandler,
    ) -> Result<(), Error> {
        self.routes
            .entry(method)
            .or_default()
            .insert(pattern, handler)
            .map_err(|source| Error::Route { method, pattern: pattern.to_owned(), source })?;

        debug!(%method, pattern, name, ?middleware, "route registered");
        self.registry.push(RouteInfo {
            name: name.to_owned(),
            method,
            pattern: pattern.to_owned(),
            middleware,
        });
        Ok(())
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        let allowed = self.allowed(path);
        if allowed.is_empty() {
            return Lookup::NotFound;
        }
        Lookup::MethodNotAllowed(allowed)
    }

    /// Methods with a route matching `path`, sorted.
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let mut allowed: Vec<Method> = self.routes
            .iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        allowed.sort();
        allowed
    }
}

/// `405 Method Not Allowed` listing `allowed` in the `allow` header. The list
/// may be empty, in which case the header is present but blank.
pub(crate) fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("allow", &allow)
        .no_body()
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain;
    use crate::middleware;
    use http::HeaderMap;

    async fn hello(req: Request) -> String {
        format!("hello {}", req.param("name").unwrap_or("nobody"))
    }

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path, HeaderMap::new(), "")
    }

    #[tokio::test]
    async fn extracts_path_params() {
        let router = Router::new().get("/hello/{name}", hello);
        let res = router.handle(request(Method::Get, "/hello/ada")).await;
        assert_eq!(res.body().as_ref(), b"hello ada");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let router = Router::new().get("/hello/{name}", hello);
        let res = router.handle(request(Method::Get, "/nope")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_allow() {
        let router = Router::new()
            .post("/aaa", hello)
            .delete("/aaa", hello)
            .get("/bbb", hello);
        let res = router.handle(request(Method::Put, "/aaa")).await;
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some("DELETE, POST"));
    }

    #[test]
    fn allowed_lists_every_method_matching_the_path() {
        let router = Router::new()
            .post("/aaa", hello)
            .delete("/aaa", hello)
            .get("/bbb", hello);
        assert_eq!(router.allowed("/aaa"), [Method::Delete, Method::Post]);
        assert_eq!(router.allowed("/bbb"), [Method::Get]);
        assert!(router.allowed("/zzz").is_empty());
    }

    #[test]
    fn method_not_allowed_with_no_methods_keeps_blank_allow() {
        let res = method_not_allowed(&[]);
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.header("allow"), Some(""));
    }

    #[test]
    fn conflicting_routes_are_an_error() {
        let table = RouteTable::new(vec![
            Route::new("a", Method::Get, "/users/{id}", hello),
            Route::new("b", Method::Get, "/users/{name}", hello),
        ]);
        let err = Router::from_table(table).err().expect("conflict must be rejected");
        assert!(matches!(err, Error::Route { method: Method::Get, .. }));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn fluent_registration_panics_on_conflict() {
        let _ = Router::new().get("/x/{a}", hello).get("/x/{b}", hello);
    }

    #[test]
    fn registry_reports_names_and_chains() {
        let table = RouteTable::new(vec![
            Route::new("Notification", Method::Post, "/aaa", hello)
                .with_chain(chain![middleware::log(), middleware::token(), middleware::record()]),
            Route::new("Notification", Method::Get, "/ddd", hello),
        ]);
        let router = Router::from_table(table).unwrap();

        assert_eq!(router.routes().len(), 2);
        assert_eq!(router.routes()[0].middleware, ["log", "token", "record"]);
        assert!(router.routes()[1].middleware.is_empty());
        assert_eq!(router.pattern_for("Notification"), Some("/aaa"));
        assert_eq!(router.pattern_for("Missing"), None);
    }

    #[tokio::test]
    async fn register_accepts_a_composed_handler() {
        let mut router = Router::new();
        let handler = chain![middleware::archive()].apply(hello.into_boxed_handler());
        router.register(Method::Delete, "/aaa", "Archive", handler).unwrap();

        let res = router.handle(request(Method::Delete, "/aaa")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(router.routes()[0].name, "Archive");
    }
}
