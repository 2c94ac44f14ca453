use std::fmt;
use std::sync::Arc;

use super::{BoxedMiddleware, Middleware};
use crate::handler::BoxedHandler;

/// An ordered, immutable list of middleware, outermost first.
///
/// A `Chain` is a value: cloning it shares the same layers, and applying it
/// never reorders them, so one chain can be attached to several routes and
/// still report its declared order through [`Chain::names`].
#[derive(Clone)]
pub struct Chain {
    layers: Arc<[BoxedMiddleware]>,
}

impl Chain {
    pub fn new() -> Self {
        Self { layers: Arc::from(Vec::new()) }
    }

    /// Returns a chain with `middleware` appended as the new innermost layer.
    pub fn with(self, middleware: impl Middleware) -> Self {
        self.with_boxed(Arc::new(middleware))
    }

    pub fn with_boxed(self, middleware: BoxedMiddleware) -> Self {
        let mut layers = self.layers.to_vec();
        layers.push(middleware);
        Self { layers: layers.into() }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Middleware names in declared order.
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|m| m.name()).collect()
    }

    /// Wraps `handler` so that the layers run in declared order.
    ///
    /// Wrapping nests inside-out, so the fold walks the layers last to first:
    /// the last-declared middleware wraps `handler` directly and the first
    /// ends up outermost, giving `m1(m2(..mn(handler)))`. Folding front to
    /// back would run the chain backwards. An empty chain returns `handler`
    /// itself.
    pub fn apply(&self, handler: BoxedHandler) -> BoxedHandler {
        self.layers
            .iter()
            .rev()
            .fold(handler, |next, middleware| middleware.wrap(next))
    }
}

impl Default for Chain {
    fn default() -> Self { Self::new() }
}

impl FromIterator<BoxedMiddleware> for Chain {
    fn from_iter<I: IntoIterator<Item = BoxedMiddleware>>(iter: I) -> Self {
        Self { layers: iter.into_iter().collect() }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Composes `handler` with an optional chain. `None` means no middleware is
/// attached and, like an empty chain, yields `handler` unchanged.
pub fn compose(handler: BoxedHandler, chain: Option<&Chain>) -> BoxedHandler {
    match chain {
        Some(chain) => chain.apply(handler),
        None => handler,
    }
}

/// Builds a [`Chain`] from middleware listed outermost first.
///
/// ```rust
/// use strata::{chain, middleware};
///
/// let chain = chain![middleware::log(), middleware::token(), middleware::record()];
/// assert_eq!(chain.names(), ["log", "token", "record"]);
/// ```
#[macro_export]
macro_rules! chain {
    () => { $crate::middleware::Chain::new() };
    ($($middleware:expr),+ $(,)?) => {
        $crate::middleware::Chain::new()$(.with($middleware))+
    };
}
