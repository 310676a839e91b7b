//! Middlewares wrap the field resolution step.
//!
//! Composition is inside-out: the rightmost middleware wraps the resolver
//! itself, the leftmost runs outermost. Two shapes are supported:
//!
//! - [`Middleware`]: a plain around-wrapper that receives the downstream
//!   step and decides whether and how to call it.
//! - [`AroundMiddleware`]: a two-phase form where `before` produces a token and
//!   `after` receives the token and the downstream result. `after` is
//!   guaranteed to run whether the downstream succeeded or failed, which
//!   makes it the natural shape for timing and cleanup concerns.

use crate::execution::ResolveContext;
use crate::execution::ResolverError;
use serde_json::Value as JsonValue;
use std::any::Any;
use std::sync::Arc;

/// The downstream step a middleware wraps: ultimately the field resolver.
pub type NextResolve<'a> =
    &'a dyn Fn(&ResolveContext<'_>) -> Result<JsonValue, ResolverError>;

/// A plain middleware: receives the downstream step and the resolve
/// context.
pub trait Middleware: Send + Sync {
    fn resolve(
        &self,
        next: NextResolve<'_>,
        ctx: &ResolveContext<'_>,
    ) -> Result<JsonValue, ResolverError>;
}

/// The two-phase middleware shape.
///
/// `before` runs ahead of the downstream step and returns an opaque
/// token; `after` receives the token back together with the downstream
/// result (which it can observe but not change). `after` always runs,
/// even when the downstream step failed.
pub trait AroundMiddleware: Send + Sync {
    fn before(&self, ctx: &ResolveContext<'_>) -> Box<dyn Any + Send>;
    fn after(&self, token: Box<dyn Any + Send>, result: &Result<JsonValue, ResolverError>);
}

/// Adapts an [`AroundMiddleware`] into the plain [`Middleware`] shape.
struct AroundAdapter(Arc<dyn AroundMiddleware>);

impl Middleware for AroundAdapter {
    fn resolve(
        &self,
        next: NextResolve<'_>,
        ctx: &ResolveContext<'_>,
    ) -> Result<JsonValue, ResolverError> {
        let token = self.0.before(ctx);
        let result = next(ctx);
        self.0.after(token, &result);
        result
    }
}

/// An ordered list of middlewares applied around every field resolver.
#[derive(Clone, Default)]
pub struct MiddlewareStack {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plain middleware. Later additions sit closer to the
    /// resolver.
    pub fn push(&mut self, middleware: Arc<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    /// Appends a two-phase middleware.
    pub fn push_around(&mut self, middleware: Arc<dyn AroundMiddleware>) {
        self.middlewares.push(Arc::new(AroundAdapter(middleware)));
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Runs `resolve` through the stack.
    pub fn apply(
        &self,
        ctx: &ResolveContext<'_>,
        resolve: &dyn Fn(&ResolveContext<'_>) -> Result<JsonValue, ResolverError>,
    ) -> Result<JsonValue, ResolverError> {
        fn call_at(
            stack: &[Arc<dyn Middleware>],
            index: usize,
            ctx: &ResolveContext<'_>,
            resolve: &dyn Fn(&ResolveContext<'_>) -> Result<JsonValue, ResolverError>,
        ) -> Result<JsonValue, ResolverError> {
            match stack.get(index) {
                Some(middleware) => {
                    let next = move |next_ctx: &ResolveContext<'_>| {
                        call_at(stack, index + 1, next_ctx, resolve)
                    };
                    middleware.resolve(&next, ctx)
                }
                None => resolve(ctx),
            }
        }
        call_at(&self.middlewares, 0, ctx, resolve)
    }
}
