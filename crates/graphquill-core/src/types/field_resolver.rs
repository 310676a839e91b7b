use crate::execution::ResolveContext;
use crate::execution::ResolverError;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// The function signature of a field resolver.
///
/// Resolvers receive a [`ResolveContext`] carrying the parent value, the
/// coerced arguments, the opaque per-execution context value, and the
/// resolve info, and return the resolved JSON value.
pub type ResolverFn =
    dyn Fn(&ResolveContext<'_>) -> Result<JsonValue, ResolverError> + Send + Sync;

/// A field resolver attached to a schema [`Field`](crate::types::Field).
///
/// Wraps the closure so that the type structs carrying resolvers stay
/// `Clone`/`Debug`/`PartialEq`-derivable: equality is pointer identity
/// and the debug form is opaque.
#[derive(Clone)]
pub struct FieldResolver(Arc<ResolverFn>);

impl FieldResolver {
    pub fn new(
        resolver: impl Fn(&ResolveContext<'_>) -> Result<JsonValue, ResolverError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self(Arc::new(resolver))
    }

    pub fn call(&self, ctx: &ResolveContext<'_>) -> Result<JsonValue, ResolverError> {
        (self.0)(ctx)
    }
}

impl fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldResolver(..)")
    }
}

impl PartialEq for FieldResolver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
