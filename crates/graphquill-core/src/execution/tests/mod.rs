mod executor_tests;
mod instrumentation_tests;
mod introspection_tests;
mod runtime_tests;

use crate::schema::ResolverRegistry;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;

/// Builds a schema from SDL with the given resolver registry.
pub(crate) fn schema_with_resolvers(sdl: &str, resolvers: ResolverRegistry) -> Schema {
    SchemaBuilder::new()
        .load_from_str(None, sdl)
        .unwrap()
        .with_resolvers(resolvers)
        .build()
        .unwrap()
}
