mod introspection;
#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod validate;

pub use introspection::SPEC_SCALAR_NAMES;
pub use schema::MetaFields;
pub use schema::Schema;
pub use schema_builder::build_schema;
pub use schema_builder::build_schema_from_document;
pub use schema_builder::ResolverRegistry;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use validate::validate_schema;
pub use validate::SchemaValidationError;

#[cfg(test)]
mod tests;
