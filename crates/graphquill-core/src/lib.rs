//! Core engine for `graphquill`: the GraphQL type system, SDL schema
//! building, schema and query validation, and operation execution.
//!
//! The usual entry points are [`build_schema`] /
//! [`SchemaBuilder`](schema::SchemaBuilder) to obtain a
//! [`Schema`](schema::Schema), and [`process_graphql_query`] to run a
//! query through the parse → validate → execute pipeline.

mod api;
pub mod execution;
pub mod loc;
pub mod named_ref;
pub mod schema;
pub mod types;
pub mod validation;

pub use api::process_graphql_query;
pub use api::process_graphql_query_deferred;
pub use execution::execute;
pub use execution::ApolloTracing;
pub use execution::BlockingRuntime;
pub use execution::CoercionError;
pub use execution::Deferred;
pub use execution::ExecuteOptions;
pub use execution::GraphQLError;
pub use execution::Instrumentation;
pub use execution::Location;
pub use execution::Middleware;
pub use execution::MiddlewareStack;
pub use execution::PathSegment;
pub use execution::ResolveContext;
pub use execution::ResolveInfo;
pub use execution::ResolverError;
pub use execution::Response;
pub use execution::Runtime;
pub use execution::ThreadPoolRuntime;
pub use execution::TimingTracer;
pub use schema::build_schema;
pub use schema::build_schema_from_document;
pub use schema::ResolverRegistry;
pub use schema::Schema;
pub use schema::SchemaBuildError;
pub use schema::SchemaBuilder;
pub use schema::SchemaValidationError;
pub use types::FieldResolver;
pub use validation::validate;
pub use validation::TypeInfo;
pub use validation::ValidationError;
pub use validation::ValidationResult;
