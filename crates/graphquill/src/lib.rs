//! A GraphQL engine for building GraphQL tools, clients, and servers.
//!
//! `graphquill` parses GraphQL source text (both executable documents and
//! the Schema Definition Language), validates it against a type system,
//! and executes operations against a schema to produce a structured
//! response.
//!
//! # Quick start
//!
//! ```
//! use graphquill::{build_schema, process_graphql_query, ExecuteOptions};
//! use serde_json::json;
//!
//! let schema = build_schema("type Query { hello: String }").unwrap();
//! let response = process_graphql_query(
//!     &schema,
//!     "{ hello }",
//!     &ExecuteOptions {
//!         root: json!({ "hello": "world" }),
//!         ..ExecuteOptions::default()
//!     },
//! );
//! assert_eq!(response.data, Some(json!({ "hello": "world" })));
//! ```

// Parsing & AST
pub use graphquill_parser::ast;
pub use graphquill_parser::block_string_value;
pub use graphquill_parser::parse;
pub use graphquill_parser::parse_executable;
pub use graphquill_parser::parse_sdl;
pub use graphquill_parser::parse_type;
pub use graphquill_parser::parse_value;
pub use graphquill_parser::print_document;
pub use graphquill_parser::print_value;
pub use graphquill_parser::walk_document;
pub use graphquill_parser::ChainedVisitor;
pub use graphquill_parser::DocumentVisitor;
pub use graphquill_parser::ParallelVisitor;
pub use graphquill_parser::ParseOptions;
pub use graphquill_parser::SourcePosition;
pub use graphquill_parser::SourceSpan;
pub use graphquill_parser::SyntaxError;
pub use graphquill_parser::VisitFlow;

// Schema & type system
pub use graphquill_core::build_schema;
pub use graphquill_core::build_schema_from_document;
pub use graphquill_core::loc;
pub use graphquill_core::named_ref;
pub use graphquill_core::schema;
pub use graphquill_core::types;
pub use graphquill_core::FieldResolver;
pub use graphquill_core::ResolverRegistry;
pub use graphquill_core::Schema;
pub use graphquill_core::SchemaBuildError;
pub use graphquill_core::SchemaBuilder;
pub use graphquill_core::SchemaValidationError;

// Validation
pub use graphquill_core::validate;
pub use graphquill_core::validation;
pub use graphquill_core::TypeInfo;
pub use graphquill_core::ValidationError;
pub use graphquill_core::ValidationResult;

// Execution
pub use graphquill_core::execute;
pub use graphquill_core::execution;
pub use graphquill_core::process_graphql_query;
pub use graphquill_core::process_graphql_query_deferred;
pub use graphquill_core::ApolloTracing;
pub use graphquill_core::BlockingRuntime;
pub use graphquill_core::CoercionError;
pub use graphquill_core::Deferred;
pub use graphquill_core::ExecuteOptions;
pub use graphquill_core::GraphQLError;
pub use graphquill_core::Instrumentation;
pub use graphquill_core::Location;
pub use graphquill_core::Middleware;
pub use graphquill_core::MiddlewareStack;
pub use graphquill_core::PathSegment;
pub use graphquill_core::ResolveContext;
pub use graphquill_core::ResolveInfo;
pub use graphquill_core::ResolverError;
pub use graphquill_core::Response;
pub use graphquill_core::Runtime;
pub use graphquill_core::ThreadPoolRuntime;
pub use graphquill_core::TimingTracer;
