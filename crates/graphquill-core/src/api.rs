//! The end-to-end query pipeline: parse → validate → execute, with
//! instrumentation events around each stage.

use crate::execution::execute;
use crate::execution::runtime::submit_deferred;
use crate::execution::Deferred;
use crate::execution::ExecuteOptions;
use crate::execution::GraphQLError;
use crate::execution::Response;
use crate::schema::Schema;
use crate::validation::validate;
use std::sync::Arc;

/// Processes a GraphQL query string against a schema.
///
/// Syntax errors and validation errors produce an error-only response
/// (no `data` key); otherwise the operation executes and resolver errors
/// are collected into the response. Instrumentation extension payloads
/// (e.g. Apollo tracing) are merged into `extensions`.
pub fn process_graphql_query(
    schema: &Schema,
    query: &str,
    options: &ExecuteOptions,
) -> Response {
    let instrumentation = options.instrumentation.as_deref();
    if let Some(instrumentation) = instrumentation {
        instrumentation.on_start();
    }

    if let Some(instrumentation) = instrumentation {
        instrumentation.on_parse_start();
    }
    let parsed = graphquill_parser::parse_executable(query);
    if let Some(instrumentation) = instrumentation {
        instrumentation.on_parse_end();
    }

    let mut response = match parsed {
        Err(syntax_error) => Response::from_errors(vec![GraphQLError::at_span(
            syntax_error.message(),
            syntax_error.span(),
        )]),
        Ok(document) => {
            if let Some(instrumentation) = instrumentation {
                instrumentation.on_validate_start();
            }
            let validation = validate(schema, &document);
            if let Some(instrumentation) = instrumentation {
                instrumentation.on_validate_end();
            }

            if validation.ok() {
                if let Some(instrumentation) = instrumentation {
                    instrumentation.on_query_start();
                }
                let response = execute(schema, &document, options);
                if let Some(instrumentation) = instrumentation {
                    instrumentation.on_query_end();
                }
                response
            } else {
                Response::from_errors(
                    validation
                        .errors
                        .into_iter()
                        .map(|error| error.into_graphql_error())
                        .collect(),
                )
            }
        }
    };

    if let Some(instrumentation) = instrumentation {
        instrumentation.on_end();
        if let Some((name, payload)) = instrumentation.extension_payload() {
            response.add_extension(name, payload);
        }
    }

    response
}

/// Runs the full pipeline through the configured runtime, returning a
/// [`Deferred`] response immediately.
///
/// This is the one place the engine itself schedules work: with a
/// thread-pool runtime the whole request runs off the calling thread,
/// and `wait()` blocks only at the edge of the public API.
pub fn process_graphql_query_deferred(
    schema: Arc<Schema>,
    query: String,
    options: ExecuteOptions,
) -> Deferred<Response> {
    let runtime = Arc::clone(&options.runtime);
    submit_deferred(runtime.as_ref(), move || {
        process_graphql_query(&schema, &query, &options)
    })
}
