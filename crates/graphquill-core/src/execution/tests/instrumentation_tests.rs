use super::schema_with_resolvers;
use crate::execution::ApolloTracing;
use crate::execution::ExecuteOptions;
use crate::execution::TimingTracer;
use crate::process_graphql_query;
use crate::schema::ResolverRegistry;
use crate::types::FieldResolver;
use serde_json::json;
use std::sync::Arc;

fn traced_schema() -> crate::schema::Schema {
    schema_with_resolvers(
        "type Query { hero: Hero } type Hero { name: String }",
        ResolverRegistry::new()
            .register(
                "Query.hero",
                FieldResolver::new(|_| Ok(json!({ "name": "R2-D2" }))),
            ),
    )
}

#[test]
fn timing_tracer_records_stage_and_field_timings() {
    let tracer = Arc::new(TimingTracer::new());
    let response = process_graphql_query(
        &traced_schema(),
        "{ hero { name } }",
        &ExecuteOptions {
            instrumentation: Some(tracer.clone()),
            ..ExecuteOptions::default()
        },
    );
    assert!(response.is_ok());

    let state = tracer.state.lock().unwrap();
    assert!(state.start.is_some());
    assert!(state.end.is_some());
    assert!(state.parse_start.is_some());
    assert!(state.validation_start.is_some());
    assert!(state.query_start.is_some());
    // One timing per resolved field, ends filled in.
    assert_eq!(state.fields.len(), 2);
    assert!(state.fields.iter().all(|field| field.end.is_some()));
}

#[test]
fn apollo_tracing_payload_matches_the_wire_format() {
    let tracing = Arc::new(ApolloTracing::new());
    let response = process_graphql_query(
        &traced_schema(),
        "{ hero { name } }",
        &ExecuteOptions {
            instrumentation: Some(tracing),
            ..ExecuteOptions::default()
        },
    );

    let extensions = response.extensions.expect("tracing extension present");
    let payload = &extensions["tracing"];
    assert_eq!(payload["version"], json!(1));

    // RFC-3339 with microsecond precision and a trailing Z.
    for key in ["startTime", "endTime"] {
        let stamp = payload[key].as_str().unwrap();
        assert!(stamp.ends_with('Z'), "{key} = {stamp}");
        let fractional = stamp.split('.').nth(1).unwrap();
        assert_eq!(fractional.len(), "123456Z".len(), "{key} = {stamp}");
    }

    assert!(payload["duration"].as_i64().unwrap() >= 0);

    let resolvers = payload["execution"]["resolvers"].as_array().unwrap();
    assert_eq!(resolvers.len(), 2);
    let hero = &resolvers[0];
    assert_eq!(hero["path"], json!(["hero"]));
    assert_eq!(hero["parentType"], json!("Query"));
    assert_eq!(hero["fieldName"], json!("hero"));
    assert_eq!(hero["returnType"], json!("Hero"));
    assert!(hero["startOffset"].as_i64().unwrap() >= 0);
    assert!(hero["duration"].as_i64().unwrap() >= 0);

    let name = &resolvers[1];
    assert_eq!(name["path"], json!(["hero", "name"]));
    assert_eq!(name["parentType"], json!("Hero"));

    assert!(payload["parsing"]["duration"].as_i64().is_some());
    assert!(payload["validation"]["duration"].as_i64().is_some());
}
