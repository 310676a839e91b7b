//! End-to-end pipeline tests exercising only the public facade API.

use graphquill::build_schema;
use graphquill::process_graphql_query;
use graphquill::ExecuteOptions;
use graphquill::FieldResolver;
use graphquill::ResolverRegistry;
use graphquill::Schema;
use graphquill::SchemaBuilder;
use graphquill::ThreadPoolRuntime;
use serde_json::json;
use std::sync::Arc;

const SDL: &str = r#"
    interface Character { id: ID! name: String! friends: [Character!] }
    type Human implements Character { id: ID! name: String! friends: [Character!] homePlanet: String }
    type Droid implements Character { id: ID! name: String! friends: [Character!] primaryFunction: String }
    enum Episode { NEWHOPE EMPIRE JEDI }
    type Query { hero(episode: Episode): Character droid(id: ID!): Droid }
"#;

fn starwars_schema() -> Schema {
    let resolvers = ResolverRegistry::new()
        .register(
            "Query.hero",
            FieldResolver::new(|ctx| {
                if ctx.argument("episode") == &json!("EMPIRE") {
                    Ok(json!({
                        "__typename": "Human",
                        "id": "1000",
                        "name": "Luke Skywalker",
                        "homePlanet": "Tatooine",
                    }))
                } else {
                    Ok(json!({
                        "__typename": "Droid",
                        "id": "2001",
                        "name": "R2-D2",
                        "primaryFunction": "Astromech",
                    }))
                }
            }),
        )
        .register(
            "Query.droid",
            FieldResolver::new(|ctx| {
                Ok(json!({
                    "__typename": "Droid",
                    "id": ctx.argument("id").clone(),
                    "name": "C-3PO",
                    "primaryFunction": "Protocol",
                }))
            }),
        );
    SchemaBuilder::new()
        .load_from_str(None, SDL)
        .unwrap()
        .with_resolvers(resolvers)
        .build()
        .unwrap()
}

#[test]
fn executes_a_query_with_variables_fragments_and_abstract_types() {
    let schema = starwars_schema();
    let response = process_graphql_query(
        &schema,
        r#"
        query HeroForEpisode($ep: Episode) {
          hero(episode: $ep) {
            __typename
            name
            ...humanDetails
            ... on Droid { primaryFunction }
          }
        }
        fragment humanDetails on Human { homePlanet }
        "#,
        &ExecuteOptions {
            variables: json!({ "ep": "EMPIRE" }).as_object().cloned().unwrap(),
            runtime: Arc::new(ThreadPoolRuntime::new(4)),
            ..ExecuteOptions::default()
        },
    );
    assert!(response.is_ok(), "errors: {:?}", response.errors);
    assert_eq!(
        response.data,
        Some(json!({
            "hero": {
                "__typename": "Human",
                "name": "Luke Skywalker",
                "homePlanet": "Tatooine",
            }
        }))
    );
}

#[test]
fn invalid_queries_do_not_execute() {
    let schema = starwars_schema();
    let response = process_graphql_query(
        &schema,
        "{ hero { name } unknownField }",
        &ExecuteOptions::default(),
    );
    assert!(response.data.is_none());
    assert!(response
        .errors
        .unwrap()
        .iter()
        .any(|error| error.message.contains("unknownField")));
}

#[test]
fn syntax_errors_surface_with_locations() {
    let schema = starwars_schema();
    let response = process_graphql_query(&schema, "{ hero { ", &ExecuteOptions::default());
    assert!(response.data.is_none());
    let errors = response.errors.unwrap();
    assert!(!errors[0].locations.is_empty());
}

#[test]
fn schemas_round_trip_through_their_own_sdl() {
    let schema = build_schema(SDL).unwrap();
    let printed = schema.to_sdl();
    let rebuilt = build_schema(&printed).unwrap();
    assert_eq!(printed, rebuilt.to_sdl());
}

#[test]
fn introspecting_the_schema_names_every_declared_type() {
    let schema = starwars_schema();
    let response = process_graphql_query(
        &schema,
        "{ __schema { types { name } } }",
        &ExecuteOptions::default(),
    );
    let names: Vec<String> = response.data.unwrap()["__schema"]["types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap().to_string())
        .collect();
    for expected in ["Character", "Human", "Droid", "Episode", "Query"] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }
}
