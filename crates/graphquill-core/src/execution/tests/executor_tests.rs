use super::schema_with_resolvers;
use crate::execution::ExecuteOptions;
use crate::execution::PathSegment;
use crate::process_graphql_query;
use crate::schema::build_schema;
use crate::schema::ResolverRegistry;
use crate::types::FieldResolver;
use serde_json::json;
use serde_json::Value as JsonValue;

fn variables(value: JsonValue) -> serde_json::Map<String, JsonValue> {
    value.as_object().cloned().unwrap_or_default()
}

mod default_resolution {
    use super::*;

    #[test]
    fn default_resolver_reads_keys_from_the_root_value() {
        let schema = build_schema("type Query { greeting: String missing: Int }").unwrap();
        let response = process_graphql_query(
            &schema,
            "{ greeting missing }",
            &ExecuteOptions {
                root: json!({ "greeting": "hi" }),
                ..ExecuteOptions::default()
            },
        );
        assert!(response.is_ok());
        assert_eq!(
            response.data,
            Some(json!({ "greeting": "hi", "missing": null }))
        );
    }

    #[test]
    fn nested_objects_resolve_recursively() {
        let schema = build_schema(
            "type Query { user: User }
             type User { name: String address: Address }
             type Address { city: String }",
        )
        .unwrap();
        let response = process_graphql_query(
            &schema,
            "{ user { name address { city } } }",
            &ExecuteOptions {
                root: json!({ "user": { "name": "Ada", "address": { "city": "London" } } }),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(
            response.data,
            Some(json!({ "user": { "name": "Ada", "address": { "city": "London" } } }))
        );
    }

    #[test]
    fn executing_twice_returns_equal_responses() {
        let schema = build_schema("type Query { n: Int }").unwrap();
        let options = ExecuteOptions {
            root: json!({ "n": 7 }),
            ..ExecuteOptions::default()
        };
        let first = process_graphql_query(&schema, "{ n }", &options);
        let second = process_graphql_query(&schema, "{ n }", &options);
        assert_eq!(first, second);
    }
}

mod operation_selection {
    use super::*;

    #[test]
    fn unknown_operation_name_yields_no_data() {
        let schema = build_schema("type Query { f: Int }").unwrap();
        let response = process_graphql_query(
            &schema,
            "query A { f } query B { f }",
            &ExecuteOptions {
                operation_name: Some("C".to_string()),
                ..ExecuteOptions::default()
            },
        );
        assert!(response.data.is_none());
        assert_eq!(
            response.errors.unwrap()[0].message,
            "Unknown operation \"C\""
        );
    }

    #[test]
    fn multiple_operations_require_a_name() {
        let schema = build_schema("type Query { f: Int }").unwrap();
        let response =
            process_graphql_query(&schema, "query A { f } query B { f }", &ExecuteOptions::default());
        assert!(response.data.is_none());
    }

    #[test]
    fn subscriptions_do_not_execute() {
        let schema = build_schema(
            "type Query { f: Int } type Subscription { ticks: Int }",
        )
        .unwrap();
        let response = process_graphql_query(
            &schema,
            "subscription { ticks }",
            &ExecuteOptions::default(),
        );
        assert!(response.data.is_none());
        assert_eq!(
            response.errors.unwrap()[0].message,
            "Subscription execution is not supported"
        );
    }
}

mod skip_and_include {
    use super::*;

    fn skip_include_schema() -> crate::schema::Schema {
        schema_with_resolvers(
            "type Query { x: Int }",
            ResolverRegistry::new().register("Query.x", FieldResolver::new(|_| Ok(json!(0)))),
        )
    }

    const QUERY: &str = "query Q($s: Boolean!, $i: Boolean!) {
        x @skip(if: $s)
        y: x @include(if: $i)
    }";

    #[test]
    fn skip_true_include_true_keeps_only_the_included_alias() {
        let response = process_graphql_query(
            &skip_include_schema(),
            QUERY,
            &ExecuteOptions {
                variables: variables(json!({ "s": true, "i": true })),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({ "y": 0 })));
    }

    #[test]
    fn skip_false_include_false_keeps_only_the_plain_field() {
        let response = process_graphql_query(
            &skip_include_schema(),
            QUERY,
            &ExecuteOptions {
                variables: variables(json!({ "s": false, "i": false })),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({ "x": 0 })));
    }

    #[test]
    fn skip_and_include_apply_to_fragments() {
        let schema = skip_include_schema();
        let response = process_graphql_query(
            &schema,
            "query Q($on: Boolean!) { ...F @include(if: $on) } fragment F on Query { x }",
            &ExecuteOptions {
                variables: variables(json!({ "on": false })),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({})));
    }
}

mod arguments {
    use super::*;

    #[test]
    fn literals_defaults_and_variables_coerce_into_resolver_arguments() {
        let schema = schema_with_resolvers(
            "type Query { add(a: Int!, b: Int = 10, c: Int): Int }",
            ResolverRegistry::new().register(
                "Query.add",
                FieldResolver::new(|ctx| {
                    let a = ctx.argument("a").as_i64().unwrap_or(0);
                    let b = ctx.argument("b").as_i64().unwrap_or(0);
                    let c = ctx.argument("c").as_i64().unwrap_or(0);
                    Ok(json!(a + b + c))
                }),
            ),
        );
        let response = process_graphql_query(
            &schema,
            "query Q($c: Int) { add(a: 1, c: $c) }",
            &ExecuteOptions {
                variables: variables(json!({ "c": 100 })),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({ "add": 111 })));
    }

    #[test]
    fn enum_arguments_arrive_as_internal_values() {
        let schema = schema_with_resolvers(
            "type Query { f(color: Color!): String } enum Color { RED GREEN }",
            ResolverRegistry::new().register(
                "Query.f",
                FieldResolver::new(|ctx| Ok(ctx.argument("color").clone())),
            ),
        );
        let response = process_graphql_query(&schema, "{ f(color: GREEN) }", &ExecuteOptions::default());
        assert_eq!(response.data, Some(json!({ "f": "GREEN" })));
    }

    #[test]
    fn input_objects_reject_extra_fields_at_variable_coercion() {
        let schema = build_schema(
            "type Query { f(p: Point): Int } input Point { x: Float y: Float }",
        )
        .unwrap();
        let response = process_graphql_query(
            &schema,
            "query Q($p: Point) { f(p: $p) }",
            &ExecuteOptions {
                variables: variables(json!({ "p": { "x": 1.0, "z": 2.0 } })),
                ..ExecuteOptions::default()
            },
        );
        assert!(response.data.is_none());
        let message = &response.errors.unwrap()[0].message;
        assert!(
            message.contains("Field \"z\" is not defined by type \"Point\""),
            "got {message}"
        );
    }

    #[test]
    fn missing_non_null_variable_fails_before_execution() {
        let schema = build_schema("type Query { f(a: Int!): Int }").unwrap();
        let response = process_graphql_query(
            &schema,
            "query Q($a: Int!) { f(a: $a) }",
            &ExecuteOptions::default(),
        );
        assert!(response.data.is_none());
        assert_eq!(
            response.errors.unwrap()[0].message,
            "Variable \"$a\" of required type \"Int!\" was not provided"
        );
    }

    #[test]
    fn int_variables_enforce_32_bit_range() {
        let schema = build_schema("type Query { f(a: Int): Int }").unwrap();
        let response = process_graphql_query(
            &schema,
            "query Q($a: Int) { f(a: $a) }",
            &ExecuteOptions {
                variables: variables(json!({ "a": 5_000_000_000_i64 })),
                ..ExecuteOptions::default()
            },
        );
        assert!(response.data.is_none());
    }
}

mod errors_and_null_propagation {
    use super::*;

    fn failing_schema() -> crate::schema::Schema {
        schema_with_resolvers(
            "type Query { outer: Outer safe: Int }
             type Outer { inner: Inner! }
             type Inner { boom: Int! calm: Int }",
            ResolverRegistry::new()
                .register("Query.outer", FieldResolver::new(|_| Ok(json!({}))))
                .register("Outer.inner", FieldResolver::new(|_| Ok(json!({}))))
                .register(
                    "Inner.boom",
                    FieldResolver::new(|_| Err(crate::ResolverError::new("exploded"))),
                )
                .register("Inner.calm", FieldResolver::new(|_| Ok(json!(1))))
                .register("Query.safe", FieldResolver::new(|_| Ok(json!(7)))),
        )
    }

    #[test]
    fn resolver_errors_null_the_nearest_nullable_ancestor() {
        let response = process_graphql_query(
            &failing_schema(),
            "{ safe outer { inner { boom calm } } }",
            &ExecuteOptions::default(),
        );
        // `boom` is Int!, `inner` is Inner!: the null climbs to `outer`.
        assert_eq!(
            response.data,
            Some(json!({ "safe": 7, "outer": null }))
        );
        let errors = response.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "exploded");
        assert_eq!(errors[0].path, vec![
            PathSegment::Key("outer".to_string()),
            PathSegment::Key("inner".to_string()),
            PathSegment::Key("boom".to_string()),
        ]);
        assert!(!errors[0].locations.is_empty());
    }

    #[test]
    fn null_in_non_null_position_is_reported() {
        let schema = schema_with_resolvers(
            "type Query { must: Int! }",
            ResolverRegistry::new()
                .register("Query.must", FieldResolver::new(|_| Ok(JsonValue::Null))),
        );
        let response =
            process_graphql_query(&schema, "{ must }", &ExecuteOptions::default());
        assert_eq!(response.data, Some(JsonValue::Null));
        let errors = response.errors.unwrap();
        assert_eq!(
            errors[0].message,
            "Cannot return null for non-nullable field Query.must"
        );
    }

    #[test]
    fn list_items_with_nullable_item_type_absorb_errors() {
        let schema = schema_with_resolvers(
            "type Query { items: [Item] } type Item { n: Int! }",
            ResolverRegistry::new()
                .register(
                    "Query.items",
                    FieldResolver::new(|_| Ok(json!([{ "n": 1 }, { "n": null }, { "n": 3 }]))),
                ),
        );
        let response = process_graphql_query(
            &schema,
            "{ items { n } }",
            &ExecuteOptions::default(),
        );
        assert_eq!(
            response.data,
            Some(json!({ "items": [{ "n": 1 }, null, { "n": 3 }] }))
        );
        let errors = response.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, vec![
            PathSegment::Key("items".to_string()),
            PathSegment::Index(1),
            PathSegment::Key("n".to_string()),
        ]);
    }

    #[test]
    fn non_null_list_items_null_the_whole_list() {
        let schema = schema_with_resolvers(
            "type Query { nums: [Int!] }",
            ResolverRegistry::new()
                .register("Query.nums", FieldResolver::new(|_| Ok(json!([1, null, 3])))),
        );
        let response =
            process_graphql_query(&schema, "{ nums }", &ExecuteOptions::default());
        assert_eq!(response.data, Some(json!({ "nums": null })));
    }

    #[test]
    fn sibling_fields_complete_despite_failures() {
        let response = process_graphql_query(
            &failing_schema(),
            "{ outer { inner { boom } } safe }",
            &ExecuteOptions::default(),
        );
        let data = response.data.unwrap();
        assert_eq!(data["safe"], json!(7));
    }
}

mod abstract_types {
    use super::*;
    use crate::execution::TypeResolverFn;
    use std::sync::Arc;

    const SDL: &str = "
        type Query { pet: Pet }
        type Dog { name: String barks: Boolean }
        type Cat { name: String meows: Boolean }
        union Pet = Dog | Cat
    ";

    #[test]
    fn typename_key_selects_the_concrete_type() {
        let schema = build_schema(SDL).unwrap();
        let response = process_graphql_query(
            &schema,
            "{ pet { __typename ... on Dog { barks } ... on Cat { meows } } }",
            &ExecuteOptions {
                root: json!({ "pet": { "__typename": "Dog", "barks": true } }),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(
            response.data,
            Some(json!({ "pet": { "__typename": "Dog", "barks": true } }))
        );
    }

    #[test]
    fn schema_wide_type_resolver_wins() {
        let schema = build_schema(SDL).unwrap();
        let type_resolver: TypeResolverFn =
            Arc::new(|_value, _schema, _abstract_type| Some("Cat".to_string()));
        let response = process_graphql_query(
            &schema,
            "{ pet { ... on Cat { meows } } }",
            &ExecuteOptions {
                root: json!({ "pet": { "meows": true } }),
                type_resolver: Some(type_resolver),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({ "pet": { "meows": true } })));
    }

    #[test]
    fn unresolvable_abstract_values_are_errors() {
        let schema = build_schema(SDL).unwrap();
        let response = process_graphql_query(
            &schema,
            "{ pet { ... on Dog { barks } } }",
            &ExecuteOptions {
                root: json!({ "pet": { "barks": true } }),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({ "pet": null })));
        assert!(response.errors.unwrap()[0]
            .message
            .contains("must resolve to an object type"));
    }
}

mod leaf_serialization {
    use super::*;

    #[test]
    fn enum_results_serialize_to_wire_names() {
        let schema = schema_with_resolvers(
            "type Query { c: Color } enum Color { RED GREEN }",
            ResolverRegistry::new()
                .register("Query.c", FieldResolver::new(|_| Ok(json!("RED")))),
        );
        let response = process_graphql_query(&schema, "{ c }", &ExecuteOptions::default());
        assert_eq!(response.data, Some(json!({ "c": "RED" })));
    }

    #[test]
    fn invalid_enum_results_are_errors() {
        let schema = schema_with_resolvers(
            "type Query { c: Color } enum Color { RED }",
            ResolverRegistry::new()
                .register("Query.c", FieldResolver::new(|_| Ok(json!("MAUVE")))),
        );
        let response = process_graphql_query(&schema, "{ c }", &ExecuteOptions::default());
        assert_eq!(response.data, Some(json!({ "c": null })));
        assert!(response.errors.is_some());
    }

    #[test]
    fn id_accepts_strings_and_integers() {
        let schema = build_schema("type Query { a: ID b: ID }").unwrap();
        let response = process_graphql_query(
            &schema,
            "{ a b }",
            &ExecuteOptions {
                root: json!({ "a": "abc", "b": 42 }),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({ "a": "abc", "b": "42" })));
    }

    #[test]
    fn out_of_range_ints_are_errors() {
        let schema = build_schema("type Query { n: Int }").unwrap();
        let response = process_graphql_query(
            &schema,
            "{ n }",
            &ExecuteOptions {
                root: json!({ "n": 99_000_000_000_i64 }),
                ..ExecuteOptions::default()
            },
        );
        assert_eq!(response.data, Some(json!({ "n": null })));
        assert!(response.errors.unwrap()[0]
            .message
            .contains("32-bit"));
    }
}
