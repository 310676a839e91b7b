use crate::schema::build_schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::types::DeprecationState;
use crate::types::GraphQLType;

mod basics {
    use super::*;

    #[test]
    fn builds_minimal_schema() {
        let schema = build_schema("type Query { hello: String }").unwrap();
        let query_type = schema.query_type();
        assert_eq!(query_type.name(), "Query");
        assert_eq!(
            query_type
                .field("hello")
                .unwrap()
                .type_annotation
                .to_string(),
            "String"
        );
        // Spec scalars and built-in directives are always registered.
        for scalar_name in crate::schema::SPEC_SCALAR_NAMES {
            assert!(schema.type_named(scalar_name).is_some(), "missing {scalar_name}");
        }
        assert!(schema.directive("skip").is_some());
        assert!(schema.directive("include").is_some());
        assert!(schema.directive("deprecated").is_some());
        // So is the introspection subgraph.
        assert!(schema.type_named("__Schema").is_some());
        assert!(schema.type_named("__Type").is_some());
    }

    #[test]
    fn missing_query_type_is_an_error() {
        let err = build_schema("type NotQuery { f: Int }").unwrap_err();
        assert_eq!(err.to_string(), "query type Query not found in document");
    }

    #[test]
    fn default_operation_type_names_are_picked_up() {
        let schema = build_schema(
            "type Query { q: Int }
             type Mutation { m: Int }
             type Subscription { s: Int }",
        )
        .unwrap();
        assert_eq!(schema.mutation_type().unwrap().name(), "Mutation");
        assert_eq!(schema.subscription_type().unwrap().name(), "Subscription");
    }

    #[test]
    fn schema_definition_overrides_default_names() {
        let schema = build_schema(
            "schema { query: TheRoot }
             type TheRoot { f: Int }",
        )
        .unwrap();
        assert_eq!(schema.query_type().name(), "TheRoot");
        assert!(schema.mutation_type().is_none());
    }

    #[test]
    fn loading_multiple_sources_merges_definitions() {
        let schema = SchemaBuilder::new()
            .load_from_str(None, "type Query { user: User }")
            .unwrap()
            .load_from_str(None, "type User { id: ID! }")
            .unwrap()
            .build()
            .unwrap();
        assert!(schema.type_named("User").is_some());
    }

    #[test]
    fn recursive_and_mutually_recursive_types_build() {
        let schema = build_schema(
            "type Query { node: Node }
             type Node { parent: Node children: [Node!] partner: Peer }
             type Peer { node: Node }",
        )
        .unwrap();
        let node = schema.type_named("Node").unwrap();
        assert_eq!(
            node.field("parent").unwrap().type_annotation.to_string(),
            "Node"
        );
    }
}

mod duplicates {
    use super::*;

    #[test]
    fn duplicate_type_definitions_fail() {
        let err = build_schema(
            "type Query { f: Int }
             type Dup { a: Int }
             type Dup { b: Int }",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate type Dup");
    }

    #[test]
    fn duplicate_schema_definitions_fail() {
        let err = build_schema(
            "schema { query: Query }
             schema { query: Query }
             type Query { f: Int }",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Must provide only one schema definition");
    }

    #[test]
    fn duplicate_directive_definitions_fail() {
        let err = build_schema(
            "type Query { f: Int }
             directive @tag on FIELD_DEFINITION
             directive @tag on OBJECT",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate directive @tag");
    }

    #[test]
    fn duplicate_operation_roots_fail() {
        let err = build_schema(
            "schema { query: Query query: Query }
             type Query { f: Int }",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Can only define one query in schema");
    }

    #[test]
    fn executable_definitions_are_rejected() {
        let err = build_schema("type Query { f: Int } query Q { f }").unwrap_err();
        assert!(matches!(err, SchemaBuildError::ExecutableDefinition));
    }
}

mod references {
    use super::*;

    #[test]
    fn dangling_field_type_fails() {
        let err = build_schema("type Query { ghost: Phantom }").unwrap_err();
        assert_eq!(err.to_string(), "Type Phantom not found in document");
    }

    #[test]
    fn declared_operation_type_must_exist() {
        let err = build_schema(
            "schema { query: Query mutation: Ghost }
             type Query { f: Int }",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "mutation type Ghost not found in document");
    }
}

mod extensions {
    use super::*;

    #[test]
    fn object_extension_adds_fields_and_interfaces() {
        let schema = build_schema(
            "type Query { f: Int }
             interface Named { name: String }
             extend type Query implements Named { name: String extra: Int }",
        )
        .unwrap();
        let query_type = schema.query_type();
        assert!(query_type.field("extra").is_some());
        assert!(query_type.as_object().unwrap().implements("Named"));
    }

    #[test]
    fn enum_extension_adds_variants() {
        let schema = build_schema(
            "type Query { c: Color }
             enum Color { RED }
             extend enum Color { GREEN }",
        )
        .unwrap();
        let color = schema.type_named("Color").unwrap().as_enum().unwrap();
        assert!(color.variant("GREEN").is_some());
    }

    #[test]
    fn union_and_input_extensions_apply() {
        let schema = build_schema(
            "type Query { m: Media }
             type Image { url: String }
             type Video { url: String }
             union Media = Image
             input Filter { q: String }
             extend union Media = Video
             extend input Filter { limit: Int }",
        )
        .unwrap();
        assert!(schema
            .type_named("Media")
            .unwrap()
            .as_union()
            .unwrap()
            .has_member("Video"));
        assert!(schema
            .type_named("Filter")
            .unwrap()
            .as_input_object()
            .unwrap()
            .field("limit")
            .is_some());
    }

    #[test]
    fn scalar_extensions_are_rejected() {
        let err = build_schema(
            "type Query { f: Date }
             scalar Date
             extend scalar Date @meta",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaBuildError::ScalarExtensionUnsupported { .. }
        ));
    }

    #[test]
    fn extension_kind_must_match_base() {
        let err = build_schema(
            "type Query { c: Color }
             enum Color { RED }
             extend type Color { x: Int }",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot extend enum type \"Color\" with a type extension"
        );
    }

    #[test]
    fn extending_an_undefined_type_fails() {
        let err = build_schema(
            "type Query { f: Int }
             extend type Ghost { x: Int }",
        )
        .unwrap_err();
        assert!(matches!(err, SchemaBuildError::ExtendUndefinedType { .. }));
    }
}

mod deprecation {
    use super::*;

    #[test]
    fn deprecated_directive_becomes_deprecation_state() {
        let schema = build_schema(
            "type Query {
               old: Int @deprecated(reason: \"use new\")
               bare: Int @deprecated
               current: Int
             }",
        )
        .unwrap();
        let query_type = schema.query_type();
        assert_eq!(
            query_type.field("old").unwrap().deprecation,
            DeprecationState::Deprecated(Some("use new".to_string()))
        );
        assert_eq!(
            query_type.field("bare").unwrap().deprecation,
            DeprecationState::Deprecated(None)
        );
        assert!(!query_type.field("current").unwrap().deprecation.is_deprecated());
    }

    #[test]
    fn deprecated_enum_values() {
        let schema = build_schema(
            "type Query { e: E }
             enum E { OK OLD @deprecated(reason: \"gone\") }",
        )
        .unwrap();
        let enum_type = schema.type_named("E").unwrap().as_enum().unwrap();
        assert_eq!(
            enum_type.variant("OLD").unwrap().deprecation.reason(),
            Some("gone")
        );
    }
}

mod resolver_injection {
    use super::*;
    use crate::schema::ResolverRegistry;
    use crate::types::FieldResolver;
    use serde_json::json;

    #[test]
    fn map_registry_attaches_resolvers_by_key() {
        let resolvers = ResolverRegistry::new().register(
            "Query.hello",
            FieldResolver::new(|_ctx| Ok(json!("world"))),
        );
        let schema = SchemaBuilder::new()
            .load_from_str(None, "type Query { hello: String plain: Int }")
            .unwrap()
            .with_resolvers(resolvers)
            .build()
            .unwrap();
        let query_type = schema.query_type();
        assert!(query_type.field("hello").unwrap().resolver.is_some());
        // No match: default resolution applies.
        assert!(query_type.field("plain").unwrap().resolver.is_none());
    }

    #[test]
    fn fn_registry_is_consulted_per_field() {
        let resolvers = ResolverRegistry::from_fn(|type_name, field_name| {
            (type_name == "Query" && field_name == "answer")
                .then(|| FieldResolver::new(|_ctx| Ok(json!(42))))
        });
        let schema = SchemaBuilder::new()
            .load_from_str(None, "type Query { answer: Int other: Int }")
            .unwrap()
            .with_resolvers(resolvers)
            .build()
            .unwrap();
        assert!(schema.query_type().field("answer").unwrap().resolver.is_some());
        assert!(schema.query_type().field("other").unwrap().resolver.is_none());
    }
}

mod known_types {
    use super::*;
    use crate::loc::SchemaDefLocation;
    use crate::types::ScalarType;

    #[test]
    fn known_types_shadow_sdl_definitions() {
        let custom = GraphQLType::Scalar(Box::new(ScalarType {
            name: "DateTime".to_string(),
            description: Some("supplied by the host".to_string()),
            def_location: SchemaDefLocation::BuiltIn,
        }));
        let schema = SchemaBuilder::new()
            .load_from_str(None, "type Query { at: DateTime } scalar DateTime")
            .unwrap()
            .with_known_types(vec![custom])
            .build()
            .unwrap();
        assert_eq!(
            schema.type_named("DateTime").unwrap().description(),
            Some("supplied by the host")
        );
    }
}
