use crate::ast;
use crate::parse_executable;
use crate::parse_sdl;
use crate::parse_type;
use crate::parse_value;

fn single_operation<'a, 'src>(document: &'a ast::Document<'src>) -> &'a ast::OperationDefinition<'src> {
    match &document.definitions[0] {
        ast::Definition::OperationDefinition(op) => op,
        other => panic!("expected an operation, got {other:?}"),
    }
}

mod operations {
    use super::*;

    #[test]
    fn parses_shorthand_query() {
        let doc = parse_executable("{ hello }").unwrap();
        let op = single_operation(&doc);
        assert_eq!(op.operation, ast::OperationKind::Query);
        assert!(op.name.is_none());
        assert_eq!(op.selection_set.selections.len(), 1);
    }

    #[test]
    fn parses_named_operation_with_variables() {
        let doc = parse_executable(
            "query Hero($episode: Episode = JEDI, $withFriends: Boolean!) {
               hero(episode: $episode) {
                 name
                 friends @include(if: $withFriends) { name }
               }
             }",
        )
        .unwrap();
        let op = single_operation(&doc);
        assert_eq!(op.name.as_ref().unwrap().as_str(), "Hero");
        assert_eq!(op.variable_definitions.len(), 2);

        let episode = &op.variable_definitions[0];
        assert_eq!(episode.variable.as_str(), "episode");
        assert!(matches!(
            episode.default_value,
            Some(ast::Value::Enum(ref v)) if v.value == "JEDI"
        ));

        let with_friends = &op.variable_definitions[1];
        assert!(matches!(
            with_friends.var_type,
            ast::TypeAnnotation::NonNull(_)
        ));
    }

    #[test]
    fn parses_mutation_and_subscription_keywords() {
        let doc = parse_executable("mutation M { save } subscription S { watch }").unwrap();
        let kinds: Vec<ast::OperationKind> = doc.operations().map(|op| op.operation).collect();
        assert_eq!(kinds, vec![
            ast::OperationKind::Mutation,
            ast::OperationKind::Subscription,
        ]);
    }

    #[test]
    fn field_response_name_prefers_alias() {
        let doc = parse_executable("{ renamed: original }").unwrap();
        let op = single_operation(&doc);
        let ast::Selection::Field(field) = &op.selection_set.selections[0] else {
            panic!("expected a field");
        };
        assert_eq!(field.response_name(), "renamed");
        assert_eq!(field.name.as_str(), "original");
    }
}

mod fragments {
    use super::*;

    #[test]
    fn parses_fragment_definition() {
        let doc = parse_executable(
            "fragment friendFields on User @onFragment { id name }",
        )
        .unwrap();
        let frag = doc.fragments().next().unwrap();
        assert_eq!(frag.name.as_str(), "friendFields");
        assert_eq!(frag.type_condition.named_type.name.as_str(), "User");
        assert_eq!(frag.directives.len(), 1);
    }

    #[test]
    fn parses_spreads_and_inline_fragments() {
        let doc = parse_executable(
            "{ ...named ... on Droid { primaryFunction } ... @skip(if: true) { x } }",
        )
        .unwrap();
        let op = single_operation(&doc);
        assert!(matches!(
            op.selection_set.selections[0],
            ast::Selection::FragmentSpread(_)
        ));
        match &op.selection_set.selections[1] {
            ast::Selection::InlineFragment(inline) => {
                assert_eq!(
                    inline
                        .type_condition
                        .as_ref()
                        .unwrap()
                        .named_type
                        .name
                        .as_str(),
                    "Droid"
                );
            }
            other => panic!("expected inline fragment, got {other:?}"),
        }
        match &op.selection_set.selections[2] {
            ast::Selection::InlineFragment(inline) => {
                assert!(inline.type_condition.is_none());
                assert_eq!(inline.directives.len(), 1);
            }
            other => panic!("expected inline fragment, got {other:?}"),
        }
    }

    #[test]
    fn rejects_fragment_named_on() {
        let err = parse_executable("fragment on on User { id }").unwrap_err();
        assert!(err.message().contains("cannot be named `on`"));
    }
}

mod values {
    use super::*;

    #[test]
    fn parses_all_value_kinds() {
        let value = parse_value(
            r#"{ int: 42, float: 3.14, str: "hi", yes: true, no: false, nothing: null,
                color: RED, list: [1, 2], nested: { a: $var } }"#,
        )
        .unwrap();
        let ast::Value::Object(object) = value else {
            panic!("expected an object value");
        };
        let kinds: Vec<&str> = object
            .fields
            .iter()
            .map(|field| match &field.value {
                ast::Value::Int(_) => "int",
                ast::Value::Float(_) => "float",
                ast::Value::String(_) => "string",
                ast::Value::Boolean(_) => "boolean",
                ast::Value::Null(_) => "null",
                ast::Value::Enum(_) => "enum",
                ast::Value::List(_) => "list",
                ast::Value::Object(_) => "object",
                ast::Value::Variable(_) => "variable",
            })
            .collect();
        assert_eq!(kinds, vec![
            "int", "float", "string", "boolean", "boolean", "null", "enum", "list", "object",
        ]);
    }

    #[test]
    fn rejects_variables_in_const_position() {
        let err = parse_executable("query Q($a: Int = $b) { f }").unwrap_err();
        assert!(err.message().contains("not allowed in constant values"));
    }

    #[test]
    fn int_value_parses_to_i64() {
        let value = parse_value("-9876").unwrap();
        let ast::Value::Int(int_value) = value else {
            panic!("expected an int");
        };
        assert_eq!(int_value.parse().unwrap(), -9876);
    }
}

mod type_annotations {
    use super::*;

    #[test]
    fn parses_nested_wrappers() {
        let annotation = parse_type("[[Foo!]]!").unwrap();
        assert_eq!(annotation.to_string(), "[[Foo!]]!");
        assert_eq!(annotation.innermost_named().name.as_str(), "Foo");
    }

    #[test]
    fn nullable_unwraps_one_non_null_level() {
        let annotation = parse_type("Foo!").unwrap();
        assert_eq!(annotation.nullable().to_string(), "Foo");
    }

    #[test]
    fn rejects_double_bang() {
        assert!(parse_type("Foo!!").is_err());
    }
}

mod type_system {
    use super::*;

    const KITCHEN_SINK: &str = r#"
        "The root query"
        type Query implements Node & Named @onObject {
          "A field"
          hero(episode: Episode = JEDI): Character
          search(text: String!): [SearchResult!]
        }

        schema {
          query: Query
          mutation: Mutation
        }

        scalar DateTime @specifiedBy(url: "https://example.com")

        interface Node { id: ID! }

        union SearchResult = Human | Droid

        enum Episode {
          "The original"
          NEWHOPE
          EMPIRE @deprecated(reason: "old")
          JEDI
        }

        input ReviewInput {
          stars: Int! = 5
          commentary: String
        }

        extend type Query { extra: Int }
        extend enum Episode { ROGUE }

        directive @onObject(arg: String) on OBJECT | INTERFACE
    "#;

    #[test]
    fn parses_kitchen_sink_sdl() {
        let doc = parse_sdl(KITCHEN_SINK).unwrap();
        assert_eq!(doc.definitions.len(), 10);
    }

    #[test]
    fn descriptions_attach_to_definitions() {
        let doc = parse_sdl(KITCHEN_SINK).unwrap();
        let ast::Definition::TypeDefinition(ast::TypeDefinition::Object(query)) =
            &doc.definitions[0]
        else {
            panic!("expected an object type definition first");
        };
        assert_eq!(
            query.description.as_ref().unwrap().value,
            "The root query"
        );
        assert_eq!(
            query.fields[0].description.as_ref().unwrap().value,
            "A field"
        );
        assert_eq!(query.interfaces.len(), 2);
    }

    #[test]
    fn repeated_schema_definitions_parse() {
        // Duplicate detection is the schema builder's job, not the parser's.
        let doc = parse_sdl("schema { query: Q } schema { query: R } type Q { f: Int }");
        assert!(doc.is_ok());
    }

    #[test]
    fn executable_documents_reject_type_system_definitions() {
        let err = parse_executable("type Query { f: Int }").unwrap_err();
        assert!(err
            .message()
            .contains("not allowed in executable documents"));
    }

    #[test]
    fn parses_all_extension_kinds() {
        let doc = parse_sdl(
            "extend scalar S @foo
             extend type T { f: Int }
             extend interface I { f: Int }
             extend union U = A | B
             extend enum E { X }
             extend input P { f: Int }",
        )
        .unwrap();
        let keywords: Vec<&str> = doc
            .definitions
            .iter()
            .map(|def| match def {
                ast::Definition::TypeExtension(ext) => ext.kind_keyword(),
                other => panic!("expected an extension, got {other:?}"),
            })
            .collect();
        assert_eq!(keywords, vec![
            "scalar",
            "type",
            "interface",
            "union",
            "enum",
            "input",
        ]);
    }

    #[test]
    fn parses_directive_definition_locations() {
        let doc = parse_sdl("directive @traced(level: Int = 0) on FIELD_DEFINITION | FIELD")
            .unwrap();
        let ast::Definition::DirectiveDefinition(def) = &doc.definitions[0] else {
            panic!("expected a directive definition");
        };
        assert_eq!(def.locations, vec![
            ast::DirectiveLocation::FieldDefinition,
            ast::DirectiveLocation::Field,
        ]);
    }
}
