use crate::schema::build_schema;
use crate::schema::Schema;
use crate::validation::validate;

fn test_schema() -> Schema {
    build_schema(
        r#"
        interface Being { name: String }
        type Dog implements Being { name: String barkVolume: Int doesKnowCommand(command: Command!): Boolean }
        type Cat implements Being { name: String meowVolume: Int }
        type Human implements Being { name: String pets: [Pet!] }
        union Pet = Dog | Cat
        enum Command { SIT DOWN }
        input FindInput { name: String! limit: Int = 10 }
        type Query {
          being: Being
          dog: Dog
          human: Human
          pet: Pet
          find(input: FindInput): Being
          version: Int
        }
        type Mutation { rename(name: String!): Being }
        type Subscription { beingChanged: Being }
        "#,
    )
    .unwrap()
}

fn errors_of(query: &str) -> Vec<String> {
    let schema = test_schema();
    let document = graphquill_parser::parse_executable(query).unwrap();
    validate(&schema, &document)
        .errors
        .into_iter()
        .map(|error| error.message)
        .collect()
}

fn assert_valid(query: &str) {
    let errors = errors_of(query);
    assert!(errors.is_empty(), "expected no errors, got {errors:?}");
}

fn assert_error(query: &str, expected: &str) {
    let errors = errors_of(query);
    assert!(
        errors.iter().any(|message| message == expected),
        "expected {expected:?} among {errors:?}"
    );
}

#[test]
fn a_well_formed_query_is_valid() {
    assert_valid(
        "query GetDog($cmd: Command!) {
           dog {
             name
             barkVolume
             doesKnowCommand(command: $cmd)
           }
           human { pets { ... on Dog { barkVolume } ... on Cat { meowVolume } } }
         }",
    );
}

#[test]
fn validation_is_stable_under_print_round_trip() {
    let query = "query Q($cmd: Command!) { dog { doesKnowCommand(command: $cmd) } }";
    let schema = test_schema();
    let document = graphquill_parser::parse_executable(query).unwrap();
    let printed = graphquill_parser::print_document(&document);
    let reparsed = graphquill_parser::parse_executable(&printed).unwrap();
    assert_eq!(
        validate(&schema, &document).ok(),
        validate(&schema, &reparsed).ok()
    );
}

mod operations {
    use super::*;

    #[test]
    fn duplicate_operation_names() {
        assert_error(
            "query Q { version } query Q { version }",
            "There can be only one operation named \"Q\"",
        );
    }

    #[test]
    fn anonymous_operation_must_be_alone() {
        assert_error(
            "{ version } query Q { version }",
            "The anonymous operation must be the only defined operation",
        );
    }

    #[test]
    fn subscriptions_select_a_single_field() {
        assert_error(
            "subscription Watch { beingChanged version }",
            "Subscription \"Watch\" must select only one top level field",
        );
    }
}

mod fields_and_leafs {
    use super::*;

    #[test]
    fn unknown_fields_are_reported() {
        assert_error(
            "{ dog { furColor } }",
            "Cannot query field \"furColor\" on type \"Dog\"",
        );
    }

    #[test]
    fn scalar_fields_cannot_have_selections() {
        assert_error(
            "{ version { digits } }",
            "Field \"version\" must not have a selection since type \"Int\" has no subfields",
        );
    }

    #[test]
    fn composite_fields_need_selections() {
        assert_error(
            "{ dog }",
            "Field \"dog\" of type \"Dog\" must have a selection of subfields. Did you mean \
             \"dog { ... }\"?",
        );
    }

    #[test]
    fn typename_is_allowed_everywhere() {
        assert_valid("{ __typename dog { __typename } pet { __typename } }");
    }

    #[test]
    fn introspection_meta_fields_validate() {
        assert_valid("{ __schema { queryType { name } } __type(name: \"Dog\") { name } }");
    }
}

mod fragments {
    use super::*;

    #[test]
    fn fragment_cycles_are_detected() {
        assert_error(
            "{ dog { ...A } }
             fragment A on Dog { ...B }
             fragment B on Dog { ...A }",
            "Cannot spread fragment \"A\" within itself via \"B\"",
        );
    }

    #[test]
    fn direct_self_spread_is_a_cycle() {
        assert_error(
            "{ dog { ...A } }
             fragment A on Dog { ...A }",
            "Cannot spread fragment \"A\" within itself",
        );
    }

    #[test]
    fn unknown_fragments_are_reported() {
        assert_error("{ dog { ...Ghost } }", "Unknown fragment \"Ghost\"");
    }

    #[test]
    fn unused_fragments_are_reported() {
        assert_error(
            "{ version } fragment Unused on Dog { name }",
            "Fragment \"Unused\" is never used",
        );
    }

    #[test]
    fn duplicate_fragment_names() {
        assert_error(
            "{ dog { ...F } } fragment F on Dog { name } fragment F on Dog { name }",
            "There can be only one fragment named \"F\"",
        );
    }

    #[test]
    fn fragments_must_condition_on_composite_types() {
        assert_error(
            "{ dog { ...F } } fragment F on Command { name }",
            "Fragment \"F\" cannot condition on non composite type \"Command\"",
        );
    }

    #[test]
    fn impossible_spreads_are_reported() {
        assert_error(
            "{ dog { ... on Cat { meowVolume } } }",
            "Fragment cannot be spread here as objects of type \"Dog\" can never be of type \
             \"Cat\"",
        );
    }

    #[test]
    fn abstract_spreads_that_may_apply_are_valid() {
        assert_valid("{ being { ... on Dog { barkVolume } } pet { ... on Being { name } } }");
    }

    #[test]
    fn unknown_type_conditions_are_reported() {
        assert_error(
            "{ dog { ...F } } fragment F on Ghost { x }",
            "Unknown type \"Ghost\"",
        );
    }
}

mod variables {
    use super::*;

    #[test]
    fn variables_must_be_input_types() {
        assert_error(
            "query Q($bad: Dog) { version }",
            "Variable \"$bad\" cannot be non-input type \"Dog\"",
        );
    }

    #[test]
    fn duplicate_variable_names() {
        assert_error(
            "query Q($a: Int, $a: Int) { version }",
            "There can be only one variable named \"$a\"",
        );
    }

    #[test]
    fn undefined_variables_are_reported() {
        assert_error(
            "query Q { dog { doesKnowCommand(command: $missing) } }",
            "Variable \"$missing\" is not defined by operation \"Q\"",
        );
    }

    #[test]
    fn undefined_variables_inside_fragments_are_attributed_to_operations() {
        assert_error(
            "query Q { dog { ...NeedsVar } }
             fragment NeedsVar on Dog { doesKnowCommand(command: $ghost) }",
            "Variable \"$ghost\" is not defined by operation \"Q\"",
        );
    }

    #[test]
    fn unused_variables_are_reported() {
        assert_error(
            "query Q($unused: Int) { version }",
            "Variable \"$unused\" is never used in operation \"Q\"",
        );
    }

    #[test]
    fn variables_used_via_fragments_count_as_used() {
        assert_valid(
            "query Q($cmd: Command!) { dog { ...UsesVar } }
             fragment UsesVar on Dog { doesKnowCommand(command: $cmd) }",
        );
    }

    #[test]
    fn nullable_variable_cannot_fill_non_null_position() {
        assert_error(
            "query Q($cmd: Command) { dog { doesKnowCommand(command: $cmd) } }",
            "Variable \"$cmd\" of type \"Command\" used in position expecting type \
             \"Command!\"",
        );
    }

    #[test]
    fn default_relaxes_non_null_position() {
        assert_valid(
            "query Q($cmd: Command = SIT) { dog { doesKnowCommand(command: $cmd) } }",
        );
    }
}

mod directives {
    use super::*;

    #[test]
    fn unknown_directives_are_reported() {
        assert_error("{ version @nope }", "Unknown directive \"@nope\"");
    }

    #[test]
    fn misplaced_directives_are_reported() {
        assert_error(
            "query Q @include(if: true) { version }",
            "Directive \"@include\" may not be used on QUERY",
        );
    }

    #[test]
    fn duplicate_directives_per_location() {
        assert_error(
            "{ version @skip(if: true) @skip(if: false) }",
            "The directive \"@skip\" can only be used once at this location",
        );
    }

    #[test]
    fn skip_and_include_are_valid_on_fields_and_spreads() {
        assert_valid(
            "query Q($f: Boolean!) {
               version @skip(if: $f)
               dog @include(if: $f) { name ... on Dog @include(if: $f) { name } }
             }",
        );
    }
}

mod arguments {
    use super::*;

    #[test]
    fn unknown_argument_on_field() {
        assert_error(
            "{ dog { doesKnowCommand(commandd: SIT) } }",
            "Unknown argument \"commandd\" on field \"doesKnowCommand\" of type \"Dog\"",
        );
    }

    #[test]
    fn unknown_argument_on_directive() {
        assert_error(
            "{ version @skip(unless: true) }",
            "Unknown argument \"unless\" on directive \"@skip\"",
        );
    }

    #[test]
    fn duplicate_argument_names() {
        assert_error(
            "{ dog { doesKnowCommand(command: SIT, command: SIT) } }",
            "There can be only one argument named \"command\"",
        );
    }

    #[test]
    fn required_arguments_must_be_provided() {
        assert_error(
            "{ dog { doesKnowCommand } }",
            "Field \"doesKnowCommand\" argument \"command\" of type \"Command!\" is required \
             but not provided",
        );
    }

    #[test]
    fn required_directive_arguments_must_be_provided() {
        assert_error(
            "{ version @skip }",
            "Directive \"@skip\" argument \"if\" of type \"Boolean!\" is required but not \
             provided",
        );
    }
}

mod values {
    use super::*;

    #[test]
    fn wrong_literal_types_are_reported() {
        assert_error(
            "{ dog { doesKnowCommand(command: 4) } }",
            "Expected type \"Command!\", found 4",
        );
    }

    #[test]
    fn unknown_enum_values_are_reported() {
        assert_error(
            "{ dog { doesKnowCommand(command: ROLL) } }",
            "Expected type \"Command!\", found ROLL",
        );
    }

    #[test]
    fn unknown_input_object_fields_are_reported() {
        assert_error(
            "{ find(input: {name: \"x\", ghost: 1}) { name } }",
            "Field \"ghost\" is not defined by type \"FindInput\"",
        );
    }

    #[test]
    fn missing_required_input_fields_are_reported() {
        assert_error(
            "{ find(input: {limit: 3}) { name } }",
            "Field \"FindInput.name\" of required type \"String!\" was not provided",
        );
    }

    #[test]
    fn duplicate_input_fields_are_reported() {
        assert_error(
            "{ find(input: {name: \"a\", name: \"b\"}) { name } }",
            "There can be only one input field named \"name\"",
        );
    }

    #[test]
    fn null_for_non_null_default_is_reported() {
        assert_error(
            "query Q($cmd: Command! = null) { dog { doesKnowCommand(command: $cmd) } }",
            "Expected type \"Command!\", found null",
        );
    }
}

mod overlapping_fields {
    use super::*;

    #[test]
    fn aliased_different_fields_conflict() {
        assert_error(
            "{ dog { volume: barkVolume volume: name } }",
            "Fields \"volume\" conflict because \"barkVolume\" and \"name\" are different \
             fields. Use different aliases on the fields to fetch both if this was intentional",
        );
    }

    #[test]
    fn differing_arguments_conflict() {
        assert_error(
            "{ dog { doesKnowCommand(command: SIT) doesKnowCommand(command: DOWN) } }",
            "Fields \"doesKnowCommand\" conflict because they have differing arguments. Use \
             different aliases on the fields to fetch both if this was intentional",
        );
    }

    #[test]
    fn identical_fields_merge() {
        assert_valid("{ dog { name name barkVolume } }");
    }

    #[test]
    fn disjoint_object_scopes_do_not_conflict() {
        assert_valid(
            "{ pet { ... on Dog { volume: barkVolume } ... on Cat { volume: meowVolume } } }",
        );
    }

    #[test]
    fn conflicts_inside_merged_subselections_are_found() {
        assert_error(
            "{ human { pets { ... on Dog { n: name } } } human { pets { ... on Dog { n: barkVolume } } } }",
            "Fields \"n\" conflict because \"name\" and \"barkVolume\" are different fields. \
             Use different aliases on the fields to fetch both if this was intentional",
        );
    }
}

mod executable_documents {
    use super::*;

    #[test]
    fn type_system_definitions_are_not_executable() {
        let schema = test_schema();
        let document =
            graphquill_parser::parse_sdl("{ version } type Extra { f: Int }").unwrap();
        let result = validate(&schema, &document);
        assert!(result
            .errors
            .iter()
            .any(|error| error.message == "The \"Extra\" definition is not executable"));
    }
}
