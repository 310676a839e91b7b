use crate::parse_sdl;
use crate::print_document;
use crate::print_value;

/// Parse → print → re-parse must produce a structurally identical
/// document. Comparison uses the serialized node form, which excludes
/// spans (printing moves every node).
fn assert_round_trips(source: &str) {
    let first = parse_sdl(source).expect("source parses");
    let printed = print_document(&first);
    let second = parse_sdl(&printed)
        .unwrap_or_else(|err| panic!("printed output failed to parse: {err}\n---\n{printed}"));
    assert_eq!(
        first.to_json(),
        second.to_json(),
        "round trip diverged\n--- printed ---\n{printed}"
    );
}

#[test]
fn round_trips_queries() {
    assert_round_trips("{ hello world }");
    assert_round_trips("query Q($a: Int = 3, $b: [String!]) @dir { f(x: $a) { g } }");
    assert_round_trips("mutation { like(id: 4) @defer { count } }");
    assert_round_trips(
        "query withFragments {
           user(id: 4) {
             friends(first: 10) { ...friendFields }
             ... on User @onInlineFragment { field }
             ... { anonymous }
           }
         }
         fragment friendFields on User { id name }",
    );
}

#[test]
fn round_trips_values() {
    assert_round_trips(
        r#"{ f(obj: {a: [1, 2.5, "three"], b: true, c: null, d: RED, e: {nested: $v}}) }"#,
    );
}

#[test]
fn round_trips_string_escapes() {
    assert_round_trips(r#"{ f(s: "line\nbreak \"quoted\" back\\slash ") }"#);
}

#[test]
fn round_trips_sdl() {
    assert_round_trips(
        r#"
        "Root"
        type Query implements Node & Named @tagged(name: "root") {
          hero(episode: Episode = JEDI): Character!
          list: [[Int!]]
        }

        schema {
          query: Query
          mutation: Mutation
        }

        scalar DateTime

        interface Node { id: ID! }

        union Result = A | B

        enum Episode {
          NEWHOPE
          EMPIRE @deprecated(reason: "old")
        }

        input Point { x: Float = 0.5 y: Float }

        extend type Query @more { extra(flag: Boolean = false): Int }
        extend union Result = C
        extend scalar DateTime @format

        directive @tagged(name: String!) on OBJECT | FIELD_DEFINITION
        "#,
    );
}

#[test]
fn round_trips_block_string_descriptions() {
    assert_round_trips(
        "\"\"\"\nMultiline\n  description with indent\n\"\"\"\ntype Query { f: Int }",
    );
    // Single-line block with leading whitespace keeps its first line on the
    // opening quotes so the trim algorithm cannot eat it.
    assert_round_trips("\"\"\"  padded\"\"\"\ntype Query { f: Int }");
}

#[test]
fn prints_shorthand_for_anonymous_queries() {
    let doc = parse_sdl("{ a b }").unwrap();
    assert_eq!(print_document(&doc), "{\n  a\n  b\n}\n");
}

#[test]
fn prints_named_operations_in_full() {
    let doc = parse_sdl("query Q { a }").unwrap();
    assert_eq!(print_document(&doc), "query Q {\n  a\n}\n");
}

#[test]
fn prints_values_canonically() {
    let doc = parse_sdl(r#"{ f(a: [1, 2], b: {x: "y"}) }"#).unwrap();
    assert_eq!(
        print_document(&doc),
        "{\n  f(a: [1, 2], b: {x: \"y\"})\n}\n"
    );
}

#[test]
fn print_value_handles_all_kinds() {
    let value = crate::parse_value(r#"{a: 1, b: -2.5, c: "s", d: false, e: null, f: E, g: [$v]}"#)
        .unwrap();
    assert_eq!(
        print_value(&value),
        r#"{a: 1, b: -2.5, c: "s", d: false, e: null, f: E, g: [$v]}"#
    );
}
