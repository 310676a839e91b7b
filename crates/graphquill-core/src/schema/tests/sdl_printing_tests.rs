use crate::schema::build_schema;

const SDL: &str = r#"
"A point in time"
scalar DateTime

interface Node { id: ID! }

type Query implements Node {
  id: ID!
  search(text: String!, limit: Int = 10, palette: Palette): [Result!]
  color(of: Color = RED): Color
  old: Int @deprecated(reason: "gone")
}

type Image { id: ID! width: Int }

type Page { id: ID! body: String }

union Result = Image | Page

enum Color { RED GREEN BLUE }

input Palette { hue: String = "warm" shades: [Int!] }

directive @weight(value: Float = 1.5) on FIELD_DEFINITION
"#;

#[test]
fn printed_sdl_rebuilds_to_identical_sdl() {
    let schema = build_schema(SDL).unwrap();
    let printed = schema.to_sdl();
    let rebuilt = build_schema(&printed)
        .unwrap_or_else(|err| panic!("printed SDL failed to build: {err}\n---\n{printed}"));
    assert_eq!(printed, rebuilt.to_sdl());
}

#[test]
fn printing_omits_builtins_and_keeps_defaults() {
    let schema = build_schema(SDL).unwrap();
    let printed = schema.to_sdl();
    assert!(!printed.contains("__Schema"));
    assert!(!printed.contains("scalar Int"));
    assert!(!printed.contains("directive @skip"));
    // Enum defaults print bare, string defaults quoted.
    assert!(printed.contains("of: Color = RED"));
    assert!(printed.contains("hue: String = \"warm\""));
    assert!(printed.contains("@deprecated(reason: \"gone\")"));
    assert!(printed.contains("directive @weight(value: Float = 1.5) on FIELD_DEFINITION"));
}

#[test]
fn schema_block_printed_only_for_non_default_roots() {
    let default_roots = build_schema("type Query { f: Int }").unwrap();
    assert!(!default_roots.to_sdl().contains("schema {"));

    let custom_roots = build_schema(
        "schema { query: Root }
         type Root { f: Int }",
    )
    .unwrap();
    assert!(custom_roots.to_sdl().contains("schema {\n  query: Root\n}"));
}
