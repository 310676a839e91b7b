use crate::parse_executable;
use crate::parse_sdl;
use serde_json::json;

#[test]
fn field_serializes_with_kind_tags() {
    let doc = parse_executable("{ renamed: hello @skip(if: true) }").unwrap();
    assert_eq!(
        doc.to_json(),
        json!({
            "__kind__": "Document",
            "definitions": [{
                "__kind__": "OperationDefinition",
                "operation": "query",
                "name": null,
                "variable_definitions": [],
                "directives": [],
                "selection_set": {
                    "__kind__": "SelectionSet",
                    "selections": [{
                        "__kind__": "Field",
                        "alias": { "__kind__": "Name", "value": "renamed" },
                        "name": { "__kind__": "Name", "value": "hello" },
                        "arguments": [],
                        "directives": [{
                            "__kind__": "Directive",
                            "name": { "__kind__": "Name", "value": "skip" },
                            "arguments": [{
                                "__kind__": "Argument",
                                "name": { "__kind__": "Name", "value": "if" },
                                "value": { "__kind__": "BooleanValue", "value": true },
                            }],
                        }],
                        "selection_set": null,
                    }],
                },
            }],
        })
    );
}

#[test]
fn type_wrappers_serialize_structurally() {
    let doc = parse_executable("query Q($v: [Int!]) { f(x: $v) }").unwrap();
    let json = doc.to_json();
    let var_type = &json["definitions"][0]["variable_definitions"][0]["type"];
    assert_eq!(
        *var_type,
        json!({
            "__kind__": "ListType",
            "type": {
                "__kind__": "NonNullType",
                "type": {
                    "__kind__": "NamedType",
                    "name": { "__kind__": "Name", "value": "Int" },
                },
            },
        })
    );
}

#[test]
fn spans_and_source_labels_are_omitted() {
    let with_label = crate::parse(
        "{ f }",
        &crate::ParseOptions {
            allow_type_system: false,
            file_path: Some("a.graphql".into()),
        },
    )
    .unwrap();
    let without_label = parse_executable("  {   f   }").unwrap();
    // Different labels, different offsets, identical serialized form.
    assert_eq!(with_label.to_json(), without_label.to_json());
}

#[test]
fn sdl_nodes_serialize() {
    let doc = parse_sdl("\"doc\" type T implements I { f(a: Int = 1): String! }").unwrap();
    let json = doc.to_json();
    let type_def = &json["definitions"][0];
    assert_eq!(type_def["__kind__"], "ObjectTypeDefinition");
    assert_eq!(type_def["description"]["value"], "doc");
    assert_eq!(type_def["fields"][0]["__kind__"], "FieldDefinition");
    assert_eq!(
        type_def["fields"][0]["arguments"][0]["default_value"]["value"],
        "1"
    );
}
