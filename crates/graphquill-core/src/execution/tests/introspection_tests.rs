use crate::execution::ExecuteOptions;
use crate::process_graphql_query;
use crate::schema::build_schema;
use serde_json::json;
use serde_json::Value as JsonValue;

const SDL: &str = r#"
    interface Node { id: ID! }
    type User implements Node {
      id: ID!
      name: String
      friends(first: Int = 5): [User!]
      oldField: Int @deprecated(reason: "dusty")
    }
    type Admin implements Node { id: ID! level: Int }
    union Account = User | Admin
    enum Role { ADMIN USER }
    input Filter { role: Role limit: Int = 10 }
    type Query { me: User find(filter: Filter): [Account] }
"#;

fn run(query: &str) -> JsonValue {
    let schema = build_schema(SDL).unwrap();
    let response = process_graphql_query(&schema, query, &ExecuteOptions::default());
    assert!(
        response.is_ok(),
        "introspection errored: {:?}",
        response.errors
    );
    response.data.unwrap()
}

#[test]
fn schema_meta_field_exposes_roots_and_types() {
    let data = run("{ __schema { queryType { name } mutationType { name } types { name } } }");
    assert_eq!(data["__schema"]["queryType"]["name"], json!("Query"));
    assert_eq!(data["__schema"]["mutationType"], JsonValue::Null);

    let names: Vec<&str> = data["__schema"]["types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    for expected in ["Query", "User", "Int", "String", "__Schema", "__Type"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[test]
fn type_meta_field_resolves_object_details() {
    let data = run(
        "{ __type(name: \"User\") {
             kind
             name
             fields { name type { kind name ofType { kind name } } }
             interfaces { name }
           } }",
    );
    let user = &data["__type"];
    assert_eq!(user["kind"], json!("OBJECT"));
    assert_eq!(user["name"], json!("User"));
    assert_eq!(user["interfaces"], json!([{ "name": "Node" }]));

    let fields = user["fields"].as_array().unwrap();
    // Deprecated fields are hidden by default.
    let names: Vec<&str> = fields
        .iter()
        .map(|field| field["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["id", "name", "friends"]);

    // `id: ID!` renders as NON_NULL wrapping ID.
    let id_type = &fields[0]["type"];
    assert_eq!(id_type["kind"], json!("NON_NULL"));
    assert_eq!(id_type["name"], JsonValue::Null);
    assert_eq!(id_type["ofType"], json!({ "kind": "SCALAR", "name": "ID" }));

    // `friends: [User!]` renders as LIST of NON_NULL.
    let friends_type = &fields[2]["type"];
    assert_eq!(friends_type["kind"], json!("LIST"));
    assert_eq!(friends_type["ofType"]["kind"], json!("NON_NULL"));
}

#[test]
fn include_deprecated_reveals_deprecated_fields() {
    let data = run(
        "{ __type(name: \"User\") {
             fields(includeDeprecated: true) { name isDeprecated deprecationReason }
           } }",
    );
    let fields = data["__type"]["fields"].as_array().unwrap();
    let old = fields
        .iter()
        .find(|field| field["name"] == json!("oldField"))
        .expect("deprecated field listed");
    assert_eq!(old["isDeprecated"], json!(true));
    assert_eq!(old["deprecationReason"], json!("dusty"));
}

#[test]
fn abstract_types_expose_possible_types() {
    let data = run(
        "{ union: __type(name: \"Account\") { kind possibleTypes { name } }
           iface: __type(name: \"Node\") { kind possibleTypes { name } } }",
    );
    assert_eq!(data["union"]["kind"], json!("UNION"));
    assert_eq!(
        data["union"]["possibleTypes"],
        json!([{ "name": "User" }, { "name": "Admin" }])
    );
    assert_eq!(data["iface"]["kind"], json!("INTERFACE"));
    let implementers = data["iface"]["possibleTypes"].as_array().unwrap();
    assert_eq!(implementers.len(), 2);
}

#[test]
fn enums_and_inputs_expose_their_members() {
    let data = run(
        "{ role: __type(name: \"Role\") { enumValues { name } }
           filter: __type(name: \"Filter\") { inputFields { name type { name } defaultValue } } }",
    );
    assert_eq!(
        data["role"]["enumValues"],
        json!([{ "name": "ADMIN" }, { "name": "USER" }])
    );
    let input_fields = data["filter"]["inputFields"].as_array().unwrap();
    assert_eq!(input_fields[0]["name"], json!("role"));
    assert_eq!(input_fields[1]["defaultValue"], json!("10"));
}

#[test]
fn field_arguments_carry_printed_defaults() {
    let data = run(
        "{ __type(name: \"User\") { fields { name args { name defaultValue } } } }",
    );
    let fields = data["__type"]["fields"].as_array().unwrap();
    let friends = fields
        .iter()
        .find(|field| field["name"] == json!("friends"))
        .unwrap();
    assert_eq!(friends["args"][0]["name"], json!("first"));
    assert_eq!(friends["args"][0]["defaultValue"], json!("5"));
}

#[test]
fn directives_are_listed_with_locations() {
    let data = run("{ __schema { directives { name locations } } }");
    let directives = data["__schema"]["directives"].as_array().unwrap();
    let skip = directives
        .iter()
        .find(|directive| directive["name"] == json!("skip"))
        .expect("skip directive listed");
    assert_eq!(
        skip["locations"],
        json!(["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"])
    );
}

#[test]
fn typename_resolves_on_concrete_and_abstract_types() {
    let schema = build_schema(SDL).unwrap();
    let response = process_graphql_query(
        &schema,
        "{ __typename me { __typename } }",
        &ExecuteOptions {
            root: json!({ "me": { "name": "Ada" } }),
            ..ExecuteOptions::default()
        },
    );
    let data = response.data.unwrap();
    assert_eq!(data["__typename"], json!("Query"));
    assert_eq!(data["me"]["__typename"], json!("User"));
}

#[test]
fn unknown_type_lookup_returns_null() {
    let data = run("{ __type(name: \"Ghost\") { name } }");
    assert_eq!(data["__type"], JsonValue::Null);
}
