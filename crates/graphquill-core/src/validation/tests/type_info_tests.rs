use crate::schema::build_schema;
use crate::validation::TypeInfo;
use crate::validation::TypeInfoVisitor;
use graphquill_parser::ast;
use graphquill_parser::walk_document;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::ParallelVisitor;
use graphquill_parser::VisitFlow;
use std::cell::RefCell;

/// Snapshots the type-info state at every field, as
/// `field-name: parent-type . field-type` strings.
struct FieldSnapshots<'v, 'schema> {
    info: &'v RefCell<TypeInfo<'schema>>,
    snapshots: Vec<String>,
}

impl<'src> DocumentVisitor<'src> for FieldSnapshots<'_, '_> {
    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        let info = self.info.borrow();
        let parent = info
            .parent_type()
            .map(|t| t.name().to_string())
            .unwrap_or_else(|| "?".to_string());
        let field_type = info
            .current_type()
            .map(|annotation| annotation.to_string())
            .unwrap_or_else(|| "?".to_string());
        self.snapshots
            .push(format!("{}: {parent}.{field_type}", node.name));
        VisitFlow::Next
    }

    fn enter_value(&mut self, node: &ast::Value<'src>) -> VisitFlow {
        if let ast::Value::Enum(_) = node {
            let info = self.info.borrow();
            let enum_value = info
                .enum_value
                .map(|variant| variant.name.clone())
                .unwrap_or_else(|| "?".to_string());
            self.snapshots.push(format!("enum:{enum_value}"));
        }
        VisitFlow::Next
    }
}

fn snapshots_for(query: &str) -> Vec<String> {
    let schema = build_schema(
        "interface Node { id: ID! }
         type User implements Node { id: ID! name: String friends: [User!] }
         enum Role { ADMIN USER }
         type Query { me: User find(role: Role): [User] }",
    )
    .unwrap();
    let document = graphquill_parser::parse_executable(query).unwrap();
    let info = RefCell::new(TypeInfo::new(&schema));
    let mut type_info_visitor = TypeInfoVisitor { info: &info };
    let mut snapshots = FieldSnapshots {
        info: &info,
        snapshots: vec![],
    };
    {
        let mut parallel = ParallelVisitor::new(vec![&mut type_info_visitor, &mut snapshots]);
        walk_document(&mut parallel, &document);
    }
    snapshots.snapshots
}

#[test]
fn tracks_parent_and_field_types_through_nesting() {
    assert_eq!(
        snapshots_for("{ me { name friends { id } } }"),
        vec![
            "me: Query.User",
            "name: User.String",
            "friends: User.[User!]",
            "id: User.ID!",
        ]
    );
}

#[test]
fn unknown_fields_downgrade_to_none_without_breaking_traversal() {
    assert_eq!(
        snapshots_for("{ me { ghost { deeper } } }"),
        vec!["me: Query.User", "ghost: User.?", "deeper: ?.?"]
    );
}

#[test]
fn fragment_conditions_set_the_parent_type() {
    assert_eq!(
        snapshots_for(
            "{ me { ... on Node { id } } }
             fragment F on User { name }
             query Q { me { ...F } }"
        ),
        vec![
            "me: Query.User",
            "id: Node.ID!",
            "name: User.String",
            "me: Query.User",
        ]
    );
}

#[test]
fn enum_values_resolve_against_argument_types() {
    assert_eq!(
        snapshots_for("{ find(role: ADMIN) { id } }"),
        vec!["find: Query.[User]", "enum:ADMIN", "id: User.ID!"]
    );
}

#[test]
fn meta_fields_resolve_on_the_query_root() {
    assert_eq!(
        snapshots_for("{ __schema { queryType { name } } __typename }"),
        vec![
            "__schema: Query.__Schema!",
            "queryType: __Schema.__Type!",
            "name: __Type.String",
            "__typename: Query.String!",
        ]
    );
}
