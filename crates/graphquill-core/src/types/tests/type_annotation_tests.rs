use crate::schema::build_schema;
use crate::types::TypeAnnotation;

fn annotation(source: &str) -> TypeAnnotation {
    TypeAnnotation::from_ast(&graphquill_parser::parse_type(source).unwrap())
}

#[test]
fn display_round_trips_sdl_syntax() {
    for source in ["Int", "Int!", "[Int]", "[Int!]", "[Int!]!", "[[String]]!"] {
        assert_eq!(annotation(source).to_string(), source);
    }
}

#[test]
fn nullability_helpers() {
    assert!(annotation("Int").is_nullable());
    assert!(!annotation("Int!").is_nullable());
    assert!(!annotation("[Int]!").is_nullable());
    assert_eq!(annotation("Int!").as_nullable().to_string(), "Int");
    assert_eq!(
        TypeAnnotation::named("Int").non_null().to_string(),
        "Int!"
    );
}

#[test]
fn innermost_named_unwraps_wrappers() {
    assert_eq!(
        annotation("[[User!]]!").innermost_named().type_ref.name(),
        "User"
    );
}

mod subtyping {
    use super::*;

    const SDL: &str = "
        interface Node { id: ID! }
        type Image implements Node { id: ID! url: String }
        type Page implements Node { id: ID! title: String }
        union Media = Image | Page
        type Query { node: Node media: Media }
    ";

    #[test]
    fn non_null_is_subtype_of_nullable() {
        let schema = build_schema(SDL).unwrap();
        assert!(annotation("Int!").is_subtype_of(&annotation("Int"), &schema));
        assert!(!annotation("Int").is_subtype_of(&annotation("Int!"), &schema));
    }

    #[test]
    fn object_is_subtype_of_implemented_interface() {
        let schema = build_schema(SDL).unwrap();
        assert!(annotation("Image").is_subtype_of(&annotation("Node"), &schema));
        assert!(!annotation("Node").is_subtype_of(&annotation("Image"), &schema));
    }

    #[test]
    fn union_member_is_subtype_of_union() {
        let schema = build_schema(SDL).unwrap();
        assert!(annotation("Page").is_subtype_of(&annotation("Media"), &schema));
        assert!(!annotation("Media").is_subtype_of(&annotation("Page"), &schema));
    }

    #[test]
    fn lists_are_invariant_in_shape() {
        let schema = build_schema(SDL).unwrap();
        assert!(annotation("[Image]").is_subtype_of(&annotation("[Node]"), &schema));
        assert!(!annotation("[Image]").is_subtype_of(&annotation("Node"), &schema));
        assert!(!annotation("Image").is_subtype_of(&annotation("[Node]"), &schema));
    }

    #[test]
    fn same_type_is_exact() {
        assert!(annotation("[Int!]").is_same_type(&annotation("[Int!]")));
        assert!(!annotation("[Int!]").is_same_type(&annotation("[Int]")));
        assert!(!annotation("Int").is_same_type(&annotation("Float")));
    }
}
