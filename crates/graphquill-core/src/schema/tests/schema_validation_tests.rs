use crate::schema::build_schema;

fn build_error(sdl: &str) -> String {
    build_schema(sdl).unwrap_err().to_string()
}

mod operation_roots {
    use super::*;

    #[test]
    fn non_object_query_type_is_rejected() {
        assert_eq!(
            build_error("schema { query: Color } enum Color { RED }"),
            "Query must be ObjectType but got \"Color\""
        );
    }

    #[test]
    fn non_object_mutation_type_is_rejected() {
        assert_eq!(
            build_error(
                "schema { query: Query mutation: Color }
                 type Query { f: Int }
                 enum Color { RED }"
            ),
            "Mutation must be ObjectType but got \"Color\""
        );
    }

    #[test]
    fn non_object_subscription_type_is_rejected() {
        assert_eq!(
            build_error(
                "schema { query: Query subscription: Color }
                 type Query { f: Int }
                 enum Color { RED }"
            ),
            "Subscription must be ObjectType but got \"Color\""
        );
    }
}

mod shapes {
    use super::*;

    #[test]
    fn object_types_need_fields() {
        assert_eq!(
            build_error("type Query { e: Empty } type Empty"),
            "Type \"Empty\" must define one or more fields"
        );
    }

    #[test]
    fn input_types_need_fields() {
        assert_eq!(
            build_error("type Query { f(p: P): Int } input P"),
            "Type \"P\" must define one or more fields"
        );
    }

    #[test]
    fn unions_need_members() {
        assert_eq!(
            build_error("type Query { u: U } union U"),
            "UnionType \"U\" must define one or more member types"
        );
    }

    #[test]
    fn union_members_must_be_unique() {
        assert_eq!(
            build_error(
                "type Query { u: U }
                 type A { f: Int }
                 union U = A | A"
            ),
            "UnionType \"U\" can only include type \"A\" once"
        );
    }

    #[test]
    fn union_members_must_be_object_types() {
        assert_eq!(
            build_error(
                "type Query { u: BadUnion }
                 scalar SomeScalar
                 union BadUnion = SomeScalar"
            ),
            "UnionType \"BadUnion\" expects object types but got \"SomeScalar\""
        );
    }

    #[test]
    fn enums_need_values() {
        assert_eq!(
            build_error("type Query { e: E } enum E"),
            "EnumType \"E\" must define one or more values"
        );
    }

    #[test]
    fn reserved_names_are_rejected() {
        assert_eq!(
            build_error("type Query { f: Int } type __Mine { f: Int }"),
            "Name \"__Mine\" must not begin with \"__\" which is reserved by GraphQL \
             introspection"
        );
    }

    #[test]
    fn arguments_must_be_input_types() {
        assert_eq!(
            build_error(
                "type Query { f(arg: Obj): Int }
                 type Obj { x: Int }"
            ),
            "Expected input type for argument \"Query.f.arg\" but got \"Obj\""
        );
    }

    #[test]
    fn input_fields_must_be_input_types() {
        assert_eq!(
            build_error(
                "type Query { f(p: P): Int }
                 type Obj { x: Int }
                 input P { bad: Obj }"
            ),
            "Expected input type for input field \"P.bad\" but got \"Obj\""
        );
    }

    #[test]
    fn object_fields_must_be_output_types() {
        assert_eq!(
            build_error(
                "type Query { f: In }
                 input In { x: Int }"
            ),
            "Field \"Query.f\" must be an output type but got \"In\""
        );
    }
}

mod interface_conformance {
    use super::*;

    #[test]
    fn missing_interface_field() {
        assert_eq!(
            build_error(
                "type Query { o: SomeObject }
                 interface SomeInterface { f: String }
                 type SomeObject implements SomeInterface { g: String }"
            ),
            "Interface field \"SomeInterface.f\" is not implemented by type \"SomeObject\""
        );
    }

    #[test]
    fn incorrectly_typed_interface_field() {
        assert_eq!(
            build_error(
                "type Query { o: SomeObject }
                 interface SomeInterface { f: String }
                 type SomeObject implements SomeInterface { f: Int }"
            ),
            "Interface field \"SomeInterface.f\" expects type \"String\" but \"SomeObject.f\" \
             is type \"Int\""
        );
    }

    #[test]
    fn non_null_field_satisfies_nullable_interface_field() {
        assert!(build_schema(
            "type Query { o: O }
             interface I { f: String }
             type O implements I { f: String! }"
        )
        .is_ok());
    }

    #[test]
    fn nullable_field_cannot_satisfy_non_null_interface_field() {
        assert_eq!(
            build_error(
                "type Query { o: O }
                 interface IFace { f: String! }
                 type O implements IFace { f: String }"
            ),
            "Interface field \"IFace.f\" expects type \"String!\" but \"O.f\" is type \
             \"String\""
        );
    }

    #[test]
    fn list_shapes_must_match() {
        assert_eq!(
            build_error(
                "type Query { o: O }
                 interface IFace { f: [String] }
                 type O implements IFace { f: String }"
            ),
            "Interface field \"IFace.f\" expects type \"[String]\" but \"O.f\" is type \
             \"String\""
        );
    }

    #[test]
    fn object_field_may_covariantly_narrow_to_implementer() {
        assert!(build_schema(
            "type Query { o: Obj }
             interface IFace { f: IFace }
             type Obj implements IFace { f: Obj }"
        )
        .is_ok());
    }

    #[test]
    fn object_field_may_covariantly_narrow_to_union_member() {
        assert!(build_schema(
            "type Query { o: Obj }
             type A { x: Int }
             union U = A | Obj
             interface IFace { f: U }
             type Obj implements IFace { f: A }"
        )
        .is_ok());
    }

    #[test]
    fn missing_interface_argument() {
        assert_eq!(
            build_error(
                "type Query { o: Obj }
                 interface IFace { f(arg: String): String }
                 type Obj implements IFace { f: String }"
            ),
            "Interface field argument \"IFace.f.arg\" is not provided by \"Obj.f\""
        );
    }

    #[test]
    fn interface_argument_types_are_invariant() {
        assert_eq!(
            build_error(
                "type Query { o: Obj }
                 interface IFace { f(arg: String): String }
                 type Obj implements IFace { f(arg: Int): String }"
            ),
            "Interface field argument \"IFace.f.arg\" expects type \"String\" but \
             \"Obj.f.arg\" is type \"Int\""
        );
    }

    #[test]
    fn extra_object_arguments_must_be_nullable() {
        assert_eq!(
            build_error(
                "type Query { o: SomeObject }
                 interface IFace { f: String }
                 type SomeObject implements IFace { f(arg: String!): String }"
            ),
            "Object field argument \"SomeObject.f.arg\" is of required type \"String!\" but \
             is not provided by interface field \"IFace.f\""
        );
    }

    #[test]
    fn interfaces_implemented_at_most_once() {
        assert_eq!(
            build_error(
                "type Query { o: O }
                 interface I { f: String }
                 type O implements I & I { f: String }"
            ),
            "Type \"O\" can only implement \"I\" once"
        );
    }

    #[test]
    fn implements_must_name_an_interface() {
        assert_eq!(
            build_error(
                "type Query { o: O }
                 type NotIface { f: String }
                 type O implements NotIface { f: String }"
            ),
            "Type \"O\" must only implement Interface types, it cannot implement \"NotIface\""
        );
    }
}
