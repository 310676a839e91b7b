//! The introspection subgraph: `__Schema`, `__Type`, `__Field`,
//! `__InputValue`, `__EnumValue`, `__Directive`, `__TypeKind`, and
//! `__DirectiveLocation`, plus the `__schema` / `__type` / `__typename`
//! meta fields. Materialized into every schema at build time.
//!
//! Type values travel through execution as `{"__type_ref": "<SDL type>"}`
//! markers. The `__Type` field resolvers parse the marker back into an
//! annotation and consult the live schema, which keeps recursive schemas
//! finite: references stay shallow until a sub-selection forces them.

use crate::execution::ResolveContext;
use crate::execution::ResolverError;
use crate::loc::SchemaDefLocation;
use crate::schema::MetaFields;
use crate::schema::Schema;
use crate::types::DeprecationState;
use crate::types::DirectiveDef;
use crate::types::EnumType;
use crate::types::EnumVariant;
use crate::types::Field;
use crate::types::FieldResolver;
use crate::types::GraphQLType;
use crate::types::InputValueDef;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use graphquill_parser::ast::DirectiveLocation;
use indexmap::IndexMap;
use serde_json::json;
use serde_json::Value as JsonValue;

/// The names of the five spec scalars every schema carries.
pub const SPEC_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

// =============================================================================
// Type-reference markers
// =============================================================================

fn type_ref(annotation: &TypeAnnotation) -> JsonValue {
    json!({ "__type_ref": annotation.to_string() })
}

fn named_type_ref(name: &str) -> JsonValue {
    json!({ "__type_ref": name })
}

/// Parses the `__type_ref` marker of a `__Type` parent value.
fn parse_ref(parent: &JsonValue) -> Result<TypeAnnotation, ResolverError> {
    let reference = parent
        .get("__type_ref")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| ResolverError::new("Invalid introspection type reference"))?;
    let ast_annotation = graphquill_parser::parse_type(reference)
        .map_err(|_| ResolverError::new("Invalid introspection type reference"))?;
    Ok(TypeAnnotation::from_ast(&ast_annotation))
}

/// Resolves a bare (unwrapped) reference to its schema type; `None` for
/// list and non-null wrappers.
fn bare_named<'schema>(
    schema: &'schema Schema,
    annotation: &TypeAnnotation,
) -> Option<&'schema GraphQLType> {
    match annotation {
        TypeAnnotation::Named(named) if named.nullable => named.type_ref.deref(schema).ok(),
        _ => None,
    }
}

// =============================================================================
// Materialized JSON forms
// =============================================================================

fn field_json(schema: &Schema, field: &Field) -> JsonValue {
    json!({
        "name": field.name,
        "description": field.description,
        "args": field
            .parameters
            .values()
            .map(|param| input_value_json(schema, param))
            .collect::<Vec<_>>(),
        "type": type_ref(&field.type_annotation),
        "isDeprecated": field.deprecation.is_deprecated(),
        "deprecationReason": field.deprecation.reason(),
    })
}

fn input_value_json(schema: &Schema, input_value: &InputValueDef) -> JsonValue {
    json!({
        "name": input_value.name,
        "description": input_value.description,
        "type": type_ref(&input_value.value_type),
        "defaultValue": input_value
            .default_value
            .as_ref()
            .map(|value| schema.print_literal(value, &input_value.value_type)),
    })
}

fn enum_value_json(variant: &EnumVariant) -> JsonValue {
    json!({
        "name": variant.name,
        "description": variant.description,
        "isDeprecated": variant.deprecation.is_deprecated(),
        "deprecationReason": variant.deprecation.reason(),
    })
}

fn directive_json(schema: &Schema, directive: &DirectiveDef) -> JsonValue {
    json!({
        "name": directive.name,
        "description": directive.description,
        "locations": directive
            .locations
            .iter()
            .map(|location| location.keyword())
            .collect::<Vec<_>>(),
        "args": directive
            .arguments
            .values()
            .map(|argument| input_value_json(schema, argument))
            .collect::<Vec<_>>(),
    })
}

fn kind_of(graphql_type: &GraphQLType) -> &'static str {
    match graphql_type {
        GraphQLType::Bool
        | GraphQLType::Float
        | GraphQLType::ID
        | GraphQLType::Int
        | GraphQLType::String
        | GraphQLType::Scalar(_) => "SCALAR",
        GraphQLType::Object(_) => "OBJECT",
        GraphQLType::Interface(_) => "INTERFACE",
        GraphQLType::Union(_) => "UNION",
        GraphQLType::Enum(_) => "ENUM",
        GraphQLType::InputObject(_) => "INPUT_OBJECT",
    }
}

// =============================================================================
// Construction helpers
// =============================================================================

fn meta_field(name: &str, annotation: TypeAnnotation, resolver: Option<FieldResolver>) -> Field {
    Field {
        name: name.to_string(),
        description: None,
        type_annotation: annotation,
        parameters: IndexMap::new(),
        deprecation: DeprecationState::NotDeprecated,
        resolver,
        def_location: SchemaDefLocation::BuiltIn,
    }
}

fn meta_param(name: &str, annotation: TypeAnnotation, default: Option<JsonValue>) -> InputValueDef {
    InputValueDef {
        name: name.to_string(),
        description: None,
        value_type: annotation,
        default_value: default,
        def_location: SchemaDefLocation::BuiltIn,
    }
}

fn with_params(mut field: Field, params: Vec<InputValueDef>) -> Field {
    field.parameters = params
        .into_iter()
        .map(|param| (param.name.clone(), param))
        .collect();
    field
}

fn object(name: &str, fields: Vec<Field>) -> GraphQLType {
    GraphQLType::Object(Box::new(ObjectType {
        name: name.to_string(),
        description: None,
        fields: fields
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect(),
        interfaces: vec![],
        def_location: SchemaDefLocation::BuiltIn,
    }))
}

fn enum_of(name: &str, variants: &[&str]) -> GraphQLType {
    GraphQLType::Enum(Box::new(EnumType {
        name: name.to_string(),
        description: None,
        variants: variants
            .iter()
            .map(|variant| {
                (
                    variant.to_string(),
                    EnumVariant {
                        name: variant.to_string(),
                        description: None,
                        value: JsonValue::String(variant.to_string()),
                        deprecation: DeprecationState::NotDeprecated,
                        def_location: SchemaDefLocation::BuiltIn,
                    },
                )
            })
            .collect(),
        def_location: SchemaDefLocation::BuiltIn,
    }))
}

// =============================================================================
// The introspection types
// =============================================================================

/// Builds the introspection types registered in every schema.
pub(crate) fn introspection_types() -> Vec<GraphQLType> {
    vec![
        schema_type(),
        type_type(),
        field_type(),
        input_value_type(),
        enum_value_type(),
        directive_type(),
        enum_of(
            "__TypeKind",
            &[
                "SCALAR",
                "OBJECT",
                "INTERFACE",
                "UNION",
                "ENUM",
                "INPUT_OBJECT",
                "LIST",
                "NON_NULL",
            ],
        ),
        enum_of(
            "__DirectiveLocation",
            &[
                "QUERY",
                "MUTATION",
                "SUBSCRIPTION",
                "FIELD",
                "FRAGMENT_DEFINITION",
                "FRAGMENT_SPREAD",
                "INLINE_FRAGMENT",
                "SCHEMA",
                "SCALAR",
                "OBJECT",
                "FIELD_DEFINITION",
                "ARGUMENT_DEFINITION",
                "INTERFACE",
                "UNION",
                "ENUM",
                "ENUM_VALUE",
                "INPUT_OBJECT",
                "INPUT_FIELD_DEFINITION",
            ],
        ),
    ]
}

/// `__Schema` carries no resolvers: the `__schema` meta field resolver
/// materializes all of its fields up front.
fn schema_type() -> GraphQLType {
    object(
        "__Schema",
        vec![
            meta_field(
                "types",
                TypeAnnotation::list_of(TypeAnnotation::named("__Type").non_null()).non_null(),
                None,
            ),
            meta_field("queryType", TypeAnnotation::named("__Type").non_null(), None),
            meta_field("mutationType", TypeAnnotation::named("__Type"), None),
            meta_field("subscriptionType", TypeAnnotation::named("__Type"), None),
            meta_field(
                "directives",
                TypeAnnotation::list_of(TypeAnnotation::named("__Directive").non_null())
                    .non_null(),
                None,
            ),
        ],
    )
}

fn type_type() -> GraphQLType {
    let kind = meta_field(
        "kind",
        TypeAnnotation::named("__TypeKind").non_null(),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let annotation = parse_ref(ctx.parent_value)?;
            if !annotation.is_nullable() {
                return Ok(json!("NON_NULL"));
            }
            if matches!(annotation, TypeAnnotation::List(_)) {
                return Ok(json!("LIST"));
            }
            match bare_named(ctx.info.schema, &annotation) {
                Some(graphql_type) => Ok(json!(kind_of(graphql_type))),
                None => Err(ResolverError::new("Unknown type in introspection reference")),
            }
        })),
    );

    let name = meta_field(
        "name",
        TypeAnnotation::named("String"),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let annotation = parse_ref(ctx.parent_value)?;
            Ok(match bare_named(ctx.info.schema, &annotation) {
                Some(graphql_type) => json!(graphql_type.name()),
                None => JsonValue::Null,
            })
        })),
    );

    let description = meta_field(
        "description",
        TypeAnnotation::named("String"),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let annotation = parse_ref(ctx.parent_value)?;
            Ok(match bare_named(ctx.info.schema, &annotation) {
                Some(graphql_type) => json!(graphql_type.description()),
                None => JsonValue::Null,
            })
        })),
    );

    let fields = with_params(
        meta_field(
            "fields",
            TypeAnnotation::list_of(TypeAnnotation::named("__Field").non_null()),
            Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
                let annotation = parse_ref(ctx.parent_value)?;
                let include_deprecated =
                    ctx.argument("includeDeprecated").as_bool().unwrap_or(false);
                let Some(graphql_type) = bare_named(ctx.info.schema, &annotation) else {
                    return Ok(JsonValue::Null);
                };
                match graphql_type.fields() {
                    Some(fields) => Ok(JsonValue::Array(
                        fields
                            .values()
                            .filter(|field| {
                                include_deprecated || !field.deprecation.is_deprecated()
                            })
                            .map(|field| field_json(ctx.info.schema, field))
                            .collect(),
                    )),
                    None => Ok(JsonValue::Null),
                }
            })),
        ),
        vec![meta_param(
            "includeDeprecated",
            TypeAnnotation::named("Boolean"),
            Some(json!(false)),
        )],
    );

    let interfaces = meta_field(
        "interfaces",
        TypeAnnotation::list_of(TypeAnnotation::named("__Type").non_null()),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let annotation = parse_ref(ctx.parent_value)?;
            match bare_named(ctx.info.schema, &annotation) {
                Some(GraphQLType::Object(object_type)) => Ok(JsonValue::Array(
                    object_type
                        .interfaces
                        .iter()
                        .map(|interface| named_type_ref(interface.name()))
                        .collect(),
                )),
                _ => Ok(JsonValue::Null),
            }
        })),
    );

    let possible_types = meta_field(
        "possibleTypes",
        TypeAnnotation::list_of(TypeAnnotation::named("__Type").non_null()),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let annotation = parse_ref(ctx.parent_value)?;
            match bare_named(ctx.info.schema, &annotation) {
                Some(graphql_type) if graphql_type.is_abstract() => Ok(JsonValue::Array(
                    ctx.info
                        .schema
                        .possible_types(graphql_type)
                        .iter()
                        .map(|object_type| named_type_ref(&object_type.name))
                        .collect(),
                )),
                _ => Ok(JsonValue::Null),
            }
        })),
    );

    let enum_values = with_params(
        meta_field(
            "enumValues",
            TypeAnnotation::list_of(TypeAnnotation::named("__EnumValue").non_null()),
            Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
                let annotation = parse_ref(ctx.parent_value)?;
                let include_deprecated =
                    ctx.argument("includeDeprecated").as_bool().unwrap_or(false);
                match bare_named(ctx.info.schema, &annotation) {
                    Some(GraphQLType::Enum(enum_type)) => Ok(JsonValue::Array(
                        enum_type
                            .variants
                            .values()
                            .filter(|variant| {
                                include_deprecated || !variant.deprecation.is_deprecated()
                            })
                            .map(enum_value_json)
                            .collect(),
                    )),
                    _ => Ok(JsonValue::Null),
                }
            })),
        ),
        vec![meta_param(
            "includeDeprecated",
            TypeAnnotation::named("Boolean"),
            Some(json!(false)),
        )],
    );

    let input_fields = meta_field(
        "inputFields",
        TypeAnnotation::list_of(TypeAnnotation::named("__InputValue").non_null()),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let annotation = parse_ref(ctx.parent_value)?;
            match bare_named(ctx.info.schema, &annotation) {
                Some(GraphQLType::InputObject(input_object)) => Ok(JsonValue::Array(
                    input_object
                        .fields
                        .values()
                        .map(|field| input_value_json(ctx.info.schema, field))
                        .collect(),
                )),
                _ => Ok(JsonValue::Null),
            }
        })),
    );

    let of_type = meta_field(
        "ofType",
        TypeAnnotation::named("__Type"),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let annotation = parse_ref(ctx.parent_value)?;
            if !annotation.is_nullable() {
                return Ok(type_ref(&annotation.as_nullable()));
            }
            match &annotation {
                TypeAnnotation::List(list) => Ok(type_ref(&list.item)),
                TypeAnnotation::Named(_) => Ok(JsonValue::Null),
            }
        })),
    );

    object(
        "__Type",
        vec![
            kind,
            name,
            description,
            fields,
            interfaces,
            possible_types,
            enum_values,
            input_fields,
            of_type,
        ],
    )
}

fn field_type() -> GraphQLType {
    object(
        "__Field",
        vec![
            meta_field("name", TypeAnnotation::named("String").non_null(), None),
            meta_field("description", TypeAnnotation::named("String"), None),
            meta_field(
                "args",
                TypeAnnotation::list_of(TypeAnnotation::named("__InputValue").non_null())
                    .non_null(),
                None,
            ),
            meta_field("type", TypeAnnotation::named("__Type").non_null(), None),
            meta_field(
                "isDeprecated",
                TypeAnnotation::named("Boolean").non_null(),
                None,
            ),
            meta_field("deprecationReason", TypeAnnotation::named("String"), None),
        ],
    )
}

fn input_value_type() -> GraphQLType {
    object(
        "__InputValue",
        vec![
            meta_field("name", TypeAnnotation::named("String").non_null(), None),
            meta_field("description", TypeAnnotation::named("String"), None),
            meta_field("type", TypeAnnotation::named("__Type").non_null(), None),
            meta_field("defaultValue", TypeAnnotation::named("String"), None),
        ],
    )
}

fn enum_value_type() -> GraphQLType {
    object(
        "__EnumValue",
        vec![
            meta_field("name", TypeAnnotation::named("String").non_null(), None),
            meta_field("description", TypeAnnotation::named("String"), None),
            meta_field(
                "isDeprecated",
                TypeAnnotation::named("Boolean").non_null(),
                None,
            ),
            meta_field("deprecationReason", TypeAnnotation::named("String"), None),
        ],
    )
}

fn directive_type() -> GraphQLType {
    object(
        "__Directive",
        vec![
            meta_field("name", TypeAnnotation::named("String").non_null(), None),
            meta_field("description", TypeAnnotation::named("String"), None),
            meta_field(
                "locations",
                TypeAnnotation::list_of(
                    TypeAnnotation::named("__DirectiveLocation").non_null(),
                )
                .non_null(),
                None,
            ),
            meta_field(
                "args",
                TypeAnnotation::list_of(TypeAnnotation::named("__InputValue").non_null())
                    .non_null(),
                None,
            ),
        ],
    )
}

// =============================================================================
// Meta fields
// =============================================================================

/// Builds the `__schema`, `__type`, and `__typename` meta fields.
///
/// `__typename` carries no resolver; the executor intercepts it and
/// answers with the concrete runtime type name.
pub(crate) fn meta_fields() -> MetaFields {
    let schema_field = meta_field(
        "__schema",
        TypeAnnotation::named("__Schema").non_null(),
        Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
            let schema = ctx.info.schema;
            Ok(json!({
                "types": schema
                    .types()
                    .values()
                    .map(|graphql_type| named_type_ref(graphql_type.name()))
                    .collect::<Vec<_>>(),
                "queryType": named_type_ref(schema.query_type().name()),
                "mutationType": schema
                    .mutation_type()
                    .map(|graphql_type| named_type_ref(graphql_type.name())),
                "subscriptionType": schema
                    .subscription_type()
                    .map(|graphql_type| named_type_ref(graphql_type.name())),
                "directives": schema
                    .directives()
                    .values()
                    .map(|directive| directive_json(schema, directive))
                    .collect::<Vec<_>>(),
            }))
        })),
    );

    let type_field = with_params(
        meta_field(
            "__type",
            TypeAnnotation::named("__Type"),
            Some(FieldResolver::new(|ctx: &ResolveContext<'_>| {
                let name = ctx
                    .argument("name")
                    .as_str()
                    .ok_or_else(|| ResolverError::new("Argument \"name\" must be a String"))?;
                Ok(match ctx.info.schema.type_named(name) {
                    Some(graphql_type) => named_type_ref(graphql_type.name()),
                    None => JsonValue::Null,
                })
            })),
        ),
        vec![meta_param(
            "name",
            TypeAnnotation::named("String").non_null(),
            None,
        )],
    );

    let typename_field = meta_field(
        "__typename",
        TypeAnnotation::named("String").non_null(),
        None,
    );

    MetaFields {
        schema_field,
        type_field,
        typename_field,
    }
}

/// The built-in directive declarations every schema carries.
pub(crate) fn builtin_directives() -> Vec<DirectiveDef> {
    let if_param = || {
        meta_param(
            "if",
            TypeAnnotation::named("Boolean").non_null(),
            None,
        )
    };

    vec![
        DirectiveDef {
            name: "skip".to_string(),
            description: Some(
                "Directs the executor to skip this field or fragment when the `if` argument \
                 is true."
                    .to_string(),
            ),
            locations: vec![
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            arguments: IndexMap::from([("if".to_string(), if_param())]),
            def_location: SchemaDefLocation::BuiltIn,
        },
        DirectiveDef {
            name: "include".to_string(),
            description: Some(
                "Directs the executor to include this field or fragment only when the `if` \
                 argument is true."
                    .to_string(),
            ),
            locations: vec![
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            arguments: IndexMap::from([("if".to_string(), if_param())]),
            def_location: SchemaDefLocation::BuiltIn,
        },
        DirectiveDef {
            name: "deprecated".to_string(),
            description: Some("Marks an element of a GraphQL schema as no longer supported.".to_string()),
            locations: vec![
                DirectiveLocation::FieldDefinition,
                DirectiveLocation::EnumValue,
            ],
            arguments: IndexMap::from([(
                "reason".to_string(),
                meta_param(
                    "reason",
                    TypeAnnotation::named("String"),
                    Some(json!("No longer supported")),
                ),
            )]),
            def_location: SchemaDefLocation::BuiltIn,
        },
    ]
}
