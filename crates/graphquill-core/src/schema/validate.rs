//! Post-build schema validation.
//!
//! Runs after materialization and reports the first violated invariant.
//! Message wording is part of the contract: tests assert the exact
//! strings.

use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use indexmap::IndexMap;
use std::collections::HashSet;

/// A type-system invariant violation.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct SchemaValidationError {
    pub message: String,
}

impl SchemaValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

type Result<T> = std::result::Result<T, SchemaValidationError>;

/// Checks every type-system invariant on a built schema.
pub fn validate_schema(schema: &Schema) -> Result<()> {
    check_operation_roots(schema)?;
    for graphql_type in schema.types().values() {
        // Engine-provided types (spec scalars, introspection) are exempt;
        // the built-in marker is their definition location, not their
        // name, so a user type with a reserved name still gets checked.
        if graphql_type.def_location() == crate::loc::SchemaDefLocation::BuiltIn {
            continue;
        }
        check_type(schema, graphql_type)?;
    }
    for directive in schema.directives().values() {
        check_name(&directive.name, directive.is_builtin())?;
        for argument in directive.arguments.values() {
            check_name(&argument.name, false)?;
        }
    }
    Ok(())
}

// =============================================================================
// Operation roots
// =============================================================================

fn check_operation_roots(schema: &Schema) -> Result<()> {
    let query_type = schema.query_type();
    if query_type.as_object().is_none() {
        return Err(SchemaValidationError::new(format!(
            "Query must be ObjectType but got \"{}\"",
            query_type.name()
        )));
    }
    if let Some(mutation_type) = schema.mutation_type()
        && mutation_type.as_object().is_none()
    {
        return Err(SchemaValidationError::new(format!(
            "Mutation must be ObjectType but got \"{}\"",
            mutation_type.name()
        )));
    }
    if let Some(subscription_type) = schema.subscription_type()
        && subscription_type.as_object().is_none()
    {
        return Err(SchemaValidationError::new(format!(
            "Subscription must be ObjectType but got \"{}\"",
            subscription_type.name()
        )));
    }
    Ok(())
}

// =============================================================================
// Names
// =============================================================================

/// Spec-conformant names: `^[_A-Za-z][_A-Za-z0-9]*$`, with the `__`
/// prefix reserved for introspection.
fn check_name(name: &str, allow_reserved: bool) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic());
    let valid_rest = chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
    if !valid_start || !valid_rest {
        return Err(SchemaValidationError::new(format!("Invalid name \"{name}\"")));
    }
    if !allow_reserved && name.starts_with("__") {
        return Err(SchemaValidationError::new(format!(
            "Name \"{name}\" must not begin with \"__\" which is reserved by GraphQL \
             introspection"
        )));
    }
    Ok(())
}

// =============================================================================
// Per-type checks
// =============================================================================

fn check_type(schema: &Schema, graphql_type: &GraphQLType) -> Result<()> {
    check_name(graphql_type.name(), false)?;

    match graphql_type {
        GraphQLType::Object(object_type) => {
            check_fields(schema, graphql_type.name(), &object_type.fields)?;
            check_object_interfaces(schema, object_type)?;
        }
        GraphQLType::Interface(interface_type) => {
            check_fields(schema, graphql_type.name(), &interface_type.fields)?;
        }
        GraphQLType::Union(union_type) => {
            if union_type.members.is_empty() {
                return Err(SchemaValidationError::new(format!(
                    "UnionType \"{}\" must define one or more member types",
                    union_type.name
                )));
            }
            let mut seen = HashSet::new();
            for member in &union_type.members {
                if !seen.insert(member.name()) {
                    return Err(SchemaValidationError::new(format!(
                        "UnionType \"{}\" can only include type \"{}\" once",
                        union_type.name,
                        member.name()
                    )));
                }
                let member_type = member.deref(schema).map_err(|_| {
                    SchemaValidationError::new(format!(
                        "Type \"{}\" not found in schema",
                        member.name()
                    ))
                })?;
                if member_type.as_object().is_none() {
                    return Err(SchemaValidationError::new(format!(
                        "UnionType \"{}\" expects object types but got \"{}\"",
                        union_type.name,
                        member.name()
                    )));
                }
            }
        }
        GraphQLType::Enum(enum_type) => {
            if enum_type.variants.is_empty() {
                return Err(SchemaValidationError::new(format!(
                    "EnumType \"{}\" must define one or more values",
                    enum_type.name
                )));
            }
            for variant in enum_type.variants.values() {
                check_name(&variant.name, false)?;
            }
        }
        GraphQLType::InputObject(input_object) => {
            if input_object.fields.is_empty() {
                return Err(SchemaValidationError::new(format!(
                    "Type \"{}\" must define one or more fields",
                    input_object.name
                )));
            }
            for field in input_object.fields.values() {
                check_name(&field.name, false)?;
                check_input_position(
                    schema,
                    &field.value_type,
                    &format!("input field \"{}.{}\"", input_object.name, field.name),
                )?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn check_fields(
    schema: &Schema,
    type_name: &str,
    fields: &IndexMap<String, Field>,
) -> Result<()> {
    if fields.is_empty() {
        return Err(SchemaValidationError::new(format!(
            "Type \"{type_name}\" must define one or more fields"
        )));
    }
    for field in fields.values() {
        check_name(&field.name, false)?;
        let field_type = field.type_annotation.innermost_type(schema).ok_or_else(|| {
            SchemaValidationError::new(format!(
                "Type \"{}\" not found in schema",
                field.type_annotation.innermost_named().type_ref.name()
            ))
        })?;
        if !field_type.is_output_type() {
            return Err(SchemaValidationError::new(format!(
                "Field \"{type_name}.{}\" must be an output type but got \"{}\"",
                field.name,
                field_type.name()
            )));
        }
        for param in field.parameters.values() {
            check_name(&param.name, false)?;
            check_input_position(
                schema,
                &param.value_type,
                &format!("argument \"{type_name}.{}.{}\"", field.name, param.name),
            )?;
        }
    }
    Ok(())
}

fn check_input_position(
    schema: &Schema,
    annotation: &crate::types::TypeAnnotation,
    position: &str,
) -> Result<()> {
    let graphql_type = annotation.innermost_type(schema).ok_or_else(|| {
        SchemaValidationError::new(format!(
            "Type \"{}\" not found in schema",
            annotation.innermost_named().type_ref.name()
        ))
    })?;
    if !graphql_type.is_input_type() {
        return Err(SchemaValidationError::new(format!(
            "Expected input type for {position} but got \"{}\"",
            graphql_type.name()
        )));
    }
    Ok(())
}

// =============================================================================
// Interface conformance
// =============================================================================

fn check_object_interfaces(schema: &Schema, object_type: &ObjectType) -> Result<()> {
    let mut seen = HashSet::new();
    for interface_ref in &object_type.interfaces {
        if !seen.insert(interface_ref.name()) {
            return Err(SchemaValidationError::new(format!(
                "Type \"{}\" can only implement \"{}\" once",
                object_type.name,
                interface_ref.name()
            )));
        }
        let interface_type = interface_ref.deref(schema).map_err(|_| {
            SchemaValidationError::new(format!(
                "Type \"{}\" not found in schema",
                interface_ref.name()
            ))
        })?;
        let Some(interface_type) = interface_type.as_interface() else {
            return Err(SchemaValidationError::new(format!(
                "Type \"{}\" must only implement Interface types, it cannot implement \"{}\"",
                object_type.name,
                interface_ref.name()
            )));
        };
        check_interface_conformance(schema, object_type, interface_type)?;
    }
    Ok(())
}

/// One object/interface pair: every interface field must be declared with
/// a covariant-compatible type and invariant-compatible arguments.
fn check_interface_conformance(
    schema: &Schema,
    object_type: &ObjectType,
    interface_type: &InterfaceType,
) -> Result<()> {
    for interface_field in interface_type.fields.values() {
        let Some(object_field) = object_type.fields.get(&interface_field.name) else {
            return Err(SchemaValidationError::new(format!(
                "Interface field \"{}.{}\" is not implemented by type \"{}\"",
                interface_type.name, interface_field.name, object_type.name
            )));
        };

        // The declared type must be the interface field's type or a
        // covariant subtype of it.
        if !object_field
            .type_annotation
            .is_subtype_of(&interface_field.type_annotation, schema)
        {
            return Err(SchemaValidationError::new(format!(
                "Interface field \"{}.{}\" expects type \"{}\" but \"{}.{}\" is type \"{}\"",
                interface_type.name,
                interface_field.name,
                interface_field.type_annotation,
                object_type.name,
                object_field.name,
                object_field.type_annotation
            )));
        }

        // Interface arguments are invariant: same name, same type.
        for interface_param in interface_field.parameters.values() {
            let Some(object_param) = object_field.parameters.get(&interface_param.name) else {
                return Err(SchemaValidationError::new(format!(
                    "Interface field argument \"{}.{}.{}\" is not provided by \"{}.{}\"",
                    interface_type.name,
                    interface_field.name,
                    interface_param.name,
                    object_type.name,
                    object_field.name
                )));
            };
            if !object_param
                .value_type
                .is_same_type(&interface_param.value_type)
            {
                return Err(SchemaValidationError::new(format!(
                    "Interface field argument \"{}.{}.{}\" expects type \"{}\" but \
                     \"{}.{}.{}\" is type \"{}\"",
                    interface_type.name,
                    interface_field.name,
                    interface_param.name,
                    interface_param.value_type,
                    object_type.name,
                    object_field.name,
                    object_param.name,
                    object_param.value_type
                )));
            }
        }

        // Arguments the object adds beyond the interface must be
        // nullable.
        for object_param in object_field.parameters.values() {
            if interface_field.parameters.contains_key(&object_param.name) {
                continue;
            }
            if object_param.is_required() {
                return Err(SchemaValidationError::new(format!(
                    "Object field argument \"{}.{}.{}\" is of required type \"{}\" but is not \
                     provided by interface field \"{}.{}\"",
                    object_type.name,
                    object_field.name,
                    object_param.name,
                    object_param.value_type,
                    interface_type.name,
                    interface_field.name
                )));
            }
        }
    }
    Ok(())
}
