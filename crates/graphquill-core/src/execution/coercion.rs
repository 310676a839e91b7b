//! Input coercion: supplied variable values (JSON) and AST literals are
//! converted to the typed values resolvers receive.

use crate::execution::GraphQLError;
use crate::execution::Location;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use graphquill_parser::ast;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;

/// A variable or argument coercion failure.
///
/// Variable coercion failures are operation-level: the executor returns
/// early with the error attached and no `data` key.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct CoercionError {
    pub message: String,
    pub locations: Vec<Location>,
}

impl CoercionError {
    fn new(message: impl Into<String>, locations: Vec<Location>) -> Self {
        Self {
            message: message.into(),
            locations,
        }
    }

    pub fn into_graphql_error(self) -> GraphQLError {
        GraphQLError {
            message: self.message,
            locations: self.locations,
            path: vec![],
            extensions: None,
        }
    }
}

// =============================================================================
// Variable coercion
// =============================================================================

/// Coerces the supplied variable values against an operation's variable
/// definitions.
///
/// Missing values take the definition's default when one exists; a
/// missing value for a non-nullable variable without a default is an
/// error. Supplied values are coerced recursively per their declared
/// types.
pub fn coerce_variable_values(
    schema: &Schema,
    operation: &ast::OperationDefinition<'_>,
    supplied: &JsonMap<String, JsonValue>,
) -> Result<JsonMap<String, JsonValue>, CoercionError> {
    let mut coerced = JsonMap::new();

    for definition in &operation.variable_definitions {
        let name = definition.variable.as_str();
        let annotation = TypeAnnotation::from_ast(&definition.var_type);
        let location = Location::from_span(&definition.span);

        match supplied.get(name) {
            Some(value) => {
                let value = coerce_input(schema, value, &annotation).map_err(|reason| {
                    CoercionError::new(
                        format!("Variable \"${name}\" got invalid value: {reason}"),
                        vec![location],
                    )
                })?;
                coerced.insert(name.to_string(), value);
            }
            None => {
                if let Some(default_value) = &definition.default_value {
                    let default_json = ast_const_to_json(default_value);
                    let value =
                        coerce_input(schema, &default_json, &annotation).map_err(|reason| {
                            CoercionError::new(
                                format!(
                                    "Variable \"${name}\" got invalid default value: {reason}"
                                ),
                                vec![location],
                            )
                        })?;
                    coerced.insert(name.to_string(), value);
                } else if !annotation.is_nullable() {
                    return Err(CoercionError::new(
                        format!(
                            "Variable \"${name}\" of required type \"{annotation}\" was not \
                             provided"
                        ),
                        vec![location],
                    ));
                }
            }
        }
    }

    Ok(coerced)
}

// =============================================================================
// JSON value coercion
// =============================================================================

/// Coerces a JSON value against a declared input type. The error is the
/// bare reason; callers attach variable/argument context.
pub(crate) fn coerce_input(
    schema: &Schema,
    value: &JsonValue,
    annotation: &TypeAnnotation,
) -> Result<JsonValue, String> {
    if value.is_null() {
        return if annotation.is_nullable() {
            Ok(JsonValue::Null)
        } else {
            Err(format!("Expected non-nullable type \"{annotation}\", found null"))
        };
    }

    match annotation {
        TypeAnnotation::List(list) => match value {
            JsonValue::Array(items) => {
                let coerced: Result<Vec<JsonValue>, String> = items
                    .iter()
                    .map(|item| coerce_input(schema, item, &list.item))
                    .collect();
                Ok(JsonValue::Array(coerced?))
            }
            // A single value coerces to a one-element list, per spec.
            single => Ok(JsonValue::Array(vec![coerce_input(
                schema, single, &list.item,
            )?])),
        },
        TypeAnnotation::Named(named) => {
            let graphql_type = named
                .type_ref
                .deref(schema)
                .map_err(|_| format!("Unknown type \"{}\"", named.type_ref.name()))?;
            coerce_named_input(schema, value, graphql_type)
        }
    }
}

fn coerce_named_input(
    schema: &Schema,
    value: &JsonValue,
    graphql_type: &GraphQLType,
) -> Result<JsonValue, String> {
    match graphql_type {
        GraphQLType::Int => coerce_int(value),
        GraphQLType::Float => match value.as_f64() {
            Some(_) => Ok(value.clone()),
            None => Err(format!("Expected type \"Float\", found {value}")),
        },
        GraphQLType::String => match value {
            JsonValue::String(_) => Ok(value.clone()),
            other => Err(format!("Expected type \"String\", found {other}")),
        },
        GraphQLType::Bool => match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            other => Err(format!("Expected type \"Boolean\", found {other}")),
        },
        GraphQLType::ID => match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => {
                Ok(JsonValue::String(n.to_string()))
            }
            other => Err(format!("Expected type \"ID\", found {other}")),
        },
        // Custom scalars pass through untouched.
        GraphQLType::Scalar(_) => Ok(value.clone()),
        GraphQLType::Enum(enum_type) => match value {
            JsonValue::String(wire_name) => match enum_type.variant(wire_name) {
                Some(variant) => Ok(variant.value.clone()),
                None => Err(format!(
                    "Expected type \"{}\", found \"{wire_name}\"",
                    enum_type.name
                )),
            },
            other => Err(format!(
                "Expected type \"{}\", found {other}",
                enum_type.name
            )),
        },
        GraphQLType::InputObject(input_object) => {
            let JsonValue::Object(entries) = value else {
                return Err(format!(
                    "Expected type \"{}\" to be an object",
                    input_object.name
                ));
            };

            // Reject keys that are not declared input fields.
            for key in entries.keys() {
                if !input_object.fields.contains_key(key) {
                    return Err(format!(
                        "Field \"{key}\" is not defined by type \"{}\"",
                        input_object.name
                    ));
                }
            }

            let mut coerced = JsonMap::new();
            for (field_name, field_def) in &input_object.fields {
                match entries.get(field_name) {
                    Some(entry) => {
                        let value = coerce_input(schema, entry, &field_def.value_type)?;
                        coerced.insert(field_name.clone(), value);
                    }
                    None => {
                        if let Some(default_value) = &field_def.default_value {
                            let value =
                                coerce_input(schema, default_value, &field_def.value_type)?;
                            coerced.insert(field_name.clone(), value);
                        } else if field_def.is_required() {
                            return Err(format!(
                                "Field \"{field_name}\" of required type \"{}\" was not provided",
                                field_def.value_type
                            ));
                        }
                    }
                }
            }
            Ok(JsonValue::Object(coerced))
        }
        // Output-only types cannot appear in input positions; schema
        // validation rejects them before execution.
        other => Err(format!(
            "Type \"{}\" cannot be used as an input type",
            other.name()
        )),
    }
}

/// Int coercion: integral values within 32-bit signed range.
fn coerce_int(value: &JsonValue) -> Result<JsonValue, String> {
    let out_of_range = || format!("Int cannot represent non 32-bit signed integer value: {value}");
    match value {
        JsonValue::Number(n) => {
            if let Some(int) = n.as_i64() {
                if int >= i64::from(i32::MIN) && int <= i64::from(i32::MAX) {
                    Ok(JsonValue::from(int))
                } else {
                    Err(out_of_range())
                }
            } else if let Some(float) = n.as_f64() {
                if float.fract() == 0.0
                    && float >= f64::from(i32::MIN)
                    && float <= f64::from(i32::MAX)
                {
                    Ok(JsonValue::from(float as i64))
                } else {
                    Err(format!("Int cannot represent non-integer value: {value}"))
                }
            } else {
                Err(out_of_range())
            }
        }
        other => Err(format!("Expected type \"Int\", found {other}")),
    }
}

// =============================================================================
// AST literal coercion
// =============================================================================

/// Converts a const AST value to untyped JSON: enum names become strings,
/// numbers parse to JSON numbers. Used for storing SDL default values;
/// the stored form is re-coerced against its declared type at the point
/// of use.
pub(crate) fn ast_const_to_json(value: &ast::Value<'_>) -> JsonValue {
    match value {
        ast::Value::Int(v) => v
            .parse()
            .map(JsonValue::from)
            .unwrap_or(JsonValue::Null),
        ast::Value::Float(v) => v
            .parse()
            .map(JsonValue::from)
            .unwrap_or(JsonValue::Null),
        ast::Value::String(v) => JsonValue::String(v.value.to_string()),
        ast::Value::Boolean(v) => JsonValue::Bool(v.value),
        ast::Value::Null(_) => JsonValue::Null,
        ast::Value::Enum(v) => JsonValue::String(v.value.to_string()),
        ast::Value::List(v) => {
            JsonValue::Array(v.values.iter().map(ast_const_to_json).collect())
        }
        ast::Value::Object(v) => {
            let mut map = JsonMap::new();
            for field in &v.fields {
                map.insert(field.name.as_str().to_string(), ast_const_to_json(&field.value));
            }
            JsonValue::Object(map)
        }
        // Const contexts cannot contain variables; the parser enforces it.
        ast::Value::Variable(_) => JsonValue::Null,
    }
}

/// Coerces an AST literal against a declared type, substituting variable
/// references from the coerced variable values.
///
/// `Ok(None)` means "no value": a variable reference whose variable was
/// not provided. Callers decide whether a default applies or the position
/// was required.
pub(crate) fn value_from_ast(
    schema: &Schema,
    value: &ast::Value<'_>,
    annotation: &TypeAnnotation,
    variables: &JsonMap<String, JsonValue>,
) -> Result<Option<JsonValue>, String> {
    match value {
        ast::Value::Variable(variable) => {
            // Variable usage in a compatible position is guaranteed by
            // validation; the value was coerced with the variable's own
            // declared type.
            match variables.get(variable.name.as_str()) {
                Some(resolved) => {
                    if resolved.is_null() && !annotation.is_nullable() {
                        Err(format!(
                            "Variable \"${}\" must not be null",
                            variable.name.as_str()
                        ))
                    } else {
                        Ok(Some(resolved.clone()))
                    }
                }
                None => Ok(None),
            }
        }
        ast::Value::Null(_) => {
            if annotation.is_nullable() {
                Ok(Some(JsonValue::Null))
            } else {
                Err(format!("Expected non-nullable type \"{annotation}\", found null"))
            }
        }
        _ => match annotation {
            TypeAnnotation::List(list) => match value {
                ast::Value::List(items) => {
                    let mut coerced = Vec::with_capacity(items.values.len());
                    for item in &items.values {
                        match value_from_ast(schema, item, &list.item, variables)? {
                            Some(item_value) => coerced.push(item_value),
                            // An unset variable in a list slot becomes null.
                            None => coerced.push(JsonValue::Null),
                        }
                    }
                    Ok(Some(JsonValue::Array(coerced)))
                }
                single => Ok(value_from_ast(schema, single, &list.item, variables)?
                    .map(|v| JsonValue::Array(vec![v]))),
            },
            TypeAnnotation::Named(named) => {
                let graphql_type = named
                    .type_ref
                    .deref(schema)
                    .map_err(|_| format!("Unknown type \"{}\"", named.type_ref.name()))?;
                literal_to_named(schema, value, graphql_type, variables).map(Some)
            }
        },
    }
}

fn literal_to_named(
    schema: &Schema,
    value: &ast::Value<'_>,
    graphql_type: &GraphQLType,
    variables: &JsonMap<String, JsonValue>,
) -> Result<JsonValue, String> {
    match graphql_type {
        GraphQLType::Int => match value {
            ast::Value::Int(v) => {
                let json = v
                    .parse()
                    .map(JsonValue::from)
                    .map_err(|err| format!("Invalid Int literal: {err}"))?;
                coerce_int(&json)
            }
            other => Err(format!(
                "Expected type \"Int\", found {}",
                graphquill_parser::print_value(other)
            )),
        },
        GraphQLType::Float => match value {
            ast::Value::Int(v) => v
                .parse()
                .map(|n| JsonValue::from(n as f64))
                .map_err(|err| format!("Invalid Int literal: {err}")),
            ast::Value::Float(v) => v
                .parse()
                .map(JsonValue::from)
                .map_err(|err| format!("Invalid Float literal: {err}")),
            other => Err(format!(
                "Expected type \"Float\", found {}",
                graphquill_parser::print_value(other)
            )),
        },
        GraphQLType::String => match value {
            ast::Value::String(v) => Ok(JsonValue::String(v.value.to_string())),
            other => Err(format!(
                "Expected type \"String\", found {}",
                graphquill_parser::print_value(other)
            )),
        },
        GraphQLType::Bool => match value {
            ast::Value::Boolean(v) => Ok(JsonValue::Bool(v.value)),
            other => Err(format!(
                "Expected type \"Boolean\", found {}",
                graphquill_parser::print_value(other)
            )),
        },
        GraphQLType::ID => match value {
            ast::Value::String(v) => Ok(JsonValue::String(v.value.to_string())),
            ast::Value::Int(v) => Ok(JsonValue::String(v.raw.to_string())),
            other => Err(format!(
                "Expected type \"ID\", found {}",
                graphquill_parser::print_value(other)
            )),
        },
        GraphQLType::Scalar(_) => Ok(ast_const_to_json(value)),
        GraphQLType::Enum(enum_type) => match value {
            ast::Value::Enum(v) => match enum_type.variant(v.value.as_ref()) {
                Some(variant) => Ok(variant.value.clone()),
                None => Err(format!(
                    "Expected type \"{}\", found {}",
                    enum_type.name,
                    v.value.as_ref()
                )),
            },
            other => Err(format!(
                "Expected type \"{}\", found {}",
                enum_type.name,
                graphquill_parser::print_value(other)
            )),
        },
        GraphQLType::InputObject(input_object) => {
            let ast::Value::Object(object) = value else {
                return Err(format!(
                    "Expected type \"{}\" to be an object",
                    input_object.name
                ));
            };

            for field in &object.fields {
                if !input_object.fields.contains_key(field.name.as_str()) {
                    return Err(format!(
                        "Field \"{}\" is not defined by type \"{}\"",
                        field.name.as_str(),
                        input_object.name
                    ));
                }
            }

            let mut coerced = JsonMap::new();
            for (field_name, field_def) in &input_object.fields {
                let supplied = object
                    .fields
                    .iter()
                    .find(|field| field.name.as_str() == field_name);
                match supplied {
                    Some(field) => {
                        match value_from_ast(schema, &field.value, &field_def.value_type, variables)?
                        {
                            Some(field_value) => {
                                coerced.insert(field_name.clone(), field_value);
                            }
                            None => {
                                apply_input_field_default(
                                    schema,
                                    &mut coerced,
                                    field_name,
                                    field_def,
                                )?;
                            }
                        }
                    }
                    None => {
                        apply_input_field_default(schema, &mut coerced, field_name, field_def)?;
                    }
                }
            }
            Ok(JsonValue::Object(coerced))
        }
        other => Err(format!(
            "Type \"{}\" cannot be used as an input type",
            other.name()
        )),
    }
}

fn apply_input_field_default(
    schema: &Schema,
    coerced: &mut JsonMap<String, JsonValue>,
    field_name: &str,
    field_def: &crate::types::InputValueDef,
) -> Result<(), String> {
    if let Some(default_value) = &field_def.default_value {
        let value = coerce_input(schema, default_value, &field_def.value_type)?;
        coerced.insert(field_name.to_string(), value);
        Ok(())
    } else if field_def.is_required() {
        Err(format!(
            "Field \"{field_name}\" of required type \"{}\" was not provided",
            field_def.value_type
        ))
    } else {
        Ok(())
    }
}

// =============================================================================
// Argument coercion
// =============================================================================

/// Coerces the argument literals of a field (or directive) usage against
/// its parameter definitions, substituting variable values.
pub(crate) fn coerce_argument_values(
    schema: &Schema,
    field_def: &Field,
    ast_arguments: &[ast::Argument<'_>],
    variables: &JsonMap<String, JsonValue>,
) -> Result<JsonMap<String, JsonValue>, String> {
    let mut coerced = JsonMap::new();

    for (param_name, param) in &field_def.parameters {
        let supplied = ast_arguments
            .iter()
            .find(|argument| argument.name.as_str() == param_name);

        let value = match supplied {
            Some(argument) => {
                value_from_ast(schema, &argument.value, &param.value_type, variables).map_err(
                    |reason| format!("Argument \"{param_name}\" got invalid value: {reason}"),
                )?
            }
            None => None,
        };

        match value {
            Some(value) => {
                coerced.insert(param_name.clone(), value);
            }
            None => {
                if let Some(default_value) = &param.default_value {
                    let value =
                        coerce_input(schema, default_value, &param.value_type).map_err(|reason| {
                            format!(
                                "Argument \"{param_name}\" got invalid default value: {reason}"
                            )
                        })?;
                    coerced.insert(param_name.clone(), value);
                } else if param.is_required() {
                    return Err(format!(
                        "Argument \"{param_name}\" of required type \"{}\" was not provided",
                        param.value_type
                    ));
                }
            }
        }
    }

    Ok(coerced)
}
