//! Operation execution: selects the operation, coerces variables,
//! collects fields, resolves them (concurrently for sibling fields), and
//! assembles the response with spec null propagation.

use crate::execution::coercion::coerce_argument_values;
use crate::execution::coercion::coerce_variable_values;
use crate::execution::collect::collect_fields_merged;
use crate::execution::middleware::MiddlewareStack;
use crate::execution::resolver::default_resolve;
use crate::execution::runtime::BlockingRuntime;
use crate::execution::runtime::PropagateNull;
use crate::execution::runtime::Runtime;
use crate::execution::runtime::Task;
use crate::execution::GraphQLError;
use crate::execution::Instrumentation;
use crate::execution::Location;
use crate::execution::PathSegment;
use crate::execution::ResolveContext;
use crate::execution::ResolveInfo;
use crate::execution::Response;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use graphquill_parser::ast;
use graphquill_parser::ast::OperationKind;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

/// Resolves the concrete object type name for a value of an abstract
/// type. Receives the resolved value, the schema, and the abstract type.
pub type TypeResolverFn =
    Arc<dyn Fn(&JsonValue, &Schema, &GraphQLType) -> Option<String> + Send + Sync>;

/// Inputs to [`execute`] beyond the schema and document.
#[derive(Clone)]
pub struct ExecuteOptions {
    /// Raw variable values, coerced against the operation's variable
    /// definitions before execution.
    pub variables: JsonMap<String, JsonValue>,
    /// Selects the operation when the document contains several.
    pub operation_name: Option<String>,
    /// The root value the top-level resolvers receive.
    pub root: JsonValue,
    /// Opaque context value passed by reference to every resolver.
    pub context: JsonValue,
    pub middlewares: MiddlewareStack,
    pub instrumentation: Option<Arc<dyn Instrumentation>>,
    pub runtime: Arc<dyn Runtime>,
    /// Schema-wide resolver for abstract types. When absent, the engine
    /// falls back to a `__typename` key on the resolved value, then to
    /// the single possible type.
    pub type_resolver: Option<TypeResolverFn>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            variables: JsonMap::new(),
            operation_name: None,
            root: JsonValue::Null,
            context: JsonValue::Null,
            middlewares: MiddlewareStack::new(),
            instrumentation: None,
            runtime: Arc::new(BlockingRuntime),
            type_resolver: None,
        }
    }
}

/// Executes a parsed and validated document against a schema.
///
/// Operation-level failures (unknown operation, variable coercion)
/// produce a response without a `data` key; resolver failures are
/// collected into `errors` with nulls propagated into `data`.
pub fn execute(
    schema: &Schema,
    document: &ast::Document<'_>,
    options: &ExecuteOptions,
) -> Response {
    let operation = match select_operation(document, options.operation_name.as_deref()) {
        Ok(operation) => operation,
        Err(error) => return Response::from_errors(vec![error]),
    };

    if operation.operation == OperationKind::Subscription {
        return Response::from_errors(vec![GraphQLError::new(
            "Subscription execution is not supported",
        )]);
    }

    let variables = match coerce_variable_values(schema, operation, &options.variables) {
        Ok(variables) => variables,
        Err(error) => return Response::from_errors(vec![error.into_graphql_error()]),
    };

    let Some(root_type) = schema.operation_root(operation.operation) else {
        return Response::from_errors(vec![GraphQLError::new(format!(
            "Schema is not configured for {} operations",
            operation.operation.keyword()
        ))]);
    };

    let fragments: HashMap<&str, &ast::FragmentDefinition<'_>> = document
        .fragments()
        .map(|fragment| (fragment.name.as_str(), fragment))
        .collect();

    let state = ExecState {
        schema,
        fragments,
        operation,
        variables,
        errors: Mutex::new(vec![]),
        middlewares: &options.middlewares,
        instrumentation: options.instrumentation.as_deref(),
        runtime: options.runtime.as_ref(),
        context: &options.context,
        type_resolver: options.type_resolver.as_ref(),
    };

    tracing::debug!(
        operation = operation.operation.keyword(),
        name = operation.name.as_ref().map(|n| n.as_str()),
        "executing operation"
    );

    // Top-level mutation fields run serially, per spec; everything else
    // is free to run concurrently.
    let sequential = operation.operation == OperationKind::Mutation;
    let selection_sets = [&operation.selection_set];
    let data = match state.execute_selection_set(
        root_type,
        &options.root,
        &selection_sets,
        &[],
        sequential,
    ) {
        Ok(data) => data,
        Err(PropagateNull) => JsonValue::Null,
    };

    let errors = state.errors.into_inner().expect("error list lock poisoned");
    Response::new(data, errors)
}

/// Picks the operation to run: the named one, else the only one.
fn select_operation<'doc, 'src>(
    document: &'doc ast::Document<'src>,
    operation_name: Option<&str>,
) -> Result<&'doc ast::OperationDefinition<'src>, GraphQLError> {
    let mut operations = document.operations();
    match operation_name {
        Some(name) => operations
            .find(|operation| {
                operation
                    .name
                    .as_ref()
                    .is_some_and(|op_name| op_name.as_str() == name)
            })
            .ok_or_else(|| GraphQLError::new(format!("Unknown operation \"{name}\""))),
        None => {
            let first = operations
                .next()
                .ok_or_else(|| GraphQLError::new("Document contains no operations"))?;
            if operations.next().is_some() {
                Err(GraphQLError::new(
                    "Operation name is required when the document contains multiple operations",
                ))
            } else {
                Ok(first)
            }
        }
    }
}

// =============================================================================
// Execution state
// =============================================================================

struct ExecState<'exec> {
    schema: &'exec Schema,
    fragments: HashMap<&'exec str, &'exec ast::FragmentDefinition<'exec>>,
    operation: &'exec ast::OperationDefinition<'exec>,
    variables: JsonMap<String, JsonValue>,
    /// Append-only; appends are serialized behind the mutex so concurrent
    /// sibling failures interleave safely.
    errors: Mutex<Vec<GraphQLError>>,
    middlewares: &'exec MiddlewareStack,
    instrumentation: Option<&'exec dyn Instrumentation>,
    runtime: &'exec dyn Runtime,
    context: &'exec JsonValue,
    type_resolver: Option<&'exec TypeResolverFn>,
}

impl<'exec> ExecState<'exec> {
    fn record_error(&self, error: GraphQLError) {
        self.errors
            .lock()
            .expect("error list lock poisoned")
            .push(error);
    }

    /// Converts an error below `annotation` into this position's value:
    /// nullable positions absorb the null, non-nullable positions keep
    /// propagating.
    fn absorb_or_propagate(
        &self,
        annotation: &crate::types::TypeAnnotation,
    ) -> Result<JsonValue, PropagateNull> {
        if annotation.is_nullable() {
            Ok(JsonValue::Null)
        } else {
            Err(PropagateNull)
        }
    }

    // =========================================================================
    // Selection sets
    // =========================================================================

    /// Executes the merged selection sets against a concrete object type.
    ///
    /// Sibling fields are scheduled through the runtime; the response map
    /// preserves first-seen response-name order regardless of completion
    /// order.
    fn execute_selection_set(
        &self,
        parent_type: &GraphQLType,
        parent_value: &JsonValue,
        selection_sets: &[&'exec ast::SelectionSet<'exec>],
        path: &[PathSegment],
        sequential: bool,
    ) -> Result<JsonValue, PropagateNull> {
        let object_type = parent_type
            .as_object()
            .expect("selection sets execute against object types");

        let grouped = collect_fields_merged(
            self.schema,
            object_type,
            selection_sets,
            &self.variables,
            &self.fragments,
        );

        // Unknown fields cannot appear in validated documents; if one
        // does, it is omitted from the response entirely.
        let mut tasks: Vec<Task<'_>> = Vec::with_capacity(grouped.len());
        let mut scheduled_names: Vec<&String> = Vec::with_capacity(grouped.len());
        for (response_name, fields) in &grouped {
            let field_node = fields[0];
            let field_name = field_node.name.as_str();
            let field_def = if field_name == "__typename" {
                None
            } else {
                match self.lookup_field_def(object_type, field_name) {
                    Some(field_def) => Some(field_def),
                    None => continue,
                }
            };

            let fields: Vec<&ast::Field<'_>> = fields.clone();
            let mut field_path = path.to_vec();
            field_path.push(PathSegment::Key(response_name.clone()));
            scheduled_names.push(response_name);
            tasks.push(Box::new(move || {
                self.execute_field(
                    parent_type,
                    object_type,
                    parent_value,
                    field_def,
                    &fields,
                    field_path,
                )
            }));
        }

        let outputs = if sequential {
            tasks.into_iter().map(|task| task()).collect::<Vec<_>>()
        } else {
            self.runtime.gather_values(tasks)
        };

        let mut data = JsonMap::with_capacity(scheduled_names.len());
        let mut failed = false;
        for (response_name, output) in scheduled_names.iter().zip(outputs) {
            match output {
                Ok(value) => {
                    data.insert((*response_name).clone(), value);
                }
                // Sibling tasks all ran to completion; a failure never
                // cancels the others.
                Err(PropagateNull) => failed = true,
            }
        }

        if failed {
            Err(PropagateNull)
        } else {
            Ok(JsonValue::Object(data))
        }
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Resolves one response position. A `None` field definition means
    /// the `__typename` meta field.
    fn execute_field(
        &self,
        parent_type: &GraphQLType,
        object_type: &ObjectType,
        parent_value: &JsonValue,
        field_def: Option<&'exec Field>,
        fields: &[&'exec ast::Field<'exec>],
        path: Vec<PathSegment>,
    ) -> Result<JsonValue, PropagateNull> {
        // The first field determines the definition; overlap validation
        // guarantees the group is mergeable.
        let field_node = fields[0];
        let field_name = field_node.name.as_str();

        let Some(field_def) = field_def else {
            return Ok(JsonValue::String(object_type.name.clone()));
        };

        let arguments =
            match coerce_argument_values(self.schema, field_def, &field_node.arguments, &self.variables)
            {
                Ok(arguments) => arguments,
                Err(reason) => {
                    self.record_error(GraphQLError {
                        message: reason,
                        locations: vec![Location::from_span(&field_node.span)],
                        path: path.clone(),
                        extensions: None,
                    });
                    return self.absorb_or_propagate(&field_def.type_annotation);
                }
            };

        let nodes: Vec<&ast::Field<'_>> = fields.to_vec();
        let info = ResolveInfo {
            field_name,
            field_def,
            parent_type,
            path: path.clone(),
            schema: self.schema,
            variables: &self.variables,
            fragments: &self.fragments,
            operation: self.operation,
            nodes: &nodes,
        };
        let ctx = ResolveContext {
            parent_value,
            arguments: &arguments,
            context_value: self.context,
            info: &info,
        };

        if let Some(instrumentation) = self.instrumentation {
            instrumentation.on_field_start(&info);
        }

        let resolve = |resolve_ctx: &ResolveContext<'_>| match &field_def.resolver {
            Some(resolver) => resolver.call(resolve_ctx),
            None => default_resolve(resolve_ctx),
        };
        let resolved = self.middlewares.apply(&ctx, &resolve);

        if let Some(instrumentation) = self.instrumentation {
            instrumentation.on_field_end(&info);
        }

        match resolved {
            Ok(value) => self.complete_value(
                &field_def.type_annotation,
                fields,
                &path,
                value,
                &format!("{}.{}", parent_type.name(), field_name),
            ),
            Err(resolver_error) => {
                tracing::debug!(
                    field = field_name,
                    error = %resolver_error.message,
                    "resolver failed"
                );
                self.record_error(GraphQLError {
                    message: resolver_error.message,
                    locations: vec![Location::from_span(&field_node.span)],
                    path,
                    extensions: resolver_error.extensions,
                });
                self.absorb_or_propagate(&field_def.type_annotation)
            }
        }
    }

    /// Field definition lookup, including the `__schema` / `__type` meta
    /// fields on the query root.
    fn lookup_field_def(
        &self,
        object_type: &ObjectType,
        field_name: &str,
    ) -> Option<&'exec Field> {
        if object_type.name == self.schema.query_type().name() {
            match field_name {
                "__schema" => return Some(&self.schema.meta_fields().schema_field),
                "__type" => return Some(&self.schema.meta_fields().type_field),
                _ => {}
            }
        }
        // Re-borrow through the schema so the reference outlives the
        // local `object_type` borrow.
        self.schema
            .type_named(&object_type.name)
            .and_then(|graphql_type| graphql_type.field(field_name))
    }

    // =========================================================================
    // Value completion
    // =========================================================================

    fn complete_value(
        &self,
        annotation: &crate::types::TypeAnnotation,
        fields: &[&'exec ast::Field<'exec>],
        path: &[PathSegment],
        value: JsonValue,
        field_label: &str,
    ) -> Result<JsonValue, PropagateNull> {
        use crate::types::TypeAnnotation;

        if value.is_null() {
            if annotation.is_nullable() {
                return Ok(JsonValue::Null);
            }
            self.record_error(GraphQLError {
                message: format!("Cannot return null for non-nullable field {field_label}"),
                locations: vec![Location::from_span(&fields[0].span)],
                path: path.to_vec(),
                extensions: None,
            });
            return Err(PropagateNull);
        }

        match annotation {
            TypeAnnotation::List(list) => {
                let JsonValue::Array(items) = value else {
                    self.record_error(GraphQLError {
                        message: format!(
                            "Field {field_label} resolved to a non-list value for list type \
                             \"{annotation}\""
                        ),
                        locations: vec![Location::from_span(&fields[0].span)],
                        path: path.to_vec(),
                        extensions: None,
                    });
                    return self.absorb_or_propagate(annotation);
                };

                let mut completed = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let mut item_path = path.to_vec();
                    item_path.push(PathSegment::Index(index));
                    match self.complete_value(&list.item, fields, &item_path, item, field_label) {
                        Ok(item_value) => completed.push(item_value),
                        // A failed item with a non-nullable item type
                        // nulls the whole list (or keeps propagating).
                        Err(PropagateNull) => return self.absorb_or_propagate(annotation),
                    }
                }
                Ok(JsonValue::Array(completed))
            }
            TypeAnnotation::Named(named) => {
                let Ok(graphql_type) = named.type_ref.deref(self.schema) else {
                    self.record_error(GraphQLError {
                        message: format!("Unknown type \"{}\"", named.type_ref.name()),
                        locations: vec![Location::from_span(&fields[0].span)],
                        path: path.to_vec(),
                        extensions: None,
                    });
                    return self.absorb_or_propagate(annotation);
                };

                if graphql_type.is_leaf() {
                    return match serialize_leaf(graphql_type, &value) {
                        Ok(serialized) => Ok(serialized),
                        Err(reason) => {
                            self.record_error(GraphQLError {
                                message: reason,
                                locations: vec![Location::from_span(&fields[0].span)],
                                path: path.to_vec(),
                                extensions: None,
                            });
                            self.absorb_or_propagate(annotation)
                        }
                    };
                }

                // Composite: find the concrete object type, then execute
                // the merged sub-selections against it.
                let concrete = match self.resolve_concrete_type(graphql_type, &value) {
                    Ok(concrete) => concrete,
                    Err(reason) => {
                        self.record_error(GraphQLError {
                            message: reason,
                            locations: vec![Location::from_span(&fields[0].span)],
                            path: path.to_vec(),
                            extensions: None,
                        });
                        return self.absorb_or_propagate(annotation);
                    }
                };

                let selection_sets: Vec<&ast::SelectionSet<'_>> = fields
                    .iter()
                    .filter_map(|field| field.selection_set.as_ref())
                    .collect();
                match self.execute_selection_set(concrete, &value, &selection_sets, path, false) {
                    Ok(data) => Ok(data),
                    Err(PropagateNull) => self.absorb_or_propagate(annotation),
                }
            }
        }
    }

    /// Picks the concrete object type for a composite position: identity
    /// for object types; for abstract types the schema-wide type
    /// resolver, then a `__typename` key on the value, then the single
    /// possible type.
    fn resolve_concrete_type(
        &self,
        graphql_type: &'exec GraphQLType,
        value: &JsonValue,
    ) -> Result<&'exec GraphQLType, String> {
        if graphql_type.as_object().is_some() {
            return Ok(graphql_type);
        }

        let resolved_name = self
            .type_resolver
            .and_then(|resolver| resolver(value, self.schema, graphql_type))
            .or_else(|| {
                value
                    .get("__typename")
                    .and_then(JsonValue::as_str)
                    .map(str::to_string)
            });

        let abstract_name = graphql_type.name();
        match resolved_name {
            Some(name) => {
                let concrete = self
                    .schema
                    .type_named(&name)
                    .ok_or_else(|| format!("Unknown type \"{name}\""))?;
                if self.schema.is_possible_subtype(concrete, graphql_type) {
                    // Re-borrow at schema lifetime.
                    Ok(self
                        .schema
                        .type_named(&name)
                        .expect("type was just looked up"))
                } else {
                    Err(format!(
                        "Runtime type \"{name}\" is not a possible type for \"{abstract_name}\""
                    ))
                }
            }
            None => {
                let possible = self.schema.possible_types(graphql_type);
                if possible.len() == 1 {
                    let name = possible[0].name.clone();
                    Ok(self
                        .schema
                        .type_named(&name)
                        .expect("possible type is registered"))
                } else {
                    Err(format!(
                        "Abstract type \"{abstract_name}\" must resolve to an object type at \
                         runtime"
                    ))
                }
            }
        }
    }
}

/// Serializes a resolved leaf value per its type.
fn serialize_leaf(graphql_type: &GraphQLType, value: &JsonValue) -> Result<JsonValue, String> {
    match graphql_type {
        GraphQLType::Int => match value.as_i64() {
            Some(int) if (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&int) => {
                Ok(JsonValue::from(int))
            }
            _ => Err(format!(
                "Int cannot represent non 32-bit signed integer value: {value}"
            )),
        },
        GraphQLType::Float => match value.as_f64() {
            Some(float) => Ok(JsonValue::from(float)),
            None => Err(format!("Float cannot represent non numeric value: {value}")),
        },
        GraphQLType::String => match value {
            JsonValue::String(_) => Ok(value.clone()),
            other => Err(format!("String cannot represent value: {other}")),
        },
        GraphQLType::Bool => match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            other => Err(format!("Boolean cannot represent value: {other}")),
        },
        GraphQLType::ID => match value {
            JsonValue::String(_) => Ok(value.clone()),
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => {
                Ok(JsonValue::String(n.to_string()))
            }
            other => Err(format!("ID cannot represent value: {other}")),
        },
        GraphQLType::Scalar(_) => Ok(value.clone()),
        GraphQLType::Enum(enum_type) => match enum_type.variant_for_value(value) {
            Some(variant) => Ok(JsonValue::String(variant.name.clone())),
            None => Err(format!(
                "Enum \"{}\" cannot represent value: {value}",
                enum_type.name
            )),
        },
        other => Err(format!("Type \"{}\" is not a leaf type", other.name())),
    }
}
