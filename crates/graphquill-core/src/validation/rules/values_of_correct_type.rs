use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::print_value;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;

/// Literal values must match the input type of their position.
///
/// The check runs from each root value position (arguments, variable
/// defaults) and recurses into lists and input objects itself; variable
/// references are skipped, they are covered by the allowed-position
/// rule.
pub(crate) struct ValuesOfCorrectTypeRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
}

impl<'v, 'schema> ValuesOfCorrectTypeRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self { ctx }
    }

    fn check_value(&self, value: &ast::Value<'_>, annotation: &TypeAnnotation) {
        let schema = self.ctx.schema;

        if let ast::Value::Variable(_) = value {
            return;
        }

        if let ast::Value::Null(_) = value {
            if !annotation.is_nullable() {
                self.ctx.error(
                    format!("Expected type \"{annotation}\", found null"),
                    &[value.span()],
                );
            }
            return;
        }

        match annotation {
            TypeAnnotation::List(list) => match value {
                ast::Value::List(list_value) => {
                    for item in &list_value.values {
                        self.check_value(item, &list.item);
                    }
                }
                // A single value coerces to a one-element list.
                single => self.check_value(single, &list.item),
            },
            TypeAnnotation::Named(named) => {
                let Ok(graphql_type) = named.type_ref.deref(schema) else {
                    return;
                };
                self.check_named(value, annotation, graphql_type);
            }
        }
    }

    fn check_named(
        &self,
        value: &ast::Value<'_>,
        annotation: &TypeAnnotation,
        graphql_type: &GraphQLType,
    ) {
        let mismatch = || {
            self.ctx.error(
                format!(
                    "Expected type \"{annotation}\", found {}",
                    print_value(value)
                ),
                &[value.span()],
            );
        };

        match graphql_type {
            GraphQLType::Int => {
                let valid = matches!(value, ast::Value::Int(v) if v.parse().is_ok_and(|n| {
                    (i64::from(i32::MIN)..=i64::from(i32::MAX)).contains(&n)
                }));
                if !valid {
                    mismatch();
                }
            }
            GraphQLType::Float => {
                if !matches!(value, ast::Value::Int(_) | ast::Value::Float(_)) {
                    mismatch();
                }
            }
            GraphQLType::String => {
                if !matches!(value, ast::Value::String(_)) {
                    mismatch();
                }
            }
            GraphQLType::Bool => {
                if !matches!(value, ast::Value::Boolean(_)) {
                    mismatch();
                }
            }
            GraphQLType::ID => {
                if !matches!(value, ast::Value::String(_) | ast::Value::Int(_)) {
                    mismatch();
                }
            }
            // Custom scalars accept any literal.
            GraphQLType::Scalar(_) => {}
            GraphQLType::Enum(enum_type) => {
                let valid = matches!(
                    value,
                    ast::Value::Enum(v) if enum_type.variant(v.value.as_ref()).is_some()
                );
                if !valid {
                    mismatch();
                }
            }
            GraphQLType::InputObject(input_object) => {
                let ast::Value::Object(object) = value else {
                    mismatch();
                    return;
                };
                for field in &object.fields {
                    match input_object.field(field.name.as_str()) {
                        Some(field_def) => self.check_value(&field.value, &field_def.value_type),
                        None => self.ctx.error(
                            format!(
                                "Field \"{}\" is not defined by type \"{}\"",
                                field.name, input_object.name
                            ),
                            &[&field.span],
                        ),
                    }
                }
                for (field_name, field_def) in &input_object.fields {
                    let provided = object
                        .fields
                        .iter()
                        .any(|field| field.name.as_str() == field_name);
                    if field_def.is_required() && !provided {
                        self.ctx.error(
                            format!(
                                "Field \"{}.{field_name}\" of required type \"{}\" was not \
                                 provided",
                                input_object.name, field_def.value_type
                            ),
                            &[value.span()],
                        );
                    }
                }
            }
            // Output-only types in input positions are schema-validation
            // failures; nothing useful to report here.
            _ => {}
        }
    }
}

impl<'src> DocumentVisitor<'src> for ValuesOfCorrectTypeRule<'_, '_> {
    fn enter_argument(&mut self, node: &ast::Argument<'src>) -> VisitFlow {
        let annotation = self
            .ctx
            .info()
            .argument
            .map(|argument| argument.value_type.clone());
        if let Some(annotation) = annotation {
            self.check_value(&node.value, &annotation);
        }
        VisitFlow::Next
    }

    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) -> VisitFlow {
        if let Some(default_value) = &node.default_value {
            let annotation = TypeAnnotation::from_ast(&node.var_type);
            if annotation.innermost_type(self.ctx.schema).is_some() {
                self.check_value(default_value, &annotation);
            }
        }
        VisitFlow::Next
    }
}
