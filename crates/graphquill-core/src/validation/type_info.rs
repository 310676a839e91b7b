//! Schema-relative type context tracking for AST traversals.
//!
//! [`TypeInfo`] maintains five stacks (current output type, parent
//! composite type, current input type, current field definition, current
//! input-value definition) plus the `directive`, `argument`, and
//! `enum_value` scalars, updated as a document is walked.
//!
//! Unknown or invalid types push `None` rather than failing: the
//! traversal never breaks on a malformed document, leaving consumers
//! (the validation rules) to inspect the `None`s gracefully.

use crate::schema::Schema;
use crate::types::DirectiveDef;
use crate::types::EnumVariant;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputValueDef;
use crate::types::TypeAnnotation;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use smallvec::SmallVec;
use std::cell::RefCell;

/// Documents rarely nest past a handful of levels, so the stacks live
/// inline until they do.
type Stack<T> = SmallVec<[T; 8]>;

pub struct TypeInfo<'schema> {
    schema: &'schema Schema,
    /// Current (possibly wrapped) output type.
    type_stack: Stack<Option<TypeAnnotation>>,
    /// Enclosing composite type of the current selection set.
    parent_type_stack: Stack<Option<&'schema GraphQLType>>,
    /// Current (possibly wrapped) input type.
    input_type_stack: Stack<Option<TypeAnnotation>>,
    field_def_stack: Stack<Option<&'schema Field>>,
    input_value_def_stack: Stack<Option<&'schema InputValueDef>>,
    pub directive: Option<&'schema DirectiveDef>,
    pub argument: Option<&'schema InputValueDef>,
    pub enum_value: Option<&'schema EnumVariant>,
}

impl<'schema> TypeInfo<'schema> {
    pub fn new(schema: &'schema Schema) -> Self {
        Self {
            schema,
            type_stack: SmallVec::new(),
            parent_type_stack: SmallVec::new(),
            input_type_stack: SmallVec::new(),
            field_def_stack: SmallVec::new(),
            input_value_def_stack: SmallVec::new(),
            directive: None,
            argument: None,
            enum_value: None,
        }
    }

    pub fn schema(&self) -> &'schema Schema {
        self.schema
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current output type annotation, when known.
    pub fn current_type(&self) -> Option<&TypeAnnotation> {
        self.type_stack.last().and_then(Option::as_ref)
    }

    /// The current output type's innermost named type.
    pub fn current_named_type(&self) -> Option<&'schema GraphQLType> {
        self.current_type()
            .and_then(|annotation| annotation.innermost_type(self.schema))
    }

    /// The composite type of the enclosing selection set.
    pub fn parent_type(&self) -> Option<&'schema GraphQLType> {
        self.parent_type_stack.last().copied().flatten()
    }

    /// The current input type annotation (inside arguments and values).
    pub fn input_type(&self) -> Option<&TypeAnnotation> {
        self.input_type_stack.last().and_then(Option::as_ref)
    }

    /// The input object type enclosing the current input position.
    pub fn parent_input_type(&self) -> Option<&'schema GraphQLType> {
        let len = self.input_type_stack.len();
        if len < 2 {
            return None;
        }
        self.input_type_stack[len - 2]
            .as_ref()
            .and_then(|annotation| annotation.innermost_type(self.schema))
            .filter(|graphql_type| graphql_type.as_input_object().is_some())
    }

    pub fn field_def(&self) -> Option<&'schema Field> {
        self.field_def_stack.last().copied().flatten()
    }

    pub fn input_value_def(&self) -> Option<&'schema InputValueDef> {
        self.input_value_def_stack.last().copied().flatten()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Resolves the field definition for `name` on `parent`, including
    /// the `__schema` / `__type` meta fields on the query root and
    /// `__typename` on any composite.
    pub fn field_def_on(
        &self,
        parent: &'schema GraphQLType,
        name: &str,
    ) -> Option<&'schema Field> {
        let meta = self.schema.meta_fields();
        if parent.name() == self.schema.query_type().name() {
            match name {
                "__schema" => return Some(&meta.schema_field),
                "__type" => return Some(&meta.type_field),
                _ => {}
            }
        }
        if parent.is_composite() && name == "__typename" {
            return Some(&meta.typename_field);
        }
        parent.field(name)
    }

    /// Converts an AST type reference to an annotation when its named
    /// type is registered.
    fn known_annotation(&self, reference: &ast::TypeAnnotation<'_>) -> Option<TypeAnnotation> {
        let annotation = TypeAnnotation::from_ast(reference);
        annotation.innermost_type(self.schema).map(|_| annotation)
    }

    fn named_annotation(&self, name: &str) -> Option<TypeAnnotation> {
        self.schema
            .type_named(name)
            .map(|graphql_type| TypeAnnotation::named(graphql_type.name()))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn enter_operation(&mut self, node: &ast::OperationDefinition<'_>) {
        let root = self
            .schema
            .operation_root(node.operation)
            .filter(|graphql_type| graphql_type.as_object().is_some())
            .map(|graphql_type| TypeAnnotation::named(graphql_type.name()));
        self.type_stack.push(root);
    }

    fn enter_selection_set(&mut self) {
        let named = self
            .current_named_type()
            .filter(|graphql_type| graphql_type.is_composite());
        self.parent_type_stack.push(named);
    }

    fn enter_field(&mut self, node: &ast::Field<'_>) {
        let field_def = self
            .parent_type()
            .and_then(|parent| self.field_def_on(parent, node.name.as_str()));
        self.field_def_stack.push(field_def);
        self.type_stack.push(
            field_def
                .map(|field| field.type_annotation.clone())
                .filter(|annotation| annotation.is_output_type(self.schema)),
        );
    }

    fn enter_fragment_condition(&mut self, condition: Option<&ast::TypeCondition<'_>>) {
        let annotation = match condition {
            Some(condition) => self
                .named_annotation(condition.named_type.name.as_str())
                .filter(|annotation| annotation.is_output_type(self.schema)),
            // An inline fragment without a condition retains the current
            // type.
            None => self.current_type().cloned(),
        };
        self.type_stack.push(annotation);
    }

    fn enter_argument(&mut self, node: &ast::Argument<'_>) {
        let context_params = self
            .directive
            .map(|directive| &directive.arguments)
            .or_else(|| self.field_def().map(|field| &field.parameters));
        match context_params {
            Some(params) => {
                let argument = params.get(node.name.as_str());
                self.argument = argument;
                self.input_value_def_stack.push(argument);
                self.input_type_stack.push(
                    argument
                        .map(|arg| arg.value_type.clone())
                        .filter(|annotation| annotation.is_input_type(self.schema)),
                );
            }
            None => {
                self.argument = None;
                self.input_value_def_stack.push(None);
                self.input_type_stack.push(None);
            }
        }
    }

    fn enter_list_value(&mut self) {
        // Unwrap one level of list from the current input type; the
        // nullable flag never wraps, so no non-null unwrapping is needed.
        let item = match self.input_type() {
            Some(TypeAnnotation::List(list)) => Some(list.item.clone()),
            _ => None,
        };
        // List positions never carry a default value.
        self.input_value_def_stack.push(None);
        self.input_type_stack.push(item);
    }

    fn enter_object_field(&mut self, node: &ast::ObjectField<'_>) {
        let field_def = self
            .input_type()
            .and_then(|annotation| annotation.innermost_type(self.schema))
            .and_then(GraphQLType::as_input_object)
            .and_then(|input_object| input_object.field(node.name.as_str()));
        self.input_value_def_stack.push(field_def);
        self.input_type_stack.push(
            field_def
                .map(|field| field.value_type.clone())
                .filter(|annotation| annotation.is_input_type(self.schema)),
        );
    }

    fn enter_enum_value(&mut self, node: &ast::EnumValue<'_>) {
        self.enum_value = self
            .input_type()
            .and_then(|annotation| annotation.innermost_type(self.schema))
            .and_then(GraphQLType::as_enum)
            .and_then(|enum_type| enum_type.variant(node.value.as_ref()));
    }

    fn leave_input_value(&mut self) {
        self.input_type_stack.pop();
        self.input_value_def_stack.pop();
    }
}

// =============================================================================
// Visitor adapter
// =============================================================================

/// Drives a [`TypeInfo`] from the traversal.
///
/// When composed with rule visitors this **must** be listed first in the
/// [`ParallelVisitor`](graphquill_parser::ParallelVisitor) so the rules
/// observe fully updated stacks on their `enter` hooks.
pub struct TypeInfoVisitor<'v, 'schema> {
    pub info: &'v RefCell<TypeInfo<'schema>>,
}

impl<'src> DocumentVisitor<'src> for TypeInfoVisitor<'_, '_> {
    fn enter_operation_definition(
        &mut self,
        node: &ast::OperationDefinition<'src>,
    ) -> VisitFlow {
        self.info.borrow_mut().enter_operation(node);
        VisitFlow::Next
    }

    fn leave_operation_definition(&mut self, _node: &ast::OperationDefinition<'src>) {
        self.info.borrow_mut().type_stack.pop();
    }

    fn enter_selection_set(&mut self, _node: &ast::SelectionSet<'src>) -> VisitFlow {
        self.info.borrow_mut().enter_selection_set();
        VisitFlow::Next
    }

    fn leave_selection_set(&mut self, _node: &ast::SelectionSet<'src>) {
        self.info.borrow_mut().parent_type_stack.pop();
    }

    fn enter_field(&mut self, node: &ast::Field<'src>) -> VisitFlow {
        self.info.borrow_mut().enter_field(node);
        VisitFlow::Next
    }

    fn leave_field(&mut self, _node: &ast::Field<'src>) {
        let mut info = self.info.borrow_mut();
        info.type_stack.pop();
        info.field_def_stack.pop();
    }

    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        self.info
            .borrow_mut()
            .enter_fragment_condition(Some(&node.type_condition));
        VisitFlow::Next
    }

    fn leave_fragment_definition(&mut self, _node: &ast::FragmentDefinition<'src>) {
        self.info.borrow_mut().type_stack.pop();
    }

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment<'src>) -> VisitFlow {
        self.info
            .borrow_mut()
            .enter_fragment_condition(node.type_condition.as_ref());
        VisitFlow::Next
    }

    fn leave_inline_fragment(&mut self, _node: &ast::InlineFragment<'src>) {
        self.info.borrow_mut().type_stack.pop();
    }

    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) -> VisitFlow {
        let mut info = self.info.borrow_mut();
        let annotation = info
            .known_annotation(&node.var_type)
            .filter(|annotation| annotation.is_input_type(info.schema));
        info.input_type_stack.push(annotation);
        VisitFlow::Next
    }

    fn leave_variable_definition(&mut self, _node: &ast::VariableDefinition<'src>) {
        self.info.borrow_mut().input_type_stack.pop();
    }

    fn enter_directive(&mut self, node: &ast::DirectiveAnnotation<'src>) -> VisitFlow {
        let mut info = self.info.borrow_mut();
        info.directive = info.schema.directive(node.name.as_str());
        VisitFlow::Next
    }

    fn leave_directive(&mut self, _node: &ast::DirectiveAnnotation<'src>) {
        self.info.borrow_mut().directive = None;
    }

    fn enter_argument(&mut self, node: &ast::Argument<'src>) -> VisitFlow {
        self.info.borrow_mut().enter_argument(node);
        VisitFlow::Next
    }

    fn leave_argument(&mut self, _node: &ast::Argument<'src>) {
        let mut info = self.info.borrow_mut();
        info.argument = None;
        info.leave_input_value();
    }

    fn enter_value(&mut self, node: &ast::Value<'src>) -> VisitFlow {
        match node {
            ast::Value::List(_) => self.info.borrow_mut().enter_list_value(),
            ast::Value::Enum(enum_value) => self.info.borrow_mut().enter_enum_value(enum_value),
            _ => {}
        }
        VisitFlow::Next
    }

    fn leave_value(&mut self, node: &ast::Value<'src>) {
        match node {
            ast::Value::List(_) => self.info.borrow_mut().leave_input_value(),
            ast::Value::Enum(_) => self.info.borrow_mut().enum_value = None,
            _ => {}
        }
    }

    fn enter_object_field(&mut self, node: &ast::ObjectField<'src>) -> VisitFlow {
        self.info.borrow_mut().enter_object_field(node);
        VisitFlow::Next
    }

    fn leave_object_field(&mut self, _node: &ast::ObjectField<'src>) {
        self.info.borrow_mut().leave_input_value();
    }
}
