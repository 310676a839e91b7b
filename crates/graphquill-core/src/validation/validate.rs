//! The validation entry point: one traversal, every rule.

use crate::schema::Schema;
use crate::validation::rules::*;
use crate::validation::RuleCtx;
use crate::validation::TypeInfo;
use crate::validation::TypeInfoVisitor;
use crate::validation::ValidationError;
use graphquill_parser::ast;
use graphquill_parser::walk_document;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::ParallelVisitor;
use std::cell::RefCell;

/// The outcome of validating a document against a schema.
#[derive(Clone, Debug)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// True when the document may execute.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates an executable document against a schema, running all
/// specified rules over a single traversal.
///
/// The type-info visitor runs first so every rule observes fully updated
/// type context on its `enter` hooks.
pub fn validate(schema: &Schema, document: &ast::Document<'_>) -> ValidationResult {
    let type_info = RefCell::new(TypeInfo::new(schema));
    let errors = RefCell::new(vec![]);
    let ctx = RuleCtx {
        schema,
        type_info: &type_info,
        errors: &errors,
    };

    let mut type_info_visitor = TypeInfoVisitor { info: &type_info };

    let mut executable_definitions = ExecutableDefinitionsRule::new(ctx);
    let mut unique_operation_names = UniqueOperationNamesRule::new(ctx);
    let mut lone_anonymous_operation = LoneAnonymousOperationRule::new(ctx);
    let mut single_field_subscriptions = SingleFieldSubscriptionsRule::new(ctx);
    let mut known_type_names = KnownTypeNamesRule::new(ctx);
    let mut fragments_on_composite_types = FragmentsOnCompositeTypesRule::new(ctx);
    let mut variables_are_input_types = VariablesAreInputTypesRule::new(ctx);
    let mut scalar_leafs = ScalarLeafsRule::new(ctx);
    let mut fields_on_correct_type = FieldsOnCorrectTypeRule::new(ctx);
    let mut unique_fragment_names = UniqueFragmentNamesRule::new(ctx);
    let mut known_fragment_names = KnownFragmentNamesRule::new(ctx);
    let mut no_unused_fragments = NoUnusedFragmentsRule::new(ctx);
    let mut possible_fragment_spreads = PossibleFragmentSpreadsRule::new(ctx);
    let mut no_fragment_cycles = NoFragmentCyclesRule::new(ctx);
    let mut unique_variable_names = UniqueVariableNamesRule::new(ctx);
    let mut no_undefined_variables = NoUndefinedVariablesRule::new(ctx);
    let mut no_unused_variables = NoUnusedVariablesRule::new(ctx);
    let mut known_directives = KnownDirectivesRule::new(ctx);
    let mut unique_directives_per_location = UniqueDirectivesPerLocationRule::new(ctx);
    let mut known_argument_names = KnownArgumentNamesRule::new(ctx);
    let mut unique_argument_names = UniqueArgumentNamesRule::new(ctx);
    let mut values_of_correct_type = ValuesOfCorrectTypeRule::new(ctx);
    let mut provided_required_arguments = ProvidedRequiredArgumentsRule::new(ctx);
    let mut variables_in_allowed_position = VariablesInAllowedPositionRule::new(ctx);
    let mut overlapping_fields = OverlappingFieldsCanBeMergedRule::new(ctx, document);
    let mut unique_input_field_names = UniqueInputFieldNamesRule::new(ctx);

    {
        let visitors: Vec<&mut dyn DocumentVisitor<'_>> = vec![
            // Type info first, always.
            &mut type_info_visitor,
            &mut executable_definitions,
            &mut unique_operation_names,
            &mut lone_anonymous_operation,
            &mut single_field_subscriptions,
            &mut known_type_names,
            &mut fragments_on_composite_types,
            &mut variables_are_input_types,
            &mut scalar_leafs,
            &mut fields_on_correct_type,
            &mut unique_fragment_names,
            &mut known_fragment_names,
            &mut no_unused_fragments,
            &mut possible_fragment_spreads,
            &mut no_fragment_cycles,
            &mut unique_variable_names,
            &mut no_undefined_variables,
            &mut no_unused_variables,
            &mut known_directives,
            &mut unique_directives_per_location,
            &mut known_argument_names,
            &mut unique_argument_names,
            &mut values_of_correct_type,
            &mut provided_required_arguments,
            &mut variables_in_allowed_position,
            &mut overlapping_fields,
            &mut unique_input_field_names,
        ];
        let mut parallel = ParallelVisitor::new(visitors);
        walk_document(&mut parallel, document);
    }

    let errors = errors.into_inner();
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "document failed validation");
    }
    ValidationResult { errors }
}
