//! The specified query-validation rules, one visitor per file.
//!
//! Each rule is independent: it accumulates errors into the shared sink
//! and never affects traversal of the others.

mod executable_definitions;
mod fields_on_correct_type;
mod fragments_on_composite_types;
mod known_argument_names;
mod known_directives;
mod known_fragment_names;
mod known_type_names;
mod lone_anonymous_operation;
mod no_fragment_cycles;
mod no_undefined_variables;
mod no_unused_fragments;
mod no_unused_variables;
mod overlapping_fields_can_be_merged;
mod possible_fragment_spreads;
mod provided_required_arguments;
mod scalar_leafs;
mod single_field_subscriptions;
mod unique_argument_names;
mod unique_directives_per_location;
mod unique_fragment_names;
mod unique_input_field_names;
mod unique_operation_names;
mod unique_variable_names;
mod values_of_correct_type;
mod variable_usage;
mod variables_are_input_types;
mod variables_in_allowed_position;

pub(crate) use executable_definitions::ExecutableDefinitionsRule;
pub(crate) use fields_on_correct_type::FieldsOnCorrectTypeRule;
pub(crate) use fragments_on_composite_types::FragmentsOnCompositeTypesRule;
pub(crate) use known_argument_names::KnownArgumentNamesRule;
pub(crate) use known_directives::KnownDirectivesRule;
pub(crate) use known_fragment_names::KnownFragmentNamesRule;
pub(crate) use known_type_names::KnownTypeNamesRule;
pub(crate) use lone_anonymous_operation::LoneAnonymousOperationRule;
pub(crate) use no_fragment_cycles::NoFragmentCyclesRule;
pub(crate) use no_undefined_variables::NoUndefinedVariablesRule;
pub(crate) use no_unused_fragments::NoUnusedFragmentsRule;
pub(crate) use no_unused_variables::NoUnusedVariablesRule;
pub(crate) use overlapping_fields_can_be_merged::OverlappingFieldsCanBeMergedRule;
pub(crate) use possible_fragment_spreads::PossibleFragmentSpreadsRule;
pub(crate) use provided_required_arguments::ProvidedRequiredArgumentsRule;
pub(crate) use scalar_leafs::ScalarLeafsRule;
pub(crate) use single_field_subscriptions::SingleFieldSubscriptionsRule;
pub(crate) use unique_argument_names::UniqueArgumentNamesRule;
pub(crate) use unique_directives_per_location::UniqueDirectivesPerLocationRule;
pub(crate) use unique_fragment_names::UniqueFragmentNamesRule;
pub(crate) use unique_input_field_names::UniqueInputFieldNamesRule;
pub(crate) use unique_operation_names::UniqueOperationNamesRule;
pub(crate) use unique_variable_names::UniqueVariableNamesRule;
pub(crate) use values_of_correct_type::ValuesOfCorrectTypeRule;
pub(crate) use variables_are_input_types::VariablesAreInputTypesRule;
pub(crate) use variables_in_allowed_position::VariablesInAllowedPositionRule;
