//! Field collection: flattening a selection set through fragments and
//! `@skip` / `@include` directives into an ordered response-name map.

use crate::schema::Schema;
use crate::types::ObjectType;
use graphquill_parser::ast;
use indexmap::IndexMap;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::collections::HashSet;

/// Ordered grouping of the fields selected under each response name.
///
/// Ordering is first-seen order of each response name, which is the
/// ordering the response `data` map must preserve.
pub(crate) type GroupedFields<'doc> = IndexMap<String, Vec<&'doc ast::Field<'doc>>>;

/// Collects the fields of the given selection sets for the runtime type
/// `object_type`. Several sets collect into one grouping (fields merged
/// under one response name share it), with a common fragment re-entry
/// guard.
///
/// - Fields excluded by `@skip(if:)` / `@include(if:)` (evaluated against
///   the coerced variables) are dropped.
/// - Inline fragments and named spreads whose type condition does not
///   apply to `object_type` are dropped.
/// - A named fragment is entered at most once per collection; cycles are
///   rejected during validation but the collector still guards.
pub(crate) fn collect_fields_merged<'doc>(
    schema: &Schema,
    object_type: &ObjectType,
    selection_sets: &[&'doc ast::SelectionSet<'doc>],
    variables: &JsonMap<String, JsonValue>,
    fragments: &HashMap<&'doc str, &'doc ast::FragmentDefinition<'doc>>,
) -> GroupedFields<'doc> {
    let mut grouped = GroupedFields::new();
    let mut visited_fragments = HashSet::new();
    for selection_set in selection_sets {
        collect_into(
            schema,
            object_type,
            selection_set,
            variables,
            fragments,
            &mut visited_fragments,
            &mut grouped,
        );
    }
    grouped
}

fn collect_into<'doc>(
    schema: &Schema,
    object_type: &ObjectType,
    selection_set: &'doc ast::SelectionSet<'doc>,
    variables: &JsonMap<String, JsonValue>,
    fragments: &HashMap<&'doc str, &'doc ast::FragmentDefinition<'doc>>,
    visited_fragments: &mut HashSet<&'doc str>,
    grouped: &mut GroupedFields<'doc>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if !should_include(&field.directives, variables) {
                    continue;
                }
                grouped
                    .entry(field.response_name().to_string())
                    .or_default()
                    .push(field);
            }
            ast::Selection::InlineFragment(inline) => {
                if !should_include(&inline.directives, variables) {
                    continue;
                }
                let applies = match &inline.type_condition {
                    Some(condition) => {
                        fragment_type_applies(schema, object_type, condition)
                    }
                    None => true,
                };
                if applies {
                    collect_into(
                        schema,
                        object_type,
                        &inline.selection_set,
                        variables,
                        fragments,
                        visited_fragments,
                        grouped,
                    );
                }
            }
            ast::Selection::FragmentSpread(spread) => {
                if !should_include(&spread.directives, variables) {
                    continue;
                }
                let name = spread.name.as_str();
                if !visited_fragments.insert(name) {
                    continue;
                }
                let Some(fragment) = fragments.get(name) else {
                    continue;
                };
                if fragment_type_applies(schema, object_type, &fragment.type_condition) {
                    collect_into(
                        schema,
                        object_type,
                        &fragment.selection_set,
                        variables,
                        fragments,
                        visited_fragments,
                        grouped,
                    );
                }
            }
        }
    }
}

/// Evaluates `@skip(if:)` and `@include(if:)` on a selection.
///
/// Both directives may be present; skip wins. Argument values are either
/// boolean literals or variables already coerced to booleans.
fn should_include(
    directives: &[ast::DirectiveAnnotation<'_>],
    variables: &JsonMap<String, JsonValue>,
) -> bool {
    for directive in directives {
        let flag = match directive.name.as_str() {
            "skip" => Some(false),
            "include" => Some(true),
            _ => None,
        };
        let Some(include_when_true) = flag else {
            continue;
        };
        let condition = directive
            .argument("if")
            .map(|argument| eval_bool(&argument.value, variables))
            .unwrap_or(false);
        if condition != include_when_true {
            return false;
        }
    }
    true
}

fn eval_bool(value: &ast::Value<'_>, variables: &JsonMap<String, JsonValue>) -> bool {
    match value {
        ast::Value::Boolean(v) => v.value,
        ast::Value::Variable(v) => variables
            .get(v.name.as_str())
            .and_then(JsonValue::as_bool)
            .unwrap_or(false),
        _ => false,
    }
}

/// True when a fragment with `condition` may apply to the runtime type
/// `object_type`: the condition names the object itself, or an abstract
/// type the object belongs to.
fn fragment_type_applies(
    schema: &Schema,
    object_type: &ObjectType,
    condition: &ast::TypeCondition<'_>,
) -> bool {
    let condition_name = condition.named_type.name.as_str();
    if condition_name == object_type.name {
        return true;
    }
    let Some(condition_type) = schema.type_named(condition_name) else {
        return false;
    };
    let Some(object_graphql_type) = schema.type_named(&object_type.name) else {
        return false;
    };
    schema.is_possible_subtype(object_graphql_type, condition_type)
}
