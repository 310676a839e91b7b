use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::validation::RuleCtx;
use graphquill_parser::ast;
use graphquill_parser::print_value;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Fields sharing one response name must be mergeable: same underlying
/// field, same arguments, compatible return types, and mergeable
/// sub-selections.
///
/// Selections are flattened through named and inline fragments before
/// comparison. Two fields whose scopes are *different object types* can
/// never both apply to one concrete value, so they are exempt.
pub(crate) struct OverlappingFieldsCanBeMergedRule<'v, 'schema, 'doc> {
    ctx: RuleCtx<'v, 'schema>,
    fragments: IndexMap<&'doc str, &'doc ast::FragmentDefinition<'doc>>,
    /// Pairs already reported, keyed by the two field spans' byte
    /// offsets; the same pair resurfaces when merged sub-selections are
    /// re-compared at deeper levels.
    reported: HashSet<(usize, usize)>,
}

/// One collected field occurrence: the type scope it was selected in
/// (`None` when unknown) and the AST node.
type FieldOccurrence<'doc> = (Option<String>, &'doc ast::Field<'doc>);

impl<'v, 'schema, 'doc> OverlappingFieldsCanBeMergedRule<'v, 'schema, 'doc> {
    pub fn new(ctx: RuleCtx<'v, 'schema>, document: &'doc ast::Document<'doc>) -> Self {
        Self {
            ctx,
            fragments: document
                .fragments()
                .map(|fragment| (fragment.name.as_str(), fragment))
                .collect(),
            reported: HashSet::new(),
        }
    }

    /// Flattens `selection_set` one field-level deep, entering fragments.
    fn collect<'a>(
        &self,
        scope: Option<&str>,
        selection_set: &'a ast::SelectionSet<'a>,
        visited: &mut HashSet<&'a str>,
        out: &mut IndexMap<String, Vec<FieldOccurrence<'a>>>,
    ) where
        'doc: 'a,
    {
        for selection in &selection_set.selections {
            match selection {
                ast::Selection::Field(field) => {
                    out.entry(field.response_name().to_string())
                        .or_default()
                        .push((scope.map(str::to_string), field));
                }
                ast::Selection::InlineFragment(inline) => {
                    let inline_scope = inline
                        .type_condition
                        .as_ref()
                        .map(|condition| condition.named_type.name.as_str())
                        .or(scope);
                    self.collect(inline_scope, &inline.selection_set, visited, out);
                }
                ast::Selection::FragmentSpread(spread) => {
                    let name = spread.name.as_str();
                    if !visited.insert(name) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(name) {
                        self.collect(
                            Some(fragment.type_condition.named_type.name.as_str()),
                            &fragment.selection_set,
                            visited,
                            out,
                        );
                    }
                }
            }
        }
    }

    fn field_annotation(&self, scope: &Option<String>, field: &ast::Field<'_>) -> Option<TypeAnnotation> {
        let scope_type = self.ctx.schema.type_named(scope.as_deref()?)?;
        scope_type
            .field(field.name.as_str())
            .map(|field_def| field_def.type_annotation.clone())
    }

    /// Canonicalized argument list for equality comparison.
    fn argument_signature(field: &ast::Field<'_>) -> Vec<(String, String)> {
        let mut signature: Vec<(String, String)> = field
            .arguments
            .iter()
            .map(|argument| {
                (
                    argument.name.as_str().to_string(),
                    print_value(&argument.value),
                )
            })
            .collect();
        signature.sort();
        signature
    }

    fn check_selection_set<'a>(
        &mut self,
        scope: Option<&str>,
        selection_sets: &[&'a ast::SelectionSet<'a>],
    ) where
        'doc: 'a,
    {
        let mut grouped: IndexMap<String, Vec<FieldOccurrence<'a>>> = IndexMap::new();
        let mut visited = HashSet::new();
        for selection_set in selection_sets {
            self.collect(scope, selection_set, &mut visited, &mut grouped);
        }

        for (response_name, occurrences) in &grouped {
            for i in 0..occurrences.len() {
                for j in (i + 1)..occurrences.len() {
                    self.check_pair(response_name, &occurrences[i], &occurrences[j]);
                }
            }
        }
    }

    fn check_pair<'a>(
        &mut self,
        response_name: &str,
        (scope_a, field_a): &FieldOccurrence<'a>,
        (scope_b, field_b): &FieldOccurrence<'a>,
    ) where
        'doc: 'a,
    {
        // Two different concrete object scopes never apply to the same
        // value, so their fields cannot conflict.
        if let (Some(name_a), Some(name_b)) = (scope_a, scope_b)
            && name_a != name_b
        {
            let object_a = self
                .ctx
                .schema
                .type_named(name_a)
                .is_some_and(|t| t.as_object().is_some());
            let object_b = self
                .ctx
                .schema
                .type_named(name_b)
                .is_some_and(|t| t.as_object().is_some());
            if object_a && object_b {
                return;
            }
        }

        let pair_key = (
            field_a.span.start_inclusive.byte_offset(),
            field_b.span.start_inclusive.byte_offset(),
        );

        let reason = if field_a.name.as_str() != field_b.name.as_str() {
            Some(format!(
                "\"{}\" and \"{}\" are different fields",
                field_a.name, field_b.name
            ))
        } else if Self::argument_signature(field_a) != Self::argument_signature(field_b) {
            Some("they have differing arguments".to_string())
        } else {
            let annotation_a = self.field_annotation(scope_a, field_a);
            let annotation_b = self.field_annotation(scope_b, field_b);
            match (annotation_a, annotation_b) {
                (Some(a), Some(b)) if Self::types_conflict(&a, &b, self.ctx.schema) => {
                    Some(format!("they return conflicting types \"{a}\" and \"{b}\""))
                }
                _ => None,
            }
        };

        if let Some(reason) = reason {
            if self.reported.insert(pair_key) {
                self.ctx.error(
                    format!(
                        "Fields \"{response_name}\" conflict because {reason}. Use different \
                         aliases on the fields to fetch both if this was intentional"
                    ),
                    &[&field_a.span, &field_b.span],
                );
            }
            return;
        }

        // Same field, same arguments: their sub-selections merge, so
        // compare those too.
        let subsets: Vec<&ast::SelectionSet<'_>> = [field_a, field_b]
            .iter()
            .filter_map(|field| field.selection_set.as_ref())
            .collect();
        if subsets.len() == 2 {
            let subscope = self
                .field_annotation(scope_a, field_a)
                .and_then(|annotation| {
                    annotation
                        .innermost_type(self.ctx.schema)
                        .map(|graphql_type| graphql_type.name().to_string())
                });
            self.check_selection_set(subscope.as_deref(), &subsets);
        }
    }

    /// Return-type shape conflicts: wrapper structure must match, and
    /// leaf types must be identical.
    fn types_conflict(a: &TypeAnnotation, b: &TypeAnnotation, schema: &crate::schema::Schema) -> bool {
        if a.is_nullable() != b.is_nullable() {
            return true;
        }
        match (a, b) {
            (TypeAnnotation::List(list_a), TypeAnnotation::List(list_b)) => {
                Self::types_conflict(&list_a.item, &list_b.item, schema)
            }
            (TypeAnnotation::List(_), _) | (_, TypeAnnotation::List(_)) => true,
            (TypeAnnotation::Named(named_a), TypeAnnotation::Named(named_b)) => {
                if named_a.type_ref.name() == named_b.type_ref.name() {
                    return false;
                }
                let leaf_a = named_a
                    .type_ref
                    .deref(schema)
                    .map(GraphQLType::is_leaf)
                    .unwrap_or(false);
                let leaf_b = named_b
                    .type_ref
                    .deref(schema)
                    .map(GraphQLType::is_leaf)
                    .unwrap_or(false);
                // Differently-named composites may still merge (their
                // subfields are compared); differing leaves never do.
                leaf_a || leaf_b
            }
        }
    }
}

impl<'src> DocumentVisitor<'src> for OverlappingFieldsCanBeMergedRule<'_, '_, 'src> {
    fn enter_selection_set(&mut self, node: &ast::SelectionSet<'src>) -> VisitFlow {
        let scope = self
            .ctx
            .info()
            .parent_type()
            .map(|parent| parent.name().to_string());
        self.check_selection_set(scope.as_deref(), &[node]);
        VisitFlow::Next
    }
}
