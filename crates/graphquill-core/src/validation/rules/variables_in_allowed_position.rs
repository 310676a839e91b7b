use crate::validation::rules::variable_usage::UsageTracker;
use crate::validation::rules::variable_usage::VariableDeclaration;
use crate::validation::rules::variable_usage::VariableUsage;
use crate::validation::RuleCtx;
use crate::types::TypeAnnotation;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashMap;

/// A variable may only appear in positions its declared type can
/// satisfy: the declared type must be a subtype of the position's type,
/// with defaults relaxing the non-null requirement.
pub(crate) struct VariablesInAllowedPositionRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    tracker: UsageTracker,
}

impl<'v, 'schema> VariablesInAllowedPositionRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            tracker: UsageTracker::new(),
        }
    }

    /// The spec's allowed-usage check.
    fn usage_allowed(
        &self,
        declaration: &VariableDeclaration,
        usage: &VariableUsage,
        expected: &TypeAnnotation,
    ) -> bool {
        if !expected.is_nullable() && declaration.annotation.is_nullable() {
            // A nullable variable can fill a non-null position only when
            // a default exists on either side.
            if !declaration.has_default && !usage.location_has_default {
                return false;
            }
            return declaration
                .annotation
                .is_subtype_of(&expected.as_nullable(), self.ctx.schema);
        }
        declaration
            .annotation
            .is_subtype_of(expected, self.ctx.schema)
    }
}

impl<'src> DocumentVisitor<'src> for VariablesInAllowedPositionRule<'_, '_> {
    fn enter_operation_definition(&mut self, node: &ast::OperationDefinition<'src>) -> VisitFlow {
        self.tracker.enter_operation(node);
        VisitFlow::Next
    }

    fn leave_operation_definition(&mut self, _node: &ast::OperationDefinition<'src>) {
        self.tracker.leave_scope();
    }

    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition<'src>) -> VisitFlow {
        self.tracker.enter_fragment(node);
        VisitFlow::Next
    }

    fn leave_fragment_definition(&mut self, _node: &ast::FragmentDefinition<'src>) {
        self.tracker.leave_scope();
    }

    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition<'src>) -> VisitFlow {
        self.tracker.declare(VariableDeclaration {
            name: node.variable.as_str().to_string(),
            span: node.span.clone(),
            annotation: TypeAnnotation::from_ast(&node.var_type),
            has_default: node.default_value.is_some(),
        });
        VisitFlow::Next
    }

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread<'src>) -> VisitFlow {
        self.tracker.record_spread(node);
        VisitFlow::Next
    }

    fn enter_value(&mut self, node: &ast::Value<'src>) -> VisitFlow {
        if let ast::Value::Variable(variable) = node {
            let info = self.ctx.info();
            let expected_type = info.input_type().cloned();
            let location_has_default = info
                .input_value_def()
                .is_some_and(|input_value| input_value.default_value.is_some());
            drop(info);
            self.tracker.record_usage(VariableUsage {
                name: variable.name.as_str().to_string(),
                span: variable.span.clone(),
                expected_type,
                location_has_default,
            });
        }
        VisitFlow::Next
    }

    fn leave_document(&mut self, _node: &ast::Document<'src>) {
        for index in 0..self.tracker.operations.len() {
            let declared: HashMap<&str, &VariableDeclaration> = self.tracker.operations[index]
                .declared
                .iter()
                .map(|declaration| (declaration.name.as_str(), declaration))
                .collect();
            for usage in self.tracker.transitive_usages(index) {
                let Some(declaration) = declared.get(usage.name.as_str()) else {
                    continue;
                };
                let Some(expected) = &usage.expected_type else {
                    continue;
                };
                if !self.usage_allowed(declaration, usage, expected) {
                    self.ctx.error(
                        format!(
                            "Variable \"${}\" of type \"{}\" used in position expecting type \
                             \"{expected}\"",
                            usage.name, declaration.annotation
                        ),
                        &[&declaration.span, &usage.span],
                    );
                }
            }
        }
    }
}
