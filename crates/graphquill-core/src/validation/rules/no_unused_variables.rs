use crate::validation::rules::variable_usage::UsageTracker;
use crate::validation::rules::variable_usage::VariableDeclaration;
use crate::validation::rules::variable_usage::VariableUsage;
use crate::validation::RuleCtx;
use crate::types::TypeAnnotation;
use graphquill_parser::ast;
use graphquill_parser::DocumentVisitor;
use graphquill_parser::VisitFlow;
use std::collections::HashSet;

/// Every declared variable must be used somewhere reachable from its
/// operation.
pub(crate) struct NoUnusedVariablesRule<'v, 'schema> {
    ctx: RuleCtx<'v, 'schema>,
    tracker: UsageTracker,
}

impl<'v, 'schema> NoUnusedVariablesRule<'v, 'schema> {
    pub fn new(ctx: RuleCtx<'v, 'schema>) -> Self {
        Self {
            ctx,
            tracker: UsageTracker::new(),
        }
    }
}

impl<'src> DocumentVisitor<'src> for NoUnusedVariablesRule<'_, '_> {
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
            self.tracker.record_usage(VariableUsage {
                name: variable.name.as_str().to_string(),
                span: variable.span.clone(),
                expected_type: None,
                location_has_default: false,
            });
        }
        VisitFlow::Next
    }

    fn leave_document(&mut self, _node: &ast::Document<'src>) {
        for index in 0..self.tracker.operations.len() {
            let used: HashSet<String> = self
                .tracker
                .transitive_usages(index)
                .into_iter()
                .map(|usage| usage.name.clone())
                .collect();
            let operation = &self.tracker.operations[index];
            for declaration in &operation.declared {
                if used.contains(&declaration.name) {
                    continue;
                }
                let message = match &operation.name {
                    Some(operation_name) => format!(
                        "Variable \"${}\" is never used in operation \"{operation_name}\"",
                        declaration.name
                    ),
                    None => format!("Variable \"${}\" is never used", declaration.name),
                };
                self.ctx.error(message, &[&declaration.span]);
            }
        }
    }
}
